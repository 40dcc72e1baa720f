//! Outline commands and glyph shape identity.
//!
//! Shapes are compared and hashed bitwise: two glyphs are the same shape
//! iff they carry the same advance width and the same command sequence,
//! coordinate for coordinate. That identity is what the batch-wide
//! shape→code table and the merge predicate key on.

use std::hash::{Hash, Hasher};

/// Advance width forced onto canonical whitespace glyphs, in design units.
pub const WHITESPACE_ADVANCE: f32 = 512.0;

/// One outline path command, in font-design units.
#[derive(Clone, Copy, Debug)]
pub enum PathCommand {
    /// Begin a new subpath at (x, y).
    MoveTo { x: f32, y: f32 },
    /// A line segment from the current point to (x, y).
    LineTo { x: f32, y: f32 },
    /// A quadratic bezier to (x, y) with control point (cx0, cy0).
    QuadTo { cx0: f32, cy0: f32, x: f32, y: f32 },
    /// A cubic bezier to (x, y) with control points (cx0, cy0), (cx1, cy1).
    CurveTo {
        cx0: f32,
        cy0: f32,
        cx1: f32,
        cy1: f32,
        x: f32,
        y: f32,
    },
    /// Close the current subpath.
    Close,
}

impl PathCommand {
    // discriminant + coordinate bits, so equality and hashing agree
    fn raw(self) -> (u8, [u32; 6]) {
        let b = f32::to_bits;
        match self {
            Self::MoveTo { x, y } => (0, [b(x), b(y), 0, 0, 0, 0]),
            Self::LineTo { x, y } => (1, [b(x), b(y), 0, 0, 0, 0]),
            Self::QuadTo { cx0, cy0, x, y } => (2, [b(cx0), b(cy0), b(x), b(y), 0, 0]),
            Self::CurveTo {
                cx0,
                cy0,
                cx1,
                cy1,
                x,
                y,
            } => (3, [b(cx0), b(cy0), b(cx1), b(cy1), b(x), b(y)]),
            Self::Close => (4, [0; 6]),
        }
    }
}

impl PartialEq for PathCommand {
    fn eq(&self, other: &Self) -> bool {
        self.raw() == other.raw()
    }
}

impl Eq for PathCommand {}

impl Hash for PathCommand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw().hash(state);
    }
}

/// An ordered sequence of outline commands.
///
/// Built through the pen-style methods as outline data is decoded from a
/// source document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Outline {
    commands: Vec<PathCommand>,
}

impl Outline {
    /// A new, empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Begin a new subpath at (x, y).
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    /// Emit a line segment from the current point to (x, y).
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    /// Emit a quadratic bezier segment from the current point with a control
    /// point at (cx0, cy0) and ending at (x, y).
    pub fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::QuadTo { cx0, cy0, x, y });
    }

    /// Emit a cubic bezier segment from the current point with control
    /// points at (cx0, cy0) and (cx1, cy1) and ending at (x, y).
    pub fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::CurveTo {
            cx0,
            cy0,
            cx1,
            cy1,
            x,
            y,
        });
    }

    /// Emit a command to close the current subpath.
    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Convert to a [`kurbo::BezPath`] for geometry tooling.
    #[cfg(feature = "kurbo")]
    pub fn to_bez_path(&self) -> kurbo::BezPath {
        let pt = |x: f32, y: f32| kurbo::Point {
            x: x as f64,
            y: y as f64,
        };
        let mut path = kurbo::BezPath::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo { x, y } => path.move_to(pt(x, y)),
                PathCommand::LineTo { x, y } => path.line_to(pt(x, y)),
                PathCommand::QuadTo { cx0, cy0, x, y } => path.quad_to(pt(cx0, cy0), pt(x, y)),
                PathCommand::CurveTo {
                    cx0,
                    cy0,
                    cx1,
                    cy1,
                    x,
                    y,
                } => path.curve_to(pt(cx0, cy0), pt(cx1, cy1), pt(x, y)),
                PathCommand::Close => path.close_path(),
            }
        }
        path
    }
}

impl FromIterator<PathCommand> for Outline {
    fn from_iter<T: IntoIterator<Item = PathCommand>>(iter: T) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

/// Shape identity of one glyph: advance width plus outline.
///
/// Equality is the unit of shape deduplication; glyphs judged equal here may
/// share a character code and may land in the same output font.
#[derive(Clone, Debug)]
pub struct GlyphData {
    /// Horizontal advance, in design units.
    pub advance: f32,
    /// The outline command sequence.
    pub outline: Outline,
}

impl GlyphData {
    pub fn new(advance: f32, outline: Outline) -> Self {
        Self { advance, outline }
    }

    /// The canonical whitespace glyph: no outline, shared advance width.
    pub fn whitespace() -> Self {
        Self {
            advance: WHITESPACE_ADVANCE,
            outline: Outline::new(),
        }
    }
}

impl PartialEq for GlyphData {
    fn eq(&self, other: &Self) -> bool {
        self.advance.to_bits() == other.advance.to_bits() && self.outline == other.outline
    }
}

impl Eq for GlyphData {}

impl Hash for GlyphData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.advance.to_bits().hash(state);
        self.outline.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn triangle(size: f32) -> Outline {
        let mut outline = Outline::new();
        outline.move_to(0.0, 0.0);
        outline.line_to(size, 0.0);
        outline.line_to(size / 2.0, size);
        outline.close();
        outline
    }

    #[test]
    fn equal_shapes_compare_equal() {
        let a = GlyphData::new(600.0, triangle(500.0));
        let b = GlyphData::new(600.0, triangle(500.0));
        assert_eq!(a, b);
    }

    #[test]
    fn advance_is_part_of_shape_identity() {
        let a = GlyphData::new(600.0, triangle(500.0));
        let b = GlyphData::new(601.0, triangle(500.0));
        assert_ne!(a, b);
    }

    #[test]
    fn coordinates_compare_bitwise() {
        let mut pos = Outline::new();
        pos.move_to(0.0, 0.0);
        let mut neg = Outline::new();
        neg.move_to(-0.0, 0.0);
        // 0.0 == -0.0 as floats, but not as shapes; Hash and Eq must agree
        assert_ne!(pos, neg);
    }

    #[test]
    fn shapes_key_a_hash_map() {
        let mut table = HashMap::new();
        table.insert(GlyphData::new(600.0, triangle(500.0)), 0xE000_u32);
        assert_eq!(
            table.get(&GlyphData::new(600.0, triangle(500.0))),
            Some(&0xE000)
        );
        assert_eq!(table.get(&GlyphData::new(600.0, triangle(501.0))), None);
    }

    #[test]
    fn whitespace_glyph_is_empty_at_shared_advance() {
        let ws = GlyphData::whitespace();
        assert!(ws.outline.is_empty());
        assert_eq!(ws.advance, WHITESPACE_ADVANCE);
        assert_eq!(ws, GlyphData::whitespace());
    }

    #[cfg(feature = "kurbo")]
    #[test]
    fn outline_converts_to_bez_path() {
        let path = triangle(500.0).to_bez_path();
        assert_eq!(path.elements().len(), 4);
    }
}
