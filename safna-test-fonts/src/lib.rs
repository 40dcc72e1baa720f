//! Synthetic font inputs shared by the safna tests.
//!
//! Shapes are parameterized by size so tests can mint as many distinct or
//! identical shapes as a scenario needs without hand-writing outlines.

use safna::{FontId, FontMetrics, GlyphData, Outline, SourceFont, SourceGlyph};

pub const METRICS: FontMetrics = FontMetrics {
    ascent: 800.0,
    descent: 200.0,
    scale: 1.0,
};

/// A closed box outline; distinct sizes are distinct shapes.
pub fn box_glyph(size: f32) -> GlyphData {
    let mut outline = Outline::new();
    outline.move_to(0.0, 0.0);
    outline.line_to(size, 0.0);
    outline.line_to(size, size);
    outline.line_to(0.0, size);
    outline.close();
    GlyphData::new(size, outline)
}

/// A curved bowl outline, unequal to any box of the same advance.
pub fn bowl_glyph(size: f32) -> GlyphData {
    let mut outline = Outline::new();
    outline.move_to(0.0, size);
    outline.quad_to(size / 2.0, 0.0, size, size);
    outline.close();
    GlyphData::new(size, outline)
}

pub fn glyph(code: u32, data: GlyphData) -> SourceGlyph {
    SourceGlyph {
        code,
        whitespace: false,
        data,
    }
}

pub fn whitespace_glyph(code: u32) -> SourceGlyph {
    SourceGlyph {
        code,
        whitespace: true,
        data: box_glyph(100.0),
    }
}

pub fn source_font(document: u32, font: u32, name: &str, glyphs: Vec<SourceGlyph>) -> SourceFont {
    SourceFont {
        id: FontId::new(document, font),
        name: name.into(),
        metrics: METRICS,
        glyphs,
        kerning: vec![],
    }
}
