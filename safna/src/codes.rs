//! Character-code assignment for extracted glyphs.
//!
//! Every glyph in the batch gets a canonical character code: whitespace
//! collapses onto the space character, codes a downstream character map
//! cannot carry are moved into the private use area, and identical shapes
//! are steered onto the same private-use code so that fonts from different
//! documents stay mergeable.

use std::collections::{HashMap, HashSet};

use crate::font::{FontGlyph, SourceGlyph};
use crate::glyph::GlyphData;

/// First code of the private use area; reassigned glyphs start here.
pub const PRIVATE_USE_START: u32 = 0xE000;

/// Returns true for codes the assigner never keeps or hands out: the
/// control range, the surrogate range, a block where downstream font
/// tooling is known to misbehave, and the specials range.
fn reserved(code: u32) -> bool {
    matches!(
        code,
        0x0000..=0x001F | 0x1D00..=0x1DFF | 0xD800..=0xDFFF | 0xFFF0..=0xFFFF
    )
}

fn is_whitespace_code(code: u32) -> bool {
    char::from_u32(code).is_some_and(char::is_whitespace)
}

/// Batch-wide code assignment context.
///
/// Carries the two pieces of state that must persist across the entire
/// batch: the next-available private-use code and the shape→code reuse
/// table. Create one per batch run, pass it by `&mut` through record
/// construction, and drop it at batch end. Assignment order is the batch
/// order, so one context must only ever see one sequential pass.
#[derive(Debug)]
pub struct CodeAssigner {
    next_code: u32,
    by_shape: HashMap<GlyphData, u32>,
}

impl CodeAssigner {
    pub fn new() -> Self {
        Self {
            next_code: PRIVATE_USE_START,
            by_shape: HashMap::new(),
        }
    }

    /// Assign canonical codes to one font's glyphs, in glyph-index order.
    ///
    /// Whitespace glyphs beyond the first are dropped: they all canonicalize
    /// to the same space entry, and a record never carries one code twice.
    pub(crate) fn assign_font(&mut self, glyphs: &[SourceGlyph]) -> Vec<FontGlyph> {
        let mut used = HashSet::with_capacity(glyphs.len());
        let mut out = Vec::with_capacity(glyphs.len());
        for glyph in glyphs {
            if let Some(assigned) = self.assign(glyph, &mut used) {
                out.push(assigned);
            }
        }
        out
    }

    fn assign(&mut self, glyph: &SourceGlyph, used: &mut HashSet<u32>) -> Option<FontGlyph> {
        if glyph.whitespace {
            // Whitespace glyphs are visually interchangeable; forcing them
            // all onto one canonical space avoids needless code and shape
            // diversity.
            if !used.insert(' ' as u32) {
                return None;
            }
            return Some(FontGlyph {
                character: ' ' as u32,
                data: GlyphData::whitespace(),
            });
        }

        let original = glyph.code;
        let character =
            if used.contains(&original) || is_whitespace_code(original) || reserved(original) {
                let fresh = self.allocate(&glyph.data, used);
                log::debug!("glyph U+{original:04X} reassigned to U+{fresh:04X}");
                fresh
            } else {
                original
            };
        used.insert(character);
        Some(FontGlyph {
            character,
            data: glyph.data.clone(),
        })
    }

    /// Pick a private-use code for a glyph that cannot keep its own.
    ///
    /// A shape seen earlier in the batch reuses its remembered code whenever
    /// the current font leaves it free; that is what lets later merging line
    /// identical shapes up across documents.
    fn allocate(&mut self, shape: &GlyphData, used: &HashSet<u32>) -> u32 {
        if let Some(&code) = self.by_shape.get(shape) {
            if !used.contains(&code) {
                return code;
            }
        }
        // The font may legitimately carry private-use codes of its own, so
        // scan past those; the counter itself never moves backwards.
        let mut code = self.next_code;
        while used.contains(&code) || reserved(code) {
            code += 1;
        }
        self.next_code = code + 1;
        self.by_shape.insert(shape.clone(), code);
        code
    }
}

impl Default for CodeAssigner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::{Outline, WHITESPACE_ADVANCE};
    use rstest::rstest;

    fn shape(size: f32) -> GlyphData {
        let mut outline = Outline::new();
        outline.move_to(0.0, 0.0);
        outline.line_to(size, size);
        outline.close();
        GlyphData::new(size, outline)
    }

    fn glyph(code: u32, size: f32) -> SourceGlyph {
        SourceGlyph {
            code,
            whitespace: false,
            data: shape(size),
        }
    }

    fn whitespace(code: u32) -> SourceGlyph {
        SourceGlyph {
            code,
            whitespace: true,
            data: shape(1.0),
        }
    }

    #[test]
    fn acceptable_codes_are_kept() {
        let mut assigner = CodeAssigner::new();
        let glyphs = assigner.assign_font(&[glyph('a' as u32, 500.0), glyph('b' as u32, 600.0)]);
        assert_eq!(glyphs[0].character, 'a' as u32);
        assert_eq!(glyphs[1].character, 'b' as u32);
    }

    #[test]
    fn conflicting_code_moves_to_private_use() {
        let mut assigner = CodeAssigner::new();
        let glyphs = assigner.assign_font(&[glyph('a' as u32, 500.0), glyph('a' as u32, 600.0)]);
        assert_eq!(glyphs[0].character, 'a' as u32);
        assert_eq!(glyphs[1].character, PRIVATE_USE_START);
    }

    #[rstest]
    #[case(0x0000)]
    #[case(0x001F)]
    #[case(0x1D00)]
    #[case(0x1DFF)]
    #[case(0xD800)]
    #[case(0xDFFF)]
    #[case(0xFFF0)]
    #[case(0xFFFF)]
    fn reserved_code_is_reassigned(#[case] code: u32) {
        let mut assigner = CodeAssigner::new();
        let glyphs = assigner.assign_font(&[glyph(code, 500.0)]);
        assert_eq!(glyphs[0].character, PRIVATE_USE_START);
    }

    #[rstest]
    #[case(' ' as u32)]
    #[case('\u{00A0}' as u32)]
    #[case('\u{3000}' as u32)]
    fn whitespace_code_is_reassigned(#[case] code: u32) {
        let mut assigner = CodeAssigner::new();
        let glyphs = assigner.assign_font(&[glyph(code, 500.0)]);
        assert_eq!(glyphs[0].character, PRIVATE_USE_START);
    }

    #[test]
    fn whitespace_glyph_canonicalizes() {
        let mut assigner = CodeAssigner::new();
        let glyphs = assigner.assign_font(&[whitespace(0x41)]);
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0].character, ' ' as u32);
        assert_eq!(glyphs[0].data.advance, WHITESPACE_ADVANCE);
        assert!(glyphs[0].data.outline.is_empty());
    }

    #[test]
    fn duplicate_whitespace_glyphs_collapse() {
        let mut assigner = CodeAssigner::new();
        let glyphs = assigner.assign_font(&[whitespace(0x41), whitespace(0x42), glyph('a' as u32, 500.0)]);
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].character, ' ' as u32);
        assert_eq!(glyphs[1].character, 'a' as u32);
    }

    #[test]
    fn same_shape_reuses_the_same_code_across_fonts() {
        let mut assigner = CodeAssigner::new();
        let first = assigner.assign_font(&[glyph(0x0009, 500.0)]);
        let second = assigner.assign_font(&[glyph(0x1D05, 500.0)]);
        assert_eq!(first[0].character, PRIVATE_USE_START);
        assert_eq!(second[0].character, PRIVATE_USE_START);
    }

    #[test]
    fn reuse_skips_codes_taken_by_the_current_font() {
        let mut assigner = CodeAssigner::new();
        // remembers shape 500.0 at 0xE000
        assigner.assign_font(&[glyph(0x0009, 500.0)]);
        // this font already owns 0xE000, so the shape gets a fresh code
        let glyphs = assigner.assign_font(&[glyph(0xE000, 700.0), glyph(0x0009, 500.0)]);
        assert_eq!(glyphs[0].character, 0xE000);
        assert_eq!(glyphs[1].character, 0xE001);
    }

    #[test]
    fn allocator_is_monotonic_across_the_batch() {
        let mut assigner = CodeAssigner::new();
        let first = assigner.assign_font(&[glyph(0x0009, 500.0)]);
        let second = assigner.assign_font(&[glyph(0x0009, 600.0)]);
        assert_eq!(first[0].character, 0xE000);
        assert_eq!(second[0].character, 0xE001);
    }

    #[test]
    fn no_two_glyphs_of_a_font_share_a_code() {
        let mut assigner = CodeAssigner::new();
        let glyphs: Vec<SourceGlyph> = (0..8).map(|i| glyph('a' as u32, 100.0 + i as f32)).collect();
        let assigned = assigner.assign_font(&glyphs);
        let mut codes: Vec<u32> = assigned.iter().map(|g| g.character).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), assigned.len());
    }
}
