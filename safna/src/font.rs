//! Font identities, metrics, and per-document font records.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::codes::CodeAssigner;
use crate::glyph::GlyphData;
use crate::MergeError;

/// Composite key for one font definition: the source-document index plus the
/// font's original identifier within that document.
///
/// Unique per font definition across the whole batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontId {
    /// Index of the source document in the batch.
    pub document: u32,
    /// The font's identifier as defined by the source document.
    pub font: u32,
}

impl FontId {
    pub const fn new(document: u32, font: u32) -> Self {
        Self { document, font }
    }
}

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.document, self.font)
    }
}

/// Vertical metrics in font-design units.
///
/// `scale` normalizes source-specific unit systems onto the output's.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub scale: f32,
}

/// One glyph of a font record: the assigned character code plus its shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontGlyph {
    pub character: u32,
    pub data: GlyphData,
}

/// A kerning adjustment between two characters.
///
/// The pipeline does not support kerning; a source font carrying any is
/// rejected before record construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KerningPair {
    pub left: u32,
    pub right: u32,
    pub adjust: f32,
}

/// One glyph as supplied by document extraction, before code assignment.
#[derive(Clone, Debug)]
pub struct SourceGlyph {
    /// The character code the source document gave this glyph.
    pub code: u32,
    /// Whether the source flagged this glyph as whitespace.
    pub whitespace: bool,
    pub data: GlyphData,
}

/// One font definition as supplied by document extraction.
#[derive(Clone, Debug)]
pub struct SourceFont {
    pub id: FontId,
    pub name: String,
    pub metrics: FontMetrics,
    /// Glyphs in ascending glyph-index order.
    pub glyphs: Vec<SourceGlyph>,
    pub kerning: Vec<KerningPair>,
}

/// One font as extracted from one source document.
///
/// Immutable once built, except that `name` and `font_file` are overwritten
/// after consolidation with the owning group's final values.
#[derive(Clone, Debug)]
pub struct FontRecord {
    pub id: FontId,
    pub name: String,
    pub metrics: FontMetrics,
    /// This record's own canonical char→shape assignments. Consolidation
    /// never rewrites these, only the shared resource identity.
    pub glyphs: Vec<FontGlyph>,
    /// Reference to the shared font file, filled in after consolidation.
    pub font_file: Option<String>,
}

impl FontRecord {
    /// Build a record from one extracted source font, resolving character
    /// codes through the batch-wide assigner.
    ///
    /// Fonts carrying kerning data are rejected; there is no partial
    /// success, the whole batch aborts.
    pub fn build(source: SourceFont, assigner: &mut CodeAssigner) -> Result<Self, MergeError> {
        if !source.kerning.is_empty() {
            return Err(MergeError::KerningNotSupported {
                id: source.id,
                name: source.name,
            });
        }
        let glyphs = assigner.assign_font(&source.glyphs);
        Ok(Self {
            id: source.id,
            name: source.name,
            metrics: source.metrics,
            glyphs,
            font_file: None,
        })
    }
}

/// The final identifier→resource mapping consumed by rendering.
///
/// Many distinct ids may reference records sharing the same `name` and
/// `font_file` while keeping their own `glyphs`.
pub type FontsMap = BTreeMap<FontId, FontRecord>;

/// Build records for a whole batch of extracted fonts.
///
/// `sources` must already be in the canonical batch order: ascending
/// document index, then tag order within each document. Code assignment is
/// a strictly sequential pass over that order, even when extraction itself
/// ran in parallel.
pub fn build_records(
    sources: Vec<SourceFont>,
    assigner: &mut CodeAssigner,
) -> Result<Vec<FontRecord>, MergeError> {
    let mut seen = HashSet::with_capacity(sources.len());
    let mut records = Vec::with_capacity(sources.len());
    for source in sources {
        if !seen.insert(source.id) {
            return Err(MergeError::DuplicateFont(source.id));
        }
        records.push(FontRecord::build(source, assigner)?);
    }
    Ok(records)
}
