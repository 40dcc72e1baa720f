//! Consolidating subsetted document fonts into shared font resources.
//!
//! A batch of converted documents each carries its own subsetted fonts,
//! often near-identical subsets of the same face. Emitting one output font
//! per source definition bloats the final artifact; this crate instead
//! groups compatible fonts across the whole batch into the smallest set of
//! shared resources it can find, reassigns conflicting character codes
//! deterministically, and gives every surviving group a stable,
//! collision-free name.
//!
//! The pipeline, leaf to root:
//! - [`build_records`] turns extracted [`SourceFont`]s into [`FontRecord`]s,
//!   running the batch-wide [`CodeAssigner`] over every glyph in a single
//!   deterministic sequence.
//! - [`consolidate`] coarsens the records into named [`FontGroup`]s (or
//!   passes them through untouched when grouping is disabled).
//! - An external builder materializes one binary font per group, and
//!   [`ConsolidatedFonts::into_fonts_map`] projects the group identities
//!   back onto the per-font records for rendering.
//!
//! The engine is synchronous and in-memory: no I/O, no locking, no CLI.

#![forbid(unsafe_code)]

mod codes;
mod font;
mod glyph;
mod merge;
mod naming;
mod ungroup;

pub use codes::{CodeAssigner, PRIVATE_USE_START};
pub use font::{
    build_records, FontGlyph, FontId, FontMetrics, FontRecord, FontsMap, KerningPair, SourceFont,
    SourceGlyph,
};
pub use glyph::{GlyphData, Outline, PathCommand, WHITESPACE_ADVANCE};
pub use merge::FontGroup;

use thiserror::Error;

/// Batch-level configuration, read-only for the duration of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeOptions {
    /// Merge compatible fonts into shared groups. When false the merger is
    /// a no-op and every record keeps a group of its own.
    pub group_fonts: bool,
    /// Derive output names from the source font names instead of ordinal
    /// indices.
    pub keep_font_names: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            group_fonts: true,
            keep_font_names: true,
        }
    }
}

/// Unsupported-input errors, raised before records reach the merger.
///
/// There is no partial-success mode: any of these aborts the whole batch.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("font '{name}' ({id}) carries kerning data, which is not supported")]
    KerningNotSupported { id: FontId, name: String },

    #[error("duplicate font definition {0}")]
    DuplicateFont(FontId),
}

/// The named groups surviving consolidation, ready for font-file building.
///
/// Groups are handed to the external font-file builder in order; once each
/// has a file, [`Self::into_fonts_map`] produces the final id→record map.
pub struct ConsolidatedFonts {
    records: Vec<FontRecord>,
    groups: Vec<FontGroup>,
}

impl ConsolidatedFonts {
    /// The ordered, named groups. One output font file is built per entry.
    pub fn groups(&self) -> &[FontGroup] {
        &self.groups
    }

    /// Write each group's name and font-file reference onto its member
    /// records and flatten the batch into the final [`FontsMap`].
    ///
    /// `font_file` maps a group to the file reference the external builder
    /// produced for it.
    pub fn into_fonts_map<F>(self, font_file: F) -> FontsMap
    where
        F: FnMut(&FontGroup) -> String,
    {
        ungroup::ungroup(&self.groups, self.records, font_file)
    }
}

/// Consolidate a batch of font records into named groups.
///
/// Takes ownership of the records: they become the arena the groups index
/// into, and come back out through [`ConsolidatedFonts::into_fonts_map`].
pub fn consolidate(records: Vec<FontRecord>, options: &MergeOptions) -> ConsolidatedFonts {
    let mut groups = if options.group_fonts {
        merge::group_fonts(&records)
    } else {
        merge::singleton_groups(&records)
    };
    log::info!(
        "consolidated {} fonts into {} shared resources",
        records.len(),
        groups.len()
    );
    naming::assign_names(&mut groups, options.keep_font_names);
    ConsolidatedFonts { records, groups }
}
