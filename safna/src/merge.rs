//! Grouping compatible font records into shared aggregates.
//!
//! Clustering is greedy and order-dependent: each group is merged into the
//! first compatible group already scanned, and a full pass is repeated until
//! it stops reducing the group count. A merge early in the list can newly
//! enable one later in the list, so a single pass is not enough. The result
//! is not claimed to be the globally minimal grouping; determinism comes
//! from the fixed input order.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::font::{FontMetrics, FontRecord};
use crate::glyph::GlyphData;

/// A consolidation unit: one or more compatible font records that will
/// share one output font resource.
///
/// Members are indices into the batch's record arena; merging moves indices
/// between groups, never records. A group only ever grows.
#[derive(Clone, Debug)]
pub struct FontGroup {
    pub(crate) name: String,
    pub(crate) metrics: FontMetrics,
    pub(crate) members: Vec<usize>,
    pub(crate) char_map: BTreeMap<u32, GlyphData>,
}

impl FontGroup {
    fn singleton(index: usize, record: &FontRecord) -> Self {
        let mut char_map = BTreeMap::new();
        for glyph in &record.glyphs {
            char_map.insert(glyph.character, glyph.data.clone());
        }
        Self {
            name: record.name.clone(),
            metrics: record.metrics,
            members: vec![index],
            char_map,
        }
    }

    /// The group's assigned name (final once the namer has run).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// Number of records sharing this resource.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// The union char→shape map, the content of the output font resource.
    pub fn chars(&self) -> impl Iterator<Item = (u32, &GlyphData)> + '_ {
        self.char_map.iter().map(|(&code, data)| (code, data))
    }

    /// Whether `other` can merge into `self` without changing any
    /// character's rendered shape.
    ///
    /// Every character present in both maps must carry equal shapes; one
    /// mismatch is disqualifying, unconditionally. With `require_common`
    /// the groups must also overlap in at least one character; without it,
    /// disjoint groups merge as pure consolidation.
    fn compatible(&self, other: &Self, require_common: bool) -> bool {
        let (small, large) = if self.char_map.len() <= other.char_map.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut common = false;
        for (code, data) in &small.char_map {
            match large.char_map.get(code) {
                Some(existing) if existing == data => common = true,
                Some(_) => return false,
                None => {}
            }
        }
        common || !require_common
    }

    /// Merge `other` into `self`. Only called after `compatible` approved
    /// the pair; a conflicting union here is an internal-consistency
    /// failure, not a recoverable condition.
    fn absorb(&mut self, other: FontGroup) {
        for (code, data) in other.char_map {
            match self.char_map.entry(code) {
                Entry::Occupied(entry) => {
                    assert!(
                        *entry.get() == data,
                        "merge produced conflicting shapes for U+{code:04X}"
                    );
                }
                Entry::Vacant(entry) => {
                    entry.insert(data);
                }
            }
        }
        self.members.extend(other.members);
    }
}

/// One singleton group per record, in record order.
pub(crate) fn singleton_groups(records: &[FontRecord]) -> Vec<FontGroup> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| FontGroup::singleton(index, record))
        .collect()
}

/// Coarsen the batch's records into the smallest set of mutually
/// compatible groups.
///
/// Phase 1 works within each original font name and requires merged groups
/// to overlap in at least one character. Phase 2 runs globally without that
/// requirement, catching shape-identical fonts the sources named
/// differently and folding disjoint subsets together.
pub(crate) fn group_fonts(records: &[FontRecord]) -> Vec<FontGroup> {
    let mut by_name: IndexMap<&str, Vec<FontGroup>> = IndexMap::new();
    for (index, record) in records.iter().enumerate() {
        by_name
            .entry(record.name.as_str())
            .or_default()
            .push(FontGroup::singleton(index, record));
    }
    let partitions = by_name.len();

    let mut groups = Vec::with_capacity(records.len());
    for (_, partition) in by_name {
        groups.extend(coalesce(partition, true));
    }
    log::debug!(
        "phase 1: {} fonts in {} name partitions -> {} groups",
        records.len(),
        partitions,
        groups.len()
    );

    let groups = coalesce(groups, false);
    log::debug!("phase 2: -> {} groups", groups.len());
    groups
}

/// Scan-and-merge, iterated to fixpoint.
fn coalesce(mut groups: Vec<FontGroup>, require_common: bool) -> Vec<FontGroup> {
    loop {
        let before = groups.len();
        let mut merged: Vec<FontGroup> = Vec::with_capacity(before);
        for group in groups {
            match merged
                .iter_mut()
                .find(|host| host.compatible(&group, require_common))
            {
                Some(host) => host.absorb(group),
                None => merged.push(group),
            }
        }
        if merged.len() == before {
            return merged;
        }
        groups = merged;
    }
}
