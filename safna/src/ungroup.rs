//! Projecting merged groups back onto per-font records.

use crate::font::{FontRecord, FontsMap};
use crate::merge::FontGroup;

/// Write each group's final name and font-file reference onto every member
/// record, then flatten the arena into the id→record map.
///
/// `font_file` supplies the file reference the external builder produced
/// for a group. Records keep their own glyph sequences; only the shared
/// resource identity is unified.
pub(crate) fn ungroup<F>(
    groups: &[FontGroup],
    mut records: Vec<FontRecord>,
    mut font_file: F,
) -> FontsMap
where
    F: FnMut(&FontGroup) -> String,
{
    for group in groups {
        let file = font_file(group);
        for &member in &group.members {
            let record = &mut records[member];
            record.name = group.name.clone();
            record.font_file = Some(file.clone());
        }
    }
    records.into_iter().map(|record| (record.id, record)).collect()
}
