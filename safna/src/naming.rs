//! Final, globally unique names for surviving groups.

use std::collections::HashSet;

use crate::merge::FontGroup;

/// Assign each group its output name.
///
/// With `keep_font_names` the name is a slug of the group's original name,
/// falling back to the group's ordinal index when the slug comes out empty
/// and suffixing `-2`, `-3`, … on collision. Without it, the ordinal index
/// is the name. Either way every group ends up with a distinct name.
pub(crate) fn assign_names(groups: &mut [FontGroup], keep_font_names: bool) {
    let mut taken = HashSet::with_capacity(groups.len());
    for (index, group) in groups.iter_mut().enumerate() {
        let name = if keep_font_names {
            let base = slug(&group.name);
            let base = if base.is_empty() {
                index.to_string()
            } else {
                base
            };
            let mut candidate = base.clone();
            let mut suffix = 2;
            while taken.contains(&candidate) {
                candidate = format!("{base}-{suffix}");
                suffix += 1;
            }
            candidate
        } else {
            index.to_string()
        };
        taken.insert(name.clone());
        group.name = name;
    }
}

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
