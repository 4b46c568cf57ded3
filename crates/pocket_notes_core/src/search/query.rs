//! In-memory note query engine.
//!
//! # Responsibility
//! - Filter notes by free-text search and active tag.
//! - Derive the sorted tag vocabulary for filter chips.
//!
//! # Invariants
//! - Filters apply in fixed order: text, then tag, then newest-first sort.
//! - Sorting is stable, so equal timestamps keep collection order.

use crate::model::note::Note;
use std::collections::BTreeSet;

/// Returns notes matching `search` and `active_tag`, newest first.
///
/// A blank `search` matches every note. Matching is a case-insensitive
/// substring test against the trimmed query.
pub fn visible_notes(all: &[Note], search: &str, active_tag: Option<&str>) -> Vec<Note> {
    let query = search.trim().to_lowercase();

    let mut visible = all
        .iter()
        .filter(|note| query.is_empty() || note.text.to_lowercase().contains(query.as_str()))
        .filter(|note| active_tag.map_or(true, |tag| note.has_tag(tag)))
        .cloned()
        .collect::<Vec<_>>();

    visible.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    visible
}

/// Returns the union of all note tags, deduplicated and sorted ascending.
pub fn distinct_tags(all: &[Note]) -> Vec<String> {
    all.iter()
        .flat_map(|note| note.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
