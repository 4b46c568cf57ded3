//! Tag parsing and normalization.
//!
//! Free-form input such as `work, errands` or `#work #errands` becomes a
//! canonical list of lowercase tokens in first-occurrence order.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static TAG_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\s]+").expect("valid tag separator regex"));

/// Parses raw tag input into normalized tokens.
///
/// Rules:
/// - every `#` is treated as a separator;
/// - tokens are split on runs of commas/whitespace;
/// - tokens are trimmed and lowercased, empty ones dropped;
/// - duplicates are removed keeping the first occurrence.
pub fn parse_tags(input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }

    let cleaned = input.replace('#', " ");
    dedup_normalized(TAG_SEPARATOR_RE.split(&cleaned))
}

/// Normalizes an already-split tag list.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    dedup_normalized(tags.iter().map(|tag| tag.as_ref()))
}

/// Normalizes one tag value, returning `None` when it is blank.
pub fn normalize_tag(value: &str) -> Option<String> {
    let normalized = value.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

fn dedup_normalized<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .filter_map(normalize_tag)
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}
