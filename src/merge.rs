//! Merging today's wallpaper into the history.
//!
//! The working set is newest-first. [`merge`] only prepends; duplicates are
//! removed later by each writer through [`distinct`], so the archive and the
//! summary apply identical dedup semantics on their own.

use crate::record::Wallpaper;
use std::collections::HashSet;

/// Put `latest` at index 0, followed by `history` unchanged.
pub fn merge(history: Vec<Wallpaper>, latest: Wallpaper) -> Vec<Wallpaper> {
    let mut merged = Vec::with_capacity(history.len() + 1);
    merged.push(latest);
    merged.extend(history);
    merged
}

/// Stable structural dedup: keep the first occurrence of each record.
pub fn distinct(records: &[Wallpaper]) -> Vec<Wallpaper> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .filter(|r| seen.insert(*r))
        .cloned()
        .collect()
}
