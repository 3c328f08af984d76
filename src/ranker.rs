use crate::types::NewsEntry;
use std::collections::HashSet;

/// Drop duplicate entries by link. The first occurrence in input order
/// wins, so callers must hand entries over in the deterministic
/// category-then-feed traversal order.
pub fn dedupe_by_link(entries: Vec<NewsEntry>) -> Vec<NewsEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.link.clone()))
        .collect()
}

/// Deduplicate, order newest first, and return the `[offset, offset+limit)`
/// window. The sort is stable: entries with equal timestamps keep their
/// relative input order. An offset past the end yields an empty result.
pub fn rank(entries: Vec<NewsEntry>, offset: usize, limit: usize) -> Vec<NewsEntry> {
    let mut unique = dedupe_by_link(entries);
    unique.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    unique.into_iter().skip(offset).take(limit).collect()
}
