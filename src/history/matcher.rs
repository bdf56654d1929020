use super::MAX_HISTORY_ENTRIES;
use crate::places::PlaceRecord;

/// Recent searches matching the typed text.
///
/// An entry matches when its primary or secondary label contains the trimmed
/// input as a case-insensitive substring. Empty input shows everything. History
/// order is kept; there is no scoring.
pub fn filter_recent(query: &str, entries: &[PlaceRecord]) -> Vec<PlaceRecord> {
    let needle = query.trim().to_lowercase();

    entries
        .iter()
        .filter(|entry| needle.is_empty() || entry.matches(&needle))
        .take(MAX_HISTORY_ENTRIES)
        .cloned()
        .collect()
}
