use std::collections::HashSet;

use super::storage::{KeyValueStore, StorageError};
use crate::places::PlaceRecord;

/// Maximum number of recent searches kept
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// Storage key holding the serialized recent-searches list
pub const HISTORY_KEY: &str = "recent_searches";

/// Recent searches: most recent first, unique by place id, at most
/// [`MAX_HISTORY_ENTRIES`] long.
///
/// The in-memory list is the one the UI reads. Writes update it first and then
/// persist, so a failed write costs durability but never the current session.
pub struct HistoryStore {
    storage: Box<dyn KeyValueStore>,
    key: String,
    entries: Vec<PlaceRecord>,
}

impl HistoryStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, HISTORY_KEY)
    }

    pub fn with_key(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            entries: Vec::new(),
        }
    }

    /// Replaces the in-memory list with the persisted one.
    ///
    /// Nothing persisted, unreadable or unparsable data all yield an empty list.
    pub fn load(&mut self) -> &[PlaceRecord] {
        self.entries = match self.read_persisted() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Failed to load recent searches, starting empty: {}", e);
                Vec::new()
            }
        };
        &self.entries
    }

    pub fn entries(&self) -> &[PlaceRecord] {
        &self.entries
    }

    /// Records a selection: drop any entry with the same id, prepend, cap, persist.
    ///
    /// The in-memory list is updated even when persisting fails; the error is
    /// returned for the caller to report.
    pub fn append(&mut self, record: PlaceRecord) -> Result<&[PlaceRecord], StorageError> {
        push_recent(&mut self.entries, record);
        self.persist()?;
        Ok(&self.entries)
    }

    fn read_persisted(&self) -> Result<Vec<PlaceRecord>, StorageError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(Vec::new());
        };
        let entries: Vec<PlaceRecord> = serde_json::from_str(&raw)?;
        Ok(normalize(entries))
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(&self.entries)?;
        self.storage.set(&self.key, &serialized)
    }
}

/// Moves `record` to the front, replacing any entry with the same id, and caps the list.
fn push_recent(entries: &mut Vec<PlaceRecord>, record: PlaceRecord) {
    entries.retain(|e| e.id != record.id);
    entries.insert(0, record);
    entries.truncate(MAX_HISTORY_ENTRIES);
}

/// Removes duplicate ids, keeping the first occurrence, and trims to the maximum.
fn normalize(entries: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.id.clone()))
        .take(MAX_HISTORY_ENTRIES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryStore;
    use crate::places::PlaceSuggestion;
    use proptest::prelude::*;

    fn record(id: &str) -> PlaceRecord {
        PlaceRecord::from(PlaceSuggestion::new(id, format!("Place {id}"), "Somewhere"))
    }

    fn ids(entries: &[PlaceRecord]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    fn store_with(memory: &MemoryStore) -> HistoryStore {
        let mut store = HistoryStore::new(Box::new(memory.clone()));
        store.load();
        store
    }

    #[test]
    fn test_load_empty_when_nothing_persisted() {
        let memory = MemoryStore::new();
        let mut store = HistoryStore::new(Box::new(memory));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_append_then_load_returns_record() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);

        let p2 = PlaceRecord {
            id: "p2".to_string(),
            primary_label: String::new(),
            secondary_label: String::new(),
            latitude: None,
            longitude: None,
        };
        store.append(p2.clone()).unwrap();

        let mut reloaded = HistoryStore::new(Box::new(memory));
        assert_eq!(reloaded.load(), &[p2]);
    }

    #[test]
    fn test_append_same_id_moves_to_front() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);
        store.append(record("a")).unwrap();
        store.append(record("b")).unwrap();
        store.append(record("c")).unwrap();

        store.append(record("a")).unwrap();

        assert_eq!(ids(store.entries()), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_append_same_id_twice_keeps_length() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);
        store.append(record("a")).unwrap();
        store.append(record("b")).unwrap();
        let before = store.entries().len();

        store.append(record("b")).unwrap();

        assert_eq!(store.entries().len(), before);
        assert_eq!(store.entries()[0].id, "b");
    }

    #[test]
    fn test_append_replaces_stale_copy() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);
        store.append(record("a")).unwrap();

        let mut updated = record("a");
        updated.primary_label = "Renamed".to_string();
        store.append(updated).unwrap();

        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].primary_label, "Renamed");
    }

    #[test]
    fn test_persisted_format_is_json_array() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);
        store.append(record("a")).unwrap();

        let raw = memory.raw(HISTORY_KEY).unwrap();
        assert_eq!(
            raw,
            r#"[{"id":"a","primaryLabel":"Place a","secondaryLabel":"Somewhere"}]"#
        );
    }

    #[test]
    fn test_custom_key() {
        let memory = MemoryStore::new();
        let mut store = HistoryStore::with_key(Box::new(memory.clone()), "other");
        store.append(record("a")).unwrap();
        assert!(memory.raw("other").is_some());
        assert!(memory.raw(HISTORY_KEY).is_none());
    }

    #[test]
    fn test_load_malformed_data_is_empty() {
        let mut memory = MemoryStore::new();
        memory.set(HISTORY_KEY, "{not json").unwrap();
        let mut store = HistoryStore::new(Box::new(memory));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_normalizes_duplicates_and_overflow() {
        let mut memory = MemoryStore::new();
        let mut persisted: Vec<PlaceRecord> = (0..15).map(|i| record(&i.to_string())).collect();
        persisted.insert(1, record("0"));
        memory
            .set(HISTORY_KEY, &serde_json::to_string(&persisted).unwrap())
            .unwrap();

        let mut store = HistoryStore::new(Box::new(memory));
        let loaded = store.load();

        assert_eq!(loaded.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(
            ids(loaded),
            vec!["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]
        );
    }

    #[test]
    fn test_failed_write_still_updates_memory() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);
        memory.set_reject_writes(true);

        let result = store.append(record("a"));

        assert!(result.is_err());
        assert_eq!(ids(store.entries()), vec!["a"]);
        assert!(memory.raw(HISTORY_KEY).is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_history_bounded_and_unique(appends in prop::collection::vec(0u8..30, 0..60)) {
            let memory = MemoryStore::new();
            let mut store = store_with(&memory);

            for id in &appends {
                store.append(record(&id.to_string())).unwrap();
            }

            let entries = store.entries();
            prop_assert!(entries.len() <= MAX_HISTORY_ENTRIES);

            let unique: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
            prop_assert_eq!(unique.len(), entries.len());

            if let Some(last) = appends.last() {
                prop_assert_eq!(&entries[0].id, &last.to_string());
            }

            // What was persisted is what is in memory
            let mut reloaded = HistoryStore::new(Box::new(memory));
            prop_assert_eq!(reloaded.load(), entries);
        }
    }
}
