mod history_store;
mod matcher;
pub mod storage;

pub use history_store::{HISTORY_KEY, HistoryStore, MAX_HISTORY_ENTRIES};
pub use matcher::filter_recent;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
