use std::path::PathBuf;

use thiserror::Error;

use crate::history::StorageError;

#[derive(Debug, Error)]
pub enum MapSearchError {
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Recent searches unavailable: {0}")]
    Storage(#[from] StorageError),
}
