//! Durable key-value slots.
//!
//! # Module Structure
//!
//! - `json_file`: One JSON object on disk, rewritten atomically
//! - `memory`: Process-local map for tests and ephemeral sessions
//!
//! The interface is synchronous; async callers wrap it in
//! `tokio::task::spawn_blocking`.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use petsync_core::error::PetSyncError;

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug)]
pub enum StorageError {
    /// File I/O error.
    Io(std::io::Error),
    /// Stored file is not a JSON object of strings.
    Json(serde_json::Error),
    /// Internal lock was poisoned by a panicking writer.
    Lock(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {}", e),
            StorageError::Json(e) => write!(f, "JSON error: {}", e),
            StorageError::Lock(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

impl From<StorageError> for PetSyncError {
    fn from(e: StorageError) -> Self {
        PetSyncError::storage(e.to_string())
    }
}

/// String slots addressed by fixed keys.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
