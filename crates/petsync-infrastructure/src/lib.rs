//! Infrastructure layer: durable storage, the session cipher and configuration.
//!
//! # Module Structure
//!
//! - `paths`: File locations under the PetSync config directory
//! - `storage`: Key-value slots (JSON file, in-memory)
//! - `crypto`: AES-256-GCM session cipher
//! - `session_store`: Encrypted [`SessionRepository`](petsync_core::session::SessionRepository)
//! - `selection_store`: Plaintext [`SelectionRepository`](petsync_core::session::SelectionRepository)
//! - `config`: `config.toml` plus environment overrides

pub mod config;
pub mod crypto;
pub mod paths;
pub mod selection_store;
pub mod session_store;
pub mod storage;

pub use config::{AppConfig, ConfigFile};
pub use crypto::{CipherError, SessionCipher};
pub use paths::{PathError, PetSyncPaths};
pub use selection_store::{SELECTED_PET_SLOT, SelectionStore};
pub use session_store::{EncryptedSessionStore, USER_SLOT};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
