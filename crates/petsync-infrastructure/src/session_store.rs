//! Encrypted persisted session store.

use crate::crypto::SessionCipher;
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use petsync_core::error::{PetSyncError, Result};
use petsync_core::session::{SessionRecord, SessionRepository};
use std::sync::Arc;

/// Durable slot holding the encrypted session.
pub const USER_SLOT: &str = "user";

/// [`SessionRepository`] that always encrypts.
#[derive(Clone)]
pub struct EncryptedSessionStore {
    store: Arc<dyn KeyValueStore>,
    cipher: Arc<SessionCipher>,
}

impl EncryptedSessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, cipher: Arc<SessionCipher>) -> Self {
        Self { store, cipher }
    }

    async fn read_slot(&self) -> Result<Option<String>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.get(USER_SLOT))
            .await
            .map_err(|e| PetSyncError::internal(format!("Storage task failed: {e}")))?
            .map_err(PetSyncError::from)
    }
}

#[async_trait]
impl SessionRepository for EncryptedSessionStore {
    async fn save(&self, record: &SessionRecord) -> Result<()> {
        let json = serde_json::to_vec(record)?;
        let sealed = self
            .cipher
            .encrypt(&json)
            .map_err(|e| PetSyncError::security(e.to_string()))?;

        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.set(USER_SLOT, &sealed))
            .await
            .map_err(|e| PetSyncError::internal(format!("Storage task failed: {e}")))??;

        tracing::debug!(user_id = %record.user.id, "Session persisted");
        Ok(())
    }

    async fn load(&self) -> Option<SessionRecord> {
        let sealed = match self.read_slot().await {
            Ok(Some(sealed)) => sealed,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(error = %e, "Session slot unreadable");
                return None;
            }
        };

        let json = match self.cipher.decrypt(&sealed) {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!(error = %e, "Session failed to decrypt");
                return None;
            }
        };

        match serde_json::from_slice::<SessionRecord>(&json) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(error = %e, "Session payload malformed");
                None
            }
        }
    }

    async fn clear(&self) -> Result<()> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.remove(USER_SLOT))
            .await
            .map_err(|e| PetSyncError::internal(format!("Storage task failed: {e}")))??;

        tracing::debug!("Session cleared");
        Ok(())
    }
}
