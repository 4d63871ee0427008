//! Plaintext persistence of the active-pet selection.

use crate::storage::KeyValueStore;
use async_trait::async_trait;
use petsync_core::error::{PetSyncError, Result};
use petsync_core::selection::ActivePetSelection;
use petsync_core::session::SelectionRepository;
use petsync_core::types::PetId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Durable slot holding the selection.
pub const SELECTED_PET_SLOT: &str = "selectedPet";

/// Stored shape: `{"id": 3, "name": "Kira"}`. `Unset` removes the slot.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSelection {
    id: PetId,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Clone)]
pub struct SelectionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SelectionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SelectionRepository for SelectionStore {
    async fn save_selection(&self, selection: &ActivePetSelection) -> Result<()> {
        let stored = match selection {
            ActivePetSelection::Unset => return self.clear_selection().await,
            ActivePetSelection::Selected { id, name } => StoredSelection {
                id: *id,
                name: name.clone(),
            },
        };
        let json = serde_json::to_string(&stored)?;

        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.set(SELECTED_PET_SLOT, &json))
            .await
            .map_err(|e| PetSyncError::internal(format!("Storage task failed: {e}")))??;
        Ok(())
    }

    async fn load_selection(&self) -> ActivePetSelection {
        let store = self.store.clone();
        let raw = match tokio::task::spawn_blocking(move || store.get(SELECTED_PET_SLOT)).await {
            Ok(Ok(Some(raw))) => raw,
            Ok(Ok(None)) => return ActivePetSelection::Unset,
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Selection slot unreadable");
                return ActivePetSelection::Unset;
            }
            Err(e) => {
                tracing::debug!(error = %e, "Storage task failed");
                return ActivePetSelection::Unset;
            }
        };

        match serde_json::from_str::<StoredSelection>(&raw) {
            Ok(stored) => ActivePetSelection::Selected {
                id: stored.id,
                name: stored.name,
            },
            Err(e) => {
                tracing::debug!(error = %e, "Selection payload malformed");
                ActivePetSelection::Unset
            }
        }
    }

    async fn clear_selection(&self) -> Result<()> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.remove(SELECTED_PET_SLOT))
            .await
            .map_err(|e| PetSyncError::internal(format!("Storage task failed: {e}")))??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn selection_round_trips_as_plain_json() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = SelectionStore::new(kv.clone());
        let selection = ActivePetSelection::Selected {
            id: PetId(3),
            name: Some("Kira".to_string()),
        };

        store.save_selection(&selection).await.unwrap();

        assert_eq!(
            kv.get(SELECTED_PET_SLOT).unwrap().as_deref(),
            Some(r#"{"id":3,"name":"Kira"}"#)
        );
        assert_eq!(store.load_selection().await, selection);
    }

    #[tokio::test]
    async fn unset_removes_the_slot() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = SelectionStore::new(kv.clone());
        kv.set(SELECTED_PET_SLOT, r#"{"id":1}"#).unwrap();

        store.save_selection(&ActivePetSelection::Unset).await.unwrap();

        assert_eq!(kv.get(SELECTED_PET_SLOT).unwrap(), None);
        assert!(store.load_selection().await.is_unset());
    }

    #[tokio::test]
    async fn malformed_selection_reads_as_unset() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        kv.set(SELECTED_PET_SLOT, "{broken").unwrap();
        assert!(SelectionStore::new(kv).load_selection().await.is_unset());
    }
}
