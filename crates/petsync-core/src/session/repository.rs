//! Durable session repository traits.

use async_trait::async_trait;

use super::model::SessionRecord;
use crate::error::Result;
use crate::selection::ActivePetSelection;

/// Persisted session store.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Serializes, encrypts and writes the record, replacing any previous one.
    async fn save(&self, record: &SessionRecord) -> Result<()>;

    /// Reads the current record.
    ///
    /// Missing, undecryptable or malformed data all read as `None`.
    async fn load(&self) -> Option<SessionRecord>;

    async fn clear(&self) -> Result<()>;
}

/// Durable copy of the active-pet selection.
#[async_trait]
pub trait SelectionRepository: Send + Sync {
    async fn save_selection(&self, selection: &ActivePetSelection) -> Result<()>;

    /// Unreadable data reads as `Unset`.
    async fn load_selection(&self) -> ActivePetSelection;

    async fn clear_selection(&self) -> Result<()>;
}
