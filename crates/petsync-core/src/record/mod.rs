//! Per-pet sub-resources: feedings, daily activities and medical histories.
//!
//! # Module Structure
//!
//! - `kind`: Resource discriminator, endpoint layout and type catalogues
//! - `model`: Record entities and their drafts
//!
//! All three resources share one create/list/update/delete contract, captured
//! by the [`PetRecord`] trait so gateways and coordinators are written once.

mod kind;
mod model;

use crate::types::{PetId, RecordId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

// Re-export public API
pub use kind::{ACTIVITY_TYPES, FEEDING_TYPES, MEDICAL_TYPES, RecordKind};
pub use model::{
    DailyActivity, DailyActivityDraft, Feeding, FeedingDraft, MedicalHistory, MedicalHistoryDraft,
};

/// A record attached to one pet.
pub trait PetRecord: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Validated payload sent on create and update.
    type Draft: Clone + Debug + PartialEq + Send + Sync + Serialize + 'static;

    const KIND: RecordKind;

    fn id(&self) -> RecordId;

    /// Builds the local copy of a record the server accepted.
    fn from_draft(id: RecordId, pet_id: PetId, draft: Self::Draft) -> Self;

    /// Current values as a draft, used to prefill edits.
    fn to_draft(&self) -> Self::Draft;
}
