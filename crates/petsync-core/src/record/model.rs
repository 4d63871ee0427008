//! Sub-resource records and their create/update payloads.
//!
//! The backend names the catalogue field `type`; it is `kind` on the Rust side.

use super::{PetRecord, RecordKind};
use crate::types::{PetId, RecordId, date_format};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Feeding
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feeding {
    pub id: RecordId,
    #[serde(default)]
    pub pet_id: Option<PetId>,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    /// Grams.
    pub quantity: u32,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedingDraft {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub quantity: u32,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

impl PetRecord for Feeding {
    type Draft = FeedingDraft;
    const KIND: RecordKind = RecordKind::Feeding;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, pet_id: PetId, draft: FeedingDraft) -> Self {
        Self {
            id,
            pet_id: Some(pet_id),
            kind: draft.kind,
            description: draft.description,
            quantity: draft.quantity,
            date: draft.date,
        }
    }

    fn to_draft(&self) -> FeedingDraft {
        FeedingDraft {
            kind: self.kind.clone(),
            description: self.description.clone(),
            quantity: self.quantity,
            date: self.date,
        }
    }
}

// ============================================================================
// Daily activity
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub id: RecordId,
    #[serde(default)]
    pub pet_id: Option<PetId>,
    #[serde(rename = "type")]
    pub kind: String,
    /// Minutes.
    pub duration: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActivityDraft {
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: u32,
    pub notes: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

impl PetRecord for DailyActivity {
    type Draft = DailyActivityDraft;
    const KIND: RecordKind = RecordKind::DailyActivity;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, pet_id: PetId, draft: DailyActivityDraft) -> Self {
        Self {
            id,
            pet_id: Some(pet_id),
            kind: draft.kind,
            duration: draft.duration,
            notes: draft.notes,
            date: draft.date,
        }
    }

    fn to_draft(&self) -> DailyActivityDraft {
        DailyActivityDraft {
            kind: self.kind.clone(),
            duration: self.duration,
            notes: self.notes.clone(),
            date: self.date,
        }
    }
}

// ============================================================================
// Medical history
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalHistory {
    pub id: RecordId,
    #[serde(default)]
    pub pet_id: Option<PetId>,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicalHistoryDraft {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

impl PetRecord for MedicalHistory {
    type Draft = MedicalHistoryDraft;
    const KIND: RecordKind = RecordKind::MedicalHistory;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, pet_id: PetId, draft: MedicalHistoryDraft) -> Self {
        Self {
            id,
            pet_id: Some(pet_id),
            kind: draft.kind,
            description: draft.description,
            date: draft.date,
        }
    }

    fn to_draft(&self) -> MedicalHistoryDraft {
        MedicalHistoryDraft {
            kind: self.kind.clone(),
            description: self.description.clone(),
            date: self.date,
        }
    }
}
