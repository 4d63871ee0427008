use crate::types::{PetId, RecordId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The three per-pet sub-resources and their endpoint layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
    Feeding,
    DailyActivity,
    MedicalHistory,
}

pub const FEEDING_TYPES: &[&str] = &[
    "Dry kibble",
    "Canned wet food",
    "BARF diet (raw or cooked)",
    "Treats / snacks",
    "Home-cooked food",
    "Puppy milk",
    "Specialized food (renal, hypoallergenic, etc.)",
    "Dietary supplements",
    "Allowed fruits and vegetables",
    "Medicated food",
    "Training food",
    "Fresh water",
    "Other",
];

pub const ACTIVITY_TYPES: &[&str] = &[
    "Walk",
    "Play",
    "Training",
    "Brushing",
    "Bath",
    "Rest",
    "Socialization",
    "Other",
];

pub const MEDICAL_TYPES: &[&str] = &[
    "Vaccination",
    "General checkup",
    "Surgery",
    "Deworming",
    "Lab tests",
    "Treatment",
    "Other",
];

impl RecordKind {
    /// Human label used in notifications ("feeding", "daily activity", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Feeding => "feeding",
            Self::DailyActivity => "daily activity",
            Self::MedicalHistory => "medical history",
        }
    }

    /// Allowed values of the record's `type` field.
    pub fn catalogue(&self) -> &'static [&'static str] {
        match self {
            Self::Feeding => FEEDING_TYPES,
            Self::DailyActivity => ACTIVITY_TYPES,
            Self::MedicalHistory => MEDICAL_TYPES,
        }
    }

    /// Endpoint for creation (`POST`).
    pub fn collection_path(&self) -> &'static str {
        match self {
            Self::Feeding => "/feeding",
            Self::DailyActivity => "/daily_activity",
            Self::MedicalHistory => "/medical_history",
        }
    }

    /// Endpoint for update (`PUT`) and delete (`DELETE`).
    pub fn item_path(&self, id: RecordId) -> String {
        format!("{}/{}", self.collection_path(), id)
    }

    /// Endpoint listing every record of one pet.
    ///
    /// Daily activities use the plural segment on this route only.
    pub fn by_pet_path(&self, pet_id: PetId) -> String {
        match self {
            Self::Feeding => format!("/feeding/pet/{pet_id}"),
            Self::DailyActivity => format!("/daily_activities/pet/{pet_id}"),
            Self::MedicalHistory => format!("/medical_history/pet/{pet_id}"),
        }
    }
}
