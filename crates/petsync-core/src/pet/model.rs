//! Pet domain models.

use crate::types::{PetId, UserId, date_format};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Pet sex as accepted by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Gender {
    Male,
    Female,
}

/// A pet with its full profile, as listed on the home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub name: String,
    #[serde(default)]
    pub breed: String,
    /// Kept as received; compare case-insensitively.
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default, with = "date_format::option")]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub photo: String,
}

impl Pet {
    pub fn summary(&self) -> PetSummary {
        PetSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Roster entry: the id/name pair served by the pet-name listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PetSummary {
    pub id: PetId,
    pub name: String,
}

impl PetSummary {
    pub fn new(id: PetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Validated pet payload for create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetDraft {
    pub name: String,
    pub breed: String,
    pub gender: Gender,
    pub weight: f64,
    #[serde(with = "date_format")]
    pub birthday: NaiveDate,
    /// Best-effort breed photo; empty when the lookup failed.
    pub photo: String,
}

impl PetDraft {
    /// Materializes the pet the server stored, given its assigned id.
    pub fn into_pet(self, id: PetId, owner: Option<UserId>) -> Pet {
        Pet {
            id,
            user_id: owner,
            name: self.name,
            breed: self.breed,
            gender: self.gender.to_string(),
            weight: self.weight,
            birthday: Some(self.birthday),
            photo: self.photo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(Gender::Male.to_string(), "male");
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn pet_tolerates_sparse_payloads() {
        let pet: Pet = serde_json::from_str(r#"{"id": 5, "name": "Luna"}"#).unwrap();
        assert_eq!(pet.summary(), PetSummary::new(PetId(5), "Luna"));
        assert!(pet.birthday.is_none());
    }
}
