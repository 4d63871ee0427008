//! Active-pet selection: which pet the sub-resource pages operate on.
//!
//! The selection is a weak reference into the roster. It never owns the pet
//! and must be re-derived with [`reconcile_selection`] after every roster change.

use crate::pet::PetSummary;
use crate::types::PetId;
use serde::{Deserialize, Serialize};

/// Unset, or a reference to one roster entry (id plus cached name).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ActivePetSelection {
    #[default]
    Unset,
    Selected {
        id: PetId,
        #[serde(default)]
        name: Option<String>,
    },
}

impl ActivePetSelection {
    pub fn select(&mut self, id: PetId, name: Option<String>) {
        *self = Self::Selected { id, name };
    }

    pub fn reset(&mut self) {
        *self = Self::Unset;
    }

    pub fn id(&self) -> Option<PetId> {
        match self {
            Self::Unset => None,
            Self::Selected { id, .. } => Some(*id),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Selected { name, .. } => name.as_deref(),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl From<&PetSummary> for ActivePetSelection {
    fn from(pet: &PetSummary) -> Self {
        Self::Selected {
            id: pet.id,
            name: Some(pet.name.clone()),
        }
    }
}

/// Derives the selection that is valid for `roster`.
///
/// - selected id still present: kept, with the cached name refreshed
/// - selected id gone, or nothing selected: first roster pet
/// - empty roster: `Unset`
pub fn reconcile_selection(roster: &[PetSummary], current: &ActivePetSelection) -> ActivePetSelection {
    if let Some(id) = current.id()
        && let Some(pet) = roster.iter().find(|pet| pet.id == id)
    {
        return ActivePetSelection::from(pet);
    }

    roster
        .first()
        .map(ActivePetSelection::from)
        .unwrap_or_default()
}
