//! Pet roster cache and the selection that points into it.
//!
//! Both live in one [`PetContext`] so a roster mutation and the selection
//! reconciliation it implies happen in the same update. Callers holding the
//! context behind a single lock never observe a selection that references a
//! pet missing from the roster.

use super::model::{Pet, PetSummary};
use crate::selection::{ActivePetSelection, reconcile_selection};
use crate::types::PetId;

/// Client-side copy of the user's pets plus the active-pet selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetContext {
    roster: Vec<PetSummary>,
    /// Full profiles, populated by the detailed listing.
    pets: Vec<Pet>,
    selection: ActivePetSelection,
}

impl PetContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roster(&self) -> &[PetSummary] {
        &self.roster
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn selection(&self) -> &ActivePetSelection {
        &self.selection
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn contains(&self, id: PetId) -> bool {
        self.roster.iter().any(|pet| pet.id == id)
    }

    // ============================================================================
    // Roster mutations (each one reconciles the selection)
    // ============================================================================

    /// Replaces the roster with a fresh id/name listing.
    ///
    /// Detailed profiles of pets no longer listed are dropped.
    ///
    /// # Returns
    ///
    /// `true` when the selection changed as a result.
    pub fn set_all(&mut self, roster: Vec<PetSummary>) -> bool {
        self.pets
            .retain(|pet| roster.iter().any(|entry| entry.id == pet.id));
        self.roster = roster;
        self.reconcile()
    }

    /// Replaces both the detailed listing and the roster derived from it.
    pub fn set_pets(&mut self, pets: Vec<Pet>) -> bool {
        self.roster = pets.iter().map(Pet::summary).collect();
        self.pets = pets;
        self.reconcile()
    }

    /// Appends a newly created pet.
    pub fn add(&mut self, pet: Pet) -> bool {
        let summary = pet.summary();
        match self.roster.iter_mut().find(|entry| entry.id == summary.id) {
            Some(entry) => *entry = summary,
            None => self.roster.push(summary),
        }
        match self.pets.iter_mut().find(|existing| existing.id == pet.id) {
            Some(existing) => *existing = pet,
            None => self.pets.push(pet),
        }
        self.reconcile()
    }

    /// Replaces a pet in place by id. Unknown ids are ignored.
    pub fn update(&mut self, pet: Pet) -> bool {
        if let Some(entry) = self.roster.iter_mut().find(|entry| entry.id == pet.id) {
            *entry = pet.summary();
        }
        if let Some(existing) = self.pets.iter_mut().find(|existing| existing.id == pet.id) {
            *existing = pet;
        }
        self.reconcile()
    }

    /// Removes a pet by id without a re-fetch.
    pub fn remove(&mut self, id: PetId) -> bool {
        self.roster.retain(|entry| entry.id != id);
        self.pets.retain(|pet| pet.id != id);
        self.reconcile()
    }

    /// Empties the roster and unsets the selection.
    pub fn reset(&mut self) {
        self.roster.clear();
        self.pets.clear();
        self.selection.reset();
    }

    // ============================================================================
    // Selection
    // ============================================================================

    /// Selects a roster pet by id.
    ///
    /// # Returns
    ///
    /// `false` if the id is not in the roster; the selection is left untouched.
    pub fn select(&mut self, id: PetId) -> bool {
        match self.roster.iter().find(|entry| entry.id == id) {
            Some(entry) => {
                self.selection.select(entry.id, Some(entry.name.clone()));
                true
            }
            None => false,
        }
    }

    /// Installs a selection read back from durable storage, then reconciles it.
    pub fn restore_selection(&mut self, selection: ActivePetSelection) -> bool {
        self.selection = selection;
        self.reconcile()
    }

    fn reconcile(&mut self) -> bool {
        let next = reconcile_selection(&self.roster, &self.selection);
        let changed = next != self.selection;
        self.selection = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(id: i64, name: &str) -> Pet {
        Pet {
            id: PetId(id),
            user_id: None,
            name: name.to_string(),
            breed: "akita".to_string(),
            gender: "female".to_string(),
            weight: 20.0,
            birthday: None,
            photo: String::new(),
        }
    }

    #[test]
    fn set_all_selects_first_pet() {
        let mut context = PetContext::new();
        let changed = context.set_all(vec![
            PetSummary::new(PetId(1), "Kira"),
            PetSummary::new(PetId(2), "Nala"),
        ]);
        assert!(changed);
        assert_eq!(context.selection().id(), Some(PetId(1)));
    }

    #[test]
    fn removing_selected_pet_falls_back_in_same_update() {
        let mut context = PetContext::new();
        context.set_pets(vec![pet(1, "Kira"), pet(2, "Nala")]);
        assert!(context.select(PetId(2)));

        context.remove(PetId(2));

        assert_eq!(context.roster().len(), 1);
        assert_eq!(context.pets().len(), 1);
        assert_eq!(context.selection().id(), Some(PetId(1)));
    }

    #[test]
    fn removing_only_pet_unsets_selection() {
        let mut context = PetContext::new();
        context.add(pet(9, "Solo"));
        assert_eq!(context.selection().id(), Some(PetId(9)));

        context.remove(PetId(9));

        assert!(context.is_empty());
        assert!(context.selection().is_unset());
    }

    #[test]
    fn update_refreshes_cached_selection_name() {
        let mut context = PetContext::new();
        context.add(pet(3, "Old"));
        context.update(pet(3, "New"));
        assert_eq!(context.selection().name(), Some("New"));
        assert_eq!(context.roster()[0].name, "New");
    }

    #[test]
    fn select_rejects_unknown_ids() {
        let mut context = PetContext::new();
        context.add(pet(1, "Kira"));
        assert!(!context.select(PetId(42)));
        assert_eq!(context.selection().id(), Some(PetId(1)));
    }

    #[test]
    fn restored_selection_is_reconciled() {
        let mut context = PetContext::new();
        context.set_all(vec![PetSummary::new(PetId(5), "Rex")]);
        context.restore_selection(ActivePetSelection::Selected {
            id: PetId(77),
            name: Some("stale".to_string()),
        });
        assert_eq!(context.selection().id(), Some(PetId(5)));
    }

    #[test]
    fn reset_clears_everything() {
        let mut context = PetContext::new();
        context.add(pet(1, "Kira"));
        context.reset();
        assert_eq!(context, PetContext::default());
    }
}
