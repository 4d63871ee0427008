//! Pet use case: roster loading, pet CRUD, active-pet selection and breed lookups.

use crate::auth_usecase::NOT_SIGNED_IN_MESSAGE;
use crate::dispose::DisposeGuard;
use crate::outcome::{Confirmation, SubmitOutcome, report_failure};
use crate::stores::AppStores;
use petsync_core::error::{PetSyncError, Result};
use petsync_core::forms::{DraftForm, PetForm};
use petsync_core::gateway::{ApiResponse, BreedGateway, PetGateway};
use petsync_core::notification::{Notification, Notifier};
use petsync_core::pet::{Pet, PetContext, PetDraft, PetFilter, PetSummary};
use petsync_core::selection::ActivePetSelection;
use petsync_core::session::SelectionRepository;
use petsync_core::types::{PetId, UserId};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Breed autocomplete stays quiet below this many characters.
pub const BREED_QUERY_MIN_CHARS: usize = 2;
pub const MAX_BREED_SUGGESTIONS: usize = 6;

/// Use case for the signed-in user's pets.
///
/// # Responsibilities
///
/// - Keeping the roster in [`AppStores::pets`] in sync with the backend
/// - Reconciling and persisting the active-pet selection after every roster change
/// - Pet create/update/delete with client-side validation
/// - Breed autocomplete and best-effort breed photos
///
/// # Thread Safety
///
/// Collaborators are shared through `Arc`; the breed list cache sits behind
/// its own `RwLock`.
pub struct PetUseCase {
    /// Remote pet endpoints
    pets: Arc<dyn PetGateway>,
    /// Third-party breed catalogue
    breeds: Arc<dyn BreedGateway>,
    /// Durable active-pet selection
    selections: Arc<dyn SelectionRepository>,
    /// Shared in-memory state
    stores: Arc<AppStores>,
    /// Sink for success and error notifications
    notifier: Arc<dyn Notifier>,
    /// Breed names, fetched once per use case
    breed_cache: RwLock<Option<Vec<String>>>,
    guard: DisposeGuard,
}

impl PetUseCase {
    /// Creates a new `PetUseCase`.
    ///
    /// # Arguments
    ///
    /// * `pets` - Remote pet endpoints
    /// * `breeds` - Breed catalogue used for autocomplete and photos
    /// * `selections` - Durable active-pet selection storage
    /// * `stores` - Shared in-memory state
    /// * `notifier` - Notification sink
    pub fn new(
        pets: Arc<dyn PetGateway>,
        breeds: Arc<dyn BreedGateway>,
        selections: Arc<dyn SelectionRepository>,
        stores: Arc<AppStores>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            pets,
            breeds,
            selections,
            stores,
            notifier,
            breed_cache: RwLock::new(None),
            guard: DisposeGuard::new(),
        }
    }

    pub fn dispose_guard(&self) -> DisposeGuard {
        self.guard.clone()
    }

    pub async fn roster(&self) -> Vec<PetSummary> {
        self.stores.pets.read().await.roster().to_vec()
    }

    pub async fn selection(&self) -> ActivePetSelection {
        self.stores.pets.read().await.selection().clone()
    }

    // ============================================================================
    // Loading
    // ============================================================================

    /// Reloads the id/name roster and reconciles the selection against it.
    ///
    /// A selection persisted by an earlier run is honoured when nothing is
    /// selected in memory yet.
    pub async fn refresh_roster(&self) -> SubmitOutcome<Vec<PetSummary>> {
        let Some(owner) = self.owner().await else {
            return self.fail(NOT_SIGNED_IN_MESSAGE);
        };

        let roster = match self.pets.list_pet_names(owner).await {
            ApiResponse::Success { data, .. } => data.into_vec(),
            ApiResponse::Failure { message } => return self.fail(message),
        };
        if self.guard.is_disposed() {
            return SubmitOutcome::Discarded;
        }

        tracing::debug!(count = roster.len(), "[PetUseCase] Roster refreshed");
        let listed = roster.clone();
        self.install(move |pets| {
            pets.set_all(listed);
        })
        .await;
        SubmitOutcome::Completed(roster)
    }

    /// Loads full pet profiles, replacing the roster with them.
    pub async fn list_pets(&self) -> SubmitOutcome<Vec<Pet>> {
        let Some(owner) = self.owner().await else {
            return self.fail(NOT_SIGNED_IN_MESSAGE);
        };

        let pets = match self.pets.list_pets(owner).await {
            ApiResponse::Success { data, .. } => data.into_vec(),
            ApiResponse::Failure { message } => return self.fail(message),
        };
        if self.guard.is_disposed() {
            return SubmitOutcome::Discarded;
        }

        let listed = pets.clone();
        self.install(move |context| {
            context.set_pets(listed);
        })
        .await;
        SubmitOutcome::Completed(pets)
    }

    /// Applies a roster replacement, then restores and persists the selection.
    async fn install<F>(&self, replace: F)
    where
        F: FnOnce(&mut PetContext),
    {
        let stored = if self.stores.pets.read().await.selection().is_unset() {
            self.selections.load_selection().await
        } else {
            ActivePetSelection::Unset
        };

        let selection = {
            let mut pets = self.stores.pets.write().await;
            let wanted = if stored.is_unset() {
                pets.selection().clone()
            } else {
                stored
            };
            replace(&mut *pets);
            pets.restore_selection(wanted);
            pets.selection().clone()
        };
        self.persist_selection(&selection).await;
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Creates a pet.
    ///
    /// # Returns
    ///
    /// The server's copy of the pet when it echoed one. Otherwise the roster
    /// is reloaded to learn the new id and `Completed(None)` is returned.
    pub async fn create_pet(&self, form: &PetForm) -> SubmitOutcome<Option<Pet>> {
        let Some(owner) = self.owner().await else {
            return self.fail(NOT_SIGNED_IN_MESSAGE);
        };
        let draft = match form.validate() {
            Ok(draft) => self.with_photo(draft).await,
            Err(errors) => return SubmitOutcome::Rejected(errors),
        };

        let (created, message) = match self.pets.create_pet(owner, &draft).await {
            ApiResponse::Success { data, message } => (data, message),
            ApiResponse::Failure { message } => return self.fail(message),
        };
        if self.guard.is_disposed() {
            return SubmitOutcome::Discarded;
        }

        match &created {
            Some(pet) => {
                let selection = {
                    let mut pets = self.stores.pets.write().await;
                    pets.add(pet.clone()).then(|| pets.selection().clone())
                };
                if let Some(selection) = selection {
                    self.persist_selection(&selection).await;
                }
            }
            None => match self.pets.list_pet_names(owner).await {
                ApiResponse::Success { data, .. } if !self.guard.is_disposed() => {
                    let roster = data.into_vec();
                    self.install(move |pets| {
                        pets.set_all(roster);
                    })
                    .await;
                }
                ApiResponse::Success { .. } => {}
                ApiResponse::Failure { message } => {
                    tracing::warn!(reason = %message, "[PetUseCase] Roster reload after create failed");
                }
            },
        }

        tracing::info!(name = %draft.name, "[PetUseCase] Pet created");
        self.notifier.notify(Notification::success(
            message.unwrap_or_else(|| format!("{} has been added.", draft.name)),
        ));
        SubmitOutcome::Completed(created)
    }

    pub async fn update_pet(&self, id: PetId, form: &PetForm) -> SubmitOutcome<Pet> {
        let owner = self.owner().await;
        let draft = match form.validate() {
            Ok(draft) => self.with_photo(draft).await,
            Err(errors) => return SubmitOutcome::Rejected(errors),
        };

        let message = match self.pets.update_pet(id, &draft).await {
            ApiResponse::Success { message, .. } => message,
            ApiResponse::Failure { message } => return self.fail(message),
        };
        if self.guard.is_disposed() {
            return SubmitOutcome::Discarded;
        }

        let pet = draft.into_pet(id, owner);
        let selection = {
            let mut pets = self.stores.pets.write().await;
            pets.update(pet.clone()).then(|| pets.selection().clone())
        };
        if let Some(selection) = selection {
            self.persist_selection(&selection).await;
        }

        tracing::info!(pet_id = %id, "[PetUseCase] Pet updated");
        self.notifier.notify(Notification::success(
            message.unwrap_or_else(|| format!("{} has been updated.", pet.name)),
        ));
        SubmitOutcome::Completed(pet)
    }

    /// Deletes a pet. Removing the selected pet moves the selection to the
    /// first remaining pet, or unsets it when none is left.
    pub async fn delete_pet(&self, id: PetId, confirmation: Confirmation) -> SubmitOutcome<()> {
        if !confirmation.is_confirmed() {
            return SubmitOutcome::Cancelled;
        }

        let message = match self.pets.delete_pet(id).await {
            ApiResponse::Success { message, .. } => message,
            ApiResponse::Failure { message } => return self.fail(message),
        };
        if self.guard.is_disposed() {
            return SubmitOutcome::Discarded;
        }

        let selection = {
            let mut pets = self.stores.pets.write().await;
            pets.remove(id).then(|| pets.selection().clone())
        };
        if let Some(selection) = selection {
            self.persist_selection(&selection).await;
        }

        tracing::info!(pet_id = %id, "[PetUseCase] Pet deleted");
        self.notifier.notify(Notification::success(
            message.unwrap_or_else(|| "The pet has been deleted.".to_string()),
        ));
        SubmitOutcome::Completed(())
    }

    /// Makes `id` the active pet and persists the choice.
    pub async fn select_pet(&self, id: PetId) -> Result<ActivePetSelection> {
        let selection = {
            let mut pets = self.stores.pets.write().await;
            if !pets.select(id) {
                return Err(PetSyncError::not_found("Pet", id.to_string()));
            }
            pets.selection().clone()
        };
        self.selections.save_selection(&selection).await?;
        Ok(selection)
    }

    /// Pets from the last full listing that pass `filter`.
    pub async fn filter_pets(&self, filter: &PetFilter) -> Vec<Pet> {
        let pets = self.stores.pets.read().await;
        filter.apply(pets.pets()).into_iter().cloned().collect()
    }

    // ============================================================================
    // Breeds
    // ============================================================================

    /// Case-insensitive substring matches over the breed list.
    ///
    /// Empty for short inputs or when the breed API is unavailable.
    pub async fn suggest_breeds(&self, input: &str) -> Vec<String> {
        let query = input.trim().to_lowercase();
        if query.chars().count() < BREED_QUERY_MIN_CHARS {
            return Vec::new();
        }
        let Some(breeds) = self.breed_list().await else {
            return Vec::new();
        };

        breeds
            .into_iter()
            .filter(|breed| breed.to_lowercase().contains(&query))
            .take(MAX_BREED_SUGGESTIONS)
            .collect()
    }

    /// Random photo URL for `breed`; `None` on any failure.
    pub async fn fetch_breed_photo(&self, breed: &str) -> Option<String> {
        if breed.trim().is_empty() {
            return None;
        }
        match self.breeds.random_image(breed).await {
            ApiResponse::Success { data, .. } => Some(data),
            ApiResponse::Failure { message } => {
                tracing::debug!(%breed, %message, "[PetUseCase] Breed photo unavailable");
                None
            }
        }
    }

    async fn breed_list(&self) -> Option<Vec<String>> {
        if let Some(cached) = self.breed_cache.read().await.as_ref() {
            return Some(cached.clone());
        }

        match self.breeds.list_breeds().await {
            ApiResponse::Success { data, .. } => {
                *self.breed_cache.write().await = Some(data.clone());
                Some(data)
            }
            ApiResponse::Failure { message } => {
                tracing::debug!(%message, "[PetUseCase] Breed list unavailable");
                None
            }
        }
    }

    async fn with_photo(&self, mut draft: PetDraft) -> PetDraft {
        if draft.photo.is_empty() {
            draft.photo = self
                .fetch_breed_photo(&draft.breed)
                .await
                .unwrap_or_default();
        }
        draft
    }

    async fn owner(&self) -> Option<UserId> {
        self.stores.user.read().await.id
    }

    async fn persist_selection(&self, selection: &ActivePetSelection) {
        if let Err(e) = self.selections.save_selection(selection).await {
            tracing::warn!(error = %e, "[PetUseCase] Failed to persist pet selection");
        }
    }

    fn fail<T>(&self, message: impl Into<String>) -> SubmitOutcome<T> {
        report_failure(self.notifier.as_ref(), &self.guard, message)
    }
}
