//! One coordinator for every per-pet record kind.

use crate::dispose::DisposeGuard;
use crate::outcome::{Confirmation, SubmitOutcome, report_failure};
use crate::stores::AppStores;
use petsync_core::forms::DraftForm;
use petsync_core::gateway::{ApiResponse, RecordGateway, RecordList};
use petsync_core::notification::{Notification, Notifier};
use petsync_core::record::PetRecord;
use petsync_core::types::{PetId, RecordId};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const NO_PET_SELECTED_MESSAGE: &str = "Select a pet first.";

/// What a record page shows after a refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordView<R> {
    /// The user has no pets, so there is nothing to list records for.
    NoPets,
    /// The selected pet has no records. `detail` carries the server's wording
    /// when it answered with a soft not-found.
    Empty { detail: Option<String> },
    Records(Vec<R>),
    Error(String),
}

#[derive(Debug)]
struct LoadedRecords<R> {
    pet_id: Option<PetId>,
    records: Vec<R>,
}

/// Create/edit/delete and listing for one record kind of the selected pet.
///
/// Records are kept in a local list owned by the coordinator and are always
/// scoped to the pet selected in [`AppStores::pets`] at call time.
pub struct RecordCoordinator<R: PetRecord> {
    /// Remote endpoints for this record kind
    gateway: Arc<dyn RecordGateway<R>>,
    /// Shared in-memory state (read for the active pet)
    stores: Arc<AppStores>,
    /// Sink for success and error notifications
    notifier: Arc<dyn Notifier>,
    loaded: RwLock<LoadedRecords<R>>,
    guard: DisposeGuard,
}

impl<R: PetRecord> RecordCoordinator<R> {
    pub fn new(
        gateway: Arc<dyn RecordGateway<R>>,
        stores: Arc<AppStores>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            stores,
            notifier,
            loaded: RwLock::new(LoadedRecords {
                pet_id: None,
                records: Vec::new(),
            }),
            guard: DisposeGuard::new(),
        }
    }

    pub fn dispose_guard(&self) -> DisposeGuard {
        self.guard.clone()
    }

    /// Local copy of the records of the selected pet.
    ///
    /// Empty when the list was loaded for a pet that is no longer selected.
    pub async fn records(&self) -> Vec<R> {
        let selected = self.selected_pet().await;
        let loaded = self.loaded.read().await;
        if selected.is_some() && loaded.pet_id == selected {
            loaded.records.clone()
        } else {
            Vec::new()
        }
    }

    /// Pet the local list belongs to, if any refresh has run.
    pub async fn loaded_for(&self) -> Option<PetId> {
        self.loaded.read().await.pet_id
    }

    pub async fn find(&self, id: RecordId) -> Option<R> {
        self.records()
            .await
            .into_iter()
            .find(|record| record.id() == id)
    }

    /// Reloads the records of the selected pet.
    pub async fn refresh(&self) -> RecordView<R> {
        self.load(true).await
    }

    /// Fetches the selected pet's records; `notify` raises an error
    /// notification when the list cannot be loaded.
    async fn load(&self, notify: bool) -> RecordView<R> {
        let Some(pet_id) = self.selected_pet().await else {
            self.replace(None, Vec::new()).await;
            return RecordView::NoPets;
        };

        let response = self.gateway.list_records(pet_id).await;
        let (records, view) = match response {
            ApiResponse::Success {
                data: RecordList::Found(records),
                ..
            } if records.is_empty() => (Vec::new(), RecordView::Empty { detail: None }),
            ApiResponse::Success {
                data: RecordList::Found(records),
                ..
            } => (records.clone(), RecordView::Records(records)),
            ApiResponse::Success {
                data: RecordList::NotFound { detail },
                ..
            } => (Vec::new(), RecordView::Empty { detail }),
            ApiResponse::Failure { message } => {
                if notify && !self.guard.is_disposed() {
                    self.notifier.notify(Notification::error(message.clone()));
                }
                return RecordView::Error(message);
            }
        };

        if !self.guard.is_disposed() {
            self.replace(Some(pet_id), records).await;
        }
        view
    }

    /// Creates a record for the selected pet and appends it to the local list.
    ///
    /// When the server does not echo the stored record, a provisional copy is
    /// appended and the list is reloaded to pick up the real id.
    pub async fn create<F>(&self, form: &F) -> SubmitOutcome<R>
    where
        F: DraftForm<Draft = R::Draft>,
    {
        let Some(pet_id) = self.align().await else {
            return self.fail(NO_PET_SELECTED_MESSAGE);
        };
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => return SubmitOutcome::Rejected(errors),
        };

        let (echoed, message) = match self.gateway.create_record(pet_id, &draft).await {
            ApiResponse::Success { data, message } => (data, message),
            ApiResponse::Failure { message } => return self.fail(message),
        };
        if self.guard.is_disposed() {
            return SubmitOutcome::Discarded;
        }

        let record = match echoed {
            Some(record) => {
                self.push(pet_id, record.clone()).await;
                record
            }
            None => {
                let provisional = R::from_draft(RecordId::PROVISIONAL, pet_id, draft);
                self.push(pet_id, provisional.clone()).await;
                if let RecordView::Error(reason) = self.load(false).await {
                    tracing::warn!(%reason, kind = R::KIND.label(), "[RecordCoordinator] Reload after create failed");
                }
                provisional
            }
        };

        tracing::info!(kind = R::KIND.label(), pet_id = %pet_id, "[RecordCoordinator] Record created");
        self.notifier.notify(Notification::success(
            message.unwrap_or_else(|| format!("The {} has been saved.", R::KIND.label())),
        ));
        SubmitOutcome::Completed(record)
    }

    /// Updates a record and replaces it in place.
    pub async fn edit<F>(&self, id: RecordId, form: &F) -> SubmitOutcome<R>
    where
        F: DraftForm<Draft = R::Draft>,
    {
        let Some(pet_id) = self.align().await else {
            return self.fail(NO_PET_SELECTED_MESSAGE);
        };
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => return SubmitOutcome::Rejected(errors),
        };

        let message = match self.gateway.update_record(id, &draft).await {
            ApiResponse::Success { message, .. } => message,
            ApiResponse::Failure { message } => return self.fail(message),
        };
        if self.guard.is_disposed() {
            return SubmitOutcome::Discarded;
        }

        let record = R::from_draft(id, pet_id, draft);
        {
            let mut loaded = self.loaded.write().await;
            if loaded.pet_id == Some(pet_id)
                && let Some(existing) = loaded.records.iter_mut().find(|existing| existing.id() == id)
            {
                *existing = record.clone();
            }
        }

        tracing::info!(kind = R::KIND.label(), record_id = %id, "[RecordCoordinator] Record updated");
        self.notifier.notify(Notification::success(
            message.unwrap_or_else(|| format!("The {} has been updated.", R::KIND.label())),
        ));
        SubmitOutcome::Completed(record)
    }

    pub async fn delete(&self, id: RecordId, confirmation: Confirmation) -> SubmitOutcome<()> {
        if !confirmation.is_confirmed() {
            return SubmitOutcome::Cancelled;
        }
        self.align().await;

        let message = match self.gateway.delete_record(id).await {
            ApiResponse::Success { message, .. } => message,
            ApiResponse::Failure { message } => return self.fail(message),
        };
        if self.guard.is_disposed() {
            return SubmitOutcome::Discarded;
        }

        self.loaded
            .write()
            .await
            .records
            .retain(|record| record.id() != id);

        tracing::info!(kind = R::KIND.label(), record_id = %id, "[RecordCoordinator] Record deleted");
        self.notifier.notify(Notification::success(
            message.unwrap_or_else(|| format!("The {} has been deleted.", R::KIND.label())),
        ));
        SubmitOutcome::Completed(())
    }

    /// Drops the local list when it belongs to a pet other than the selected
    /// one, so mutations never mix records of two pets.
    async fn align(&self) -> Option<PetId> {
        let selected = self.selected_pet().await;
        let mut loaded = self.loaded.write().await;
        if loaded.pet_id != selected {
            tracing::debug!(
                kind = R::KIND.label(),
                loaded = ?loaded.pet_id,
                selected = ?selected,
                "[RecordCoordinator] Selection moved, dropping local records"
            );
            loaded.pet_id = selected;
            loaded.records.clear();
        }
        selected
    }

    async fn selected_pet(&self) -> Option<PetId> {
        self.stores.pets.read().await.selection().id()
    }

    /// Appends to the local list if it still belongs to `pet_id`.
    async fn push(&self, pet_id: PetId, record: R) {
        let mut loaded = self.loaded.write().await;
        if loaded.pet_id == Some(pet_id) {
            loaded.records.push(record);
        }
    }

    async fn replace(&self, pet_id: Option<PetId>, records: Vec<R>) {
        let mut loaded = self.loaded.write().await;
        loaded.pet_id = pet_id;
        loaded.records = records;
    }

    fn fail<T>(&self, message: impl Into<String>) -> SubmitOutcome<T> {
        report_failure(self.notifier.as_ref(), &self.guard, message)
    }
}
