//! Feeding, daily-activity and medical-history endpoints.
//!
//! One generic implementation serves all three; paths come from
//! [`RecordKind`](petsync_core::record::RecordKind).

use crate::client::ApiClient;
use crate::envelope;
use async_trait::async_trait;
use petsync_core::gateway::{ApiResponse, RecordGateway, RecordList};
use petsync_core::record::PetRecord;
use petsync_core::types::{PetId, RecordId};
use reqwest::Method;
use serde::Serialize;

#[derive(Serialize)]
struct NewRecordRequest<'a, D: Serialize> {
    pet_id: PetId,
    #[serde(flatten)]
    draft: &'a D,
}

#[async_trait]
impl<R: PetRecord> RecordGateway<R> for ApiClient {
    async fn list_records(&self, pet_id: PetId) -> ApiResponse<RecordList<R>> {
        self.list(&R::KIND.by_pet_path(pet_id)).await
    }

    async fn create_record(&self, pet_id: PetId, draft: &R::Draft) -> ApiResponse<Option<R>> {
        let request = NewRecordRequest { pet_id, draft };
        self.call(Method::POST, R::KIND.collection_path(), Some(&request))
            .await
            .map(|body| envelope::decode_echo::<R>(&body))
    }

    async fn update_record(&self, id: RecordId, draft: &R::Draft) -> ApiResponse<()> {
        self.command(Method::PUT, &R::KIND.item_path(id), Some(draft))
            .await
    }

    async fn delete_record(&self, id: RecordId) -> ApiResponse<()> {
        self.command::<()>(Method::DELETE, &R::KIND.item_path(id), None)
            .await
    }
}
