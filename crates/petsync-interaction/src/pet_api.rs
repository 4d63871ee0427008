//! Pet endpoints.

use crate::client::ApiClient;
use crate::envelope;
use async_trait::async_trait;
use petsync_core::gateway::{ApiResponse, PetGateway, RecordList};
use petsync_core::pet::{Pet, PetDraft, PetSummary};
use petsync_core::types::{PetId, UserId};
use reqwest::Method;
use serde::Serialize;

#[derive(Serialize)]
struct NewPetRequest<'a> {
    user_id: UserId,
    #[serde(flatten)]
    draft: &'a PetDraft,
}

#[async_trait]
impl PetGateway for ApiClient {
    async fn list_pets(&self, user_id: UserId) -> ApiResponse<RecordList<Pet>> {
        self.list(&format!("/pet/user/{user_id}")).await
    }

    async fn list_pet_names(&self, user_id: UserId) -> ApiResponse<RecordList<PetSummary>> {
        self.list(&format!("/pet/name/user/{user_id}")).await
    }

    async fn create_pet(&self, user_id: UserId, draft: &PetDraft) -> ApiResponse<Option<Pet>> {
        let request = NewPetRequest { user_id, draft };
        self.call(Method::POST, "/pet", Some(&request))
            .await
            .map(|body| envelope::decode_echo::<Pet>(&body))
    }

    async fn update_pet(&self, id: PetId, draft: &PetDraft) -> ApiResponse<()> {
        self.command(Method::PUT, &format!("/pet/{id}"), Some(draft))
            .await
    }

    async fn delete_pet(&self, id: PetId) -> ApiResponse<()> {
        self.command::<()>(Method::DELETE, &format!("/pet/{id}"), None)
            .await
    }
}
