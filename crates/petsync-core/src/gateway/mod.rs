//! Remote Data Gateway contracts.
//!
//! # Module Structure
//!
//! - `response`: Normalized call outcome ([`ApiResponse`], [`RecordList`])
//!
//! Each trait groups the calls of one backend resource. Implementations:
//!
//! - build requests only from their arguments,
//! - map transport failures to [`ApiResponse::Failure`] carrying
//!   [`CONNECTION_ERROR_MESSAGE`],
//! - never retry.
//!
//! The HTTP implementation lives in `petsync-interaction`; tests use
//! hand-written mocks.

mod response;

use crate::pet::{Pet, PetDraft, PetSummary};
use crate::record::PetRecord;
use crate::types::{PetId, RecordId, UserId};
use crate::user::{NewUser, ProfileUpdate, User};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// Re-export public API
pub use response::{ApiResponse, CONNECTION_ERROR_MESSAGE, RecordList};

/// Result of a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    /// Continuation token, when the backend issues one.
    pub token: Option<String>,
}

/// Account operations (`/user`, `/user/auth`, `/user/{id}`, password reset).
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Succeeds only when the backend answers with `authenticated: true`.
    async fn authenticate(&self, email: &str, password: &str) -> ApiResponse<AuthSession>;

    async fn register(&self, user: &NewUser) -> ApiResponse<()>;

    async fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> ApiResponse<()>;

    async fn delete_account(&self, id: UserId) -> ApiResponse<()>;

    async fn request_password_reset(&self, email: &str) -> ApiResponse<()>;

    async fn reset_password(&self, token: &str, password: &str) -> ApiResponse<()>;
}

/// Pet operations (`/pet`, `/pet/{id}`, `/pet/user/{id}`, `/pet/name/user/{id}`).
#[async_trait]
pub trait PetGateway: Send + Sync {
    /// Full profiles of the user's pets.
    async fn list_pets(&self, user_id: UserId) -> ApiResponse<RecordList<Pet>>;

    /// Id/name pairs feeding the roster.
    async fn list_pet_names(&self, user_id: UserId) -> ApiResponse<RecordList<PetSummary>>;

    /// Returns the stored pet when the backend echoes it.
    async fn create_pet(&self, user_id: UserId, draft: &PetDraft) -> ApiResponse<Option<Pet>>;

    async fn update_pet(&self, id: PetId, draft: &PetDraft) -> ApiResponse<()>;

    async fn delete_pet(&self, id: PetId) -> ApiResponse<()>;
}

/// Create/list/update/delete for one kind of per-pet record.
#[async_trait]
pub trait RecordGateway<R: PetRecord>: Send + Sync {
    async fn list_records(&self, pet_id: PetId) -> ApiResponse<RecordList<R>>;

    /// Returns the stored record when the backend echoes it.
    async fn create_record(&self, pet_id: PetId, draft: &R::Draft) -> ApiResponse<Option<R>>;

    async fn update_record(&self, id: RecordId, draft: &R::Draft) -> ApiResponse<()>;

    async fn delete_record(&self, id: RecordId) -> ApiResponse<()>;
}

/// Third-party breed catalogue and photos.
#[async_trait]
pub trait BreedGateway: Send + Sync {
    /// Top-level breed names, sorted.
    async fn list_breeds(&self) -> ApiResponse<Vec<String>>;

    /// URL of a random photo of `breed`.
    async fn random_image(&self, breed: &str) -> ApiResponse<String>;
}
