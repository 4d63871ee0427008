//! HTTP implementation of the Remote Data Gateway.
//!
//! # Module Structure
//!
//! - `client`: Shared transport ([`ApiClient`]) and response normalization
//! - `envelope`: Backend JSON envelope helpers
//! - `user_api`: [`UserGateway`](petsync_core::gateway::UserGateway) for [`ApiClient`]
//! - `pet_api`: [`PetGateway`](petsync_core::gateway::PetGateway) for [`ApiClient`]
//! - `record_api`: [`RecordGateway`](petsync_core::gateway::RecordGateway) for every record kind
//! - `breed_api`: [`BreedClient`] for the third-party breed API

mod breed_api;
mod client;
mod envelope;
mod pet_api;
mod record_api;
mod user_api;

pub use breed_api::BreedClient;
pub use client::ApiClient;
