//! Dog breed catalogue (dog.ceo-compatible API).
//!
//! Every reply carries its payload in `message` with `status: "success"`.

use crate::client::{ApiClient, UNEXPECTED_RESPONSE_MESSAGE};
use async_trait::async_trait;
use petsync_core::error::Result;
use petsync_core::gateway::{ApiResponse, BreedGateway};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

/// Client for the third-party breed API.
#[derive(Debug, Clone)]
pub struct BreedClient {
    http: ApiClient,
}

impl BreedClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: ApiClient::new(base_url, timeout)?,
        })
    }
}

/// Path segment for a breed name: `"Hound Afghan"` -> `"hound/afghan"`.
pub(crate) fn breed_path(breed: &str) -> String {
    breed
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl BreedGateway for BreedClient {
    async fn list_breeds(&self) -> ApiResponse<Vec<String>> {
        let body = match self.http.call::<()>(Method::GET, "/breeds/list/all", None).await {
            ApiResponse::Success { data, .. } => data,
            ApiResponse::Failure { message } => return ApiResponse::failure(message),
        };

        match body.get("message").and_then(Value::as_object) {
            Some(breeds) => {
                let mut names: Vec<String> = breeds.keys().cloned().collect();
                names.sort();
                ApiResponse::success(names)
            }
            None => ApiResponse::failure(UNEXPECTED_RESPONSE_MESSAGE),
        }
    }

    async fn random_image(&self, breed: &str) -> ApiResponse<String> {
        let path = format!("/breed/{}/images/random", breed_path(breed));
        let body = match self.http.call::<()>(Method::GET, &path, None).await {
            ApiResponse::Success { data, .. } => data,
            ApiResponse::Failure { message } => return ApiResponse::failure(message),
        };

        match body.get("message").and_then(Value::as_str) {
            Some(url) => ApiResponse::success(url.to_string()),
            None => ApiResponse::failure(UNEXPECTED_RESPONSE_MESSAGE),
        }
    }
}
