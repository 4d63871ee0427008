//! HTTP transport shared by every gateway implementation.

use crate::envelope;
use petsync_core::error::{PetSyncError, Result};
use petsync_core::gateway::{ApiResponse, RecordList};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub(crate) const UNEXPECTED_RESPONSE_MESSAGE: &str = "Unexpected response from the server.";

/// Status and parsed body of a completed exchange.
pub(crate) struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

/// Backend REST client. Implements every gateway trait of `petsync-core`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url` (no trailing slash) with a request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PetSyncError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Performs one request.
    ///
    /// # Returns
    ///
    /// `None` on transport failure (refused, timed out, unreadable body).
    /// Non-JSON bodies parse as `Value::Null`.
    pub(crate) async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Option<Reply>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    method = %method,
                    url = %url,
                    is_timeout = err.is_timeout(),
                    is_connect = err.is_connect(),
                    "Request failed: {err}"
                );
                return None;
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(url = %url, "Failed to read response body: {err}");
                return None;
            }
        };
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        tracing::debug!(status = status.as_u16(), url = %url, "Received response");
        Some(Reply { status, body })
    }

    /// Request whose success payload is the raw body.
    pub(crate) async fn call<B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResponse<Value>
    where
        B: Serialize + ?Sized,
    {
        let Some(reply) = self.send(method, path, body).await else {
            return ApiResponse::connection_error();
        };

        if reply.status.is_success() {
            let message = envelope::message(&reply.body);
            ApiResponse::Success {
                data: reply.body,
                message,
            }
        } else {
            ApiResponse::failure(failure_message(&reply))
        }
    }

    /// Mutation whose only interesting output is the server message.
    pub(crate) async fn command<B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResponse<()>
    where
        B: Serialize + ?Sized,
    {
        self.call(method, path, body).await.map(|_| ())
    }

    /// `GET` on a list endpoint. 404 is a soft "not found", not a failure.
    pub(crate) async fn list<T: DeserializeOwned>(&self, path: &str) -> ApiResponse<RecordList<T>> {
        let Some(reply) = self.send::<()>(Method::GET, path, None).await else {
            return ApiResponse::connection_error();
        };

        if reply.status == StatusCode::NOT_FOUND {
            return ApiResponse::success(RecordList::NotFound {
                detail: envelope::message(&reply.body),
            });
        }
        if !reply.status.is_success() {
            return ApiResponse::failure(failure_message(&reply));
        }

        match envelope::decode_list(&reply.body) {
            Ok(items) => ApiResponse::success(RecordList::Found(items)),
            Err(err) => {
                tracing::warn!(path, "Failed to decode list payload: {err}");
                ApiResponse::failure(UNEXPECTED_RESPONSE_MESSAGE)
            }
        }
    }
}

fn failure_message(reply: &Reply) -> String {
    envelope::message(&reply.body)
        .unwrap_or_else(|| format!("Request failed with status {}", reply.status.as_u16()))
}
