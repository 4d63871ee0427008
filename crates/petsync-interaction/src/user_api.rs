//! Account endpoints.

use crate::client::{ApiClient, UNEXPECTED_RESPONSE_MESSAGE};
use crate::envelope;
use async_trait::async_trait;
use petsync_core::gateway::{ApiResponse, AuthSession, UserGateway};
use petsync_core::types::UserId;
use petsync_core::user::{NewUser, ProfileUpdate, User};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    password: &'a str,
}

#[async_trait]
impl UserGateway for ApiClient {
    async fn authenticate(&self, email: &str, password: &str) -> ApiResponse<AuthSession> {
        let request = LoginRequest { email, password };
        let Some(reply) = self.send(Method::POST, "/user/auth", Some(&request)).await else {
            return ApiResponse::connection_error();
        };

        let authenticated = reply
            .body
            .get("authenticated")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if !reply.status.is_success() || !authenticated {
            return ApiResponse::failure(
                envelope::message(&reply.body)
                    .unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_string()),
            );
        }

        let user = match serde_json::from_value::<User>(envelope::payload(&reply.body).clone()) {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!("Failed to decode authenticated user: {err}");
                return ApiResponse::failure(UNEXPECTED_RESPONSE_MESSAGE);
            }
        };
        let token = reply
            .body
            .get("token")
            .and_then(Value::as_str)
            .map(str::to_string);

        tracing::info!(user_id = %user.id, "Authenticated");
        ApiResponse::Success {
            message: envelope::message(&reply.body),
            data: AuthSession { user, token },
        }
    }

    async fn register(&self, user: &NewUser) -> ApiResponse<()> {
        self.command(Method::POST, "/user", Some(user)).await
    }

    async fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> ApiResponse<()> {
        self.command(Method::PUT, &format!("/user/{id}"), Some(update))
            .await
    }

    async fn delete_account(&self, id: UserId) -> ApiResponse<()> {
        self.command::<()>(Method::DELETE, &format!("/user/{id}"), None)
            .await
    }

    async fn request_password_reset(&self, email: &str) -> ApiResponse<()> {
        self.command(
            Method::POST,
            "/forgot-password",
            Some(&ForgotPasswordRequest { email }),
        )
        .await
    }

    async fn reset_password(&self, token: &str, password: &str) -> ApiResponse<()> {
        self.command(
            Method::POST,
            "/reset-password",
            Some(&ResetPasswordRequest { token, password }),
        )
        .await
    }
}
