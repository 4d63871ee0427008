//! Account use case: sign in/out, registration, profile and password flows.

use crate::dispose::DisposeGuard;
use crate::notification_center::before_navigation;
use crate::outcome::{Confirmation, SubmitOutcome, report_failure};
use crate::stores::AppStores;
use petsync_core::error::Result;
use petsync_core::forms::{
    DraftForm, ForgotPasswordForm, LoginForm, ProfileForm, RegisterForm, ResetPasswordForm,
};
use petsync_core::gateway::{ApiResponse, UserGateway};
use petsync_core::notification::{Notification, Notifier};
use petsync_core::session::{SelectionRepository, SessionRecord, SessionRepository};
use petsync_core::user::User;
use std::sync::Arc;
use std::time::Duration;

pub const NOT_SIGNED_IN_MESSAGE: &str = "You need to sign in first.";

/// Use case for everything tied to the signed-in account.
///
/// # Responsibilities
///
/// - Validating account forms before any request is sent
/// - Persisting the encrypted session after a successful sign-in
/// - Mirroring the signed-in user into [`AppStores::user`]
/// - Clearing durable and in-memory state on logout and account deletion
///
/// # Thread Safety
///
/// Collaborators are shared through `Arc`; shared state lives behind the
/// `RwLock`s of [`AppStores`].
pub struct AuthUseCase {
    /// Remote user endpoints
    users: Arc<dyn UserGateway>,
    /// Encrypted durable session
    sessions: Arc<dyn SessionRepository>,
    /// Durable active-pet selection, dropped on logout
    selections: Arc<dyn SelectionRepository>,
    /// Shared in-memory state
    stores: Arc<AppStores>,
    /// Sink for success and error notifications
    notifier: Arc<dyn Notifier>,
    /// Time the front-end waits before navigating after a success
    redirect_delay: Duration,
    guard: DisposeGuard,
}

impl AuthUseCase {
    /// Creates a new `AuthUseCase`.
    ///
    /// # Arguments
    ///
    /// * `users` - Remote user endpoints
    /// * `sessions` - Durable session storage
    /// * `selections` - Durable active-pet selection storage
    /// * `stores` - Shared in-memory state
    /// * `notifier` - Notification sink
    /// * `redirect_delay` - Post-success navigation delay
    pub fn new(
        users: Arc<dyn UserGateway>,
        sessions: Arc<dyn SessionRepository>,
        selections: Arc<dyn SelectionRepository>,
        stores: Arc<AppStores>,
        notifier: Arc<dyn Notifier>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            selections,
            stores,
            notifier,
            redirect_delay,
            guard: DisposeGuard::new(),
        }
    }

    /// Handle the owner uses to drop results of in-flight requests.
    pub fn dispose_guard(&self) -> DisposeGuard {
        self.guard.clone()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.stores.user.read().await.to_user()
    }

    /// Loads the persisted session into the user state.
    ///
    /// A missing or unreadable session leaves the user signed out.
    pub async fn restore_session(&self) -> Option<User> {
        let record = self.sessions.load().await;
        let mut state = self.stores.user.write().await;
        match &record {
            Some(record) => state.set_user(Some(&record.user)),
            None => state.reset_user(),
        }
        record.map(|record| record.user)
    }

    pub async fn login(&self, form: &LoginForm) -> SubmitOutcome<User> {
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(errors) => return SubmitOutcome::Rejected(errors),
        };

        let session = match self
            .users
            .authenticate(&credentials.email, &credentials.password)
            .await
        {
            ApiResponse::Success { data, .. } => data,
            ApiResponse::Failure { message } => {
                tracing::info!("[AuthUseCase] Sign-in rejected");
                return self.fail(message);
            }
        };
        if self.guard.is_disposed() {
            return SubmitOutcome::Discarded;
        }

        let user = session.user;
        let record = SessionRecord::new(user.clone(), session.token);
        if let Err(e) = self.sessions.save(&record).await {
            tracing::warn!(error = %e, "[AuthUseCase] Failed to persist session");
            return self.fail(format!("Could not save the session: {e}"));
        }
        self.stores.user.write().await.set_user(Some(&user));

        tracing::info!(user_id = %user.id, "[AuthUseCase] Signed in");
        self.notify_success(format!("Welcome, {}!", user.name));
        SubmitOutcome::Completed(user)
    }

    pub async fn register(&self, form: &RegisterForm) -> SubmitOutcome<()> {
        let new_user = match form.validate() {
            Ok(new_user) => new_user,
            Err(errors) => return SubmitOutcome::Rejected(errors),
        };

        let response = self.users.register(&new_user).await;
        self.acknowledge(response, "Your account has been created.")
    }

    /// Drops the session, the stored selection and all in-memory state.
    ///
    /// In-memory state is always cleared; the first storage error is returned.
    pub async fn logout(&self) -> Result<()> {
        let cleared = self.clear_local().await;
        tracing::info!("[AuthUseCase] Signed out");
        self.notifier
            .notify(Notification::info("You have been signed out."));
        cleared
    }

    pub async fn update_profile(&self, form: &ProfileForm) -> SubmitOutcome<User> {
        let Some(id) = self.stores.user.read().await.id else {
            return self.fail(NOT_SIGNED_IN_MESSAGE);
        };
        let update = match form.validate() {
            Ok(update) => update,
            Err(errors) => return SubmitOutcome::Rejected(errors),
        };

        let message = match self.users.update_profile(id, &update).await {
            ApiResponse::Success { message, .. } => message,
            ApiResponse::Failure { message } => return self.fail(message),
        };
        if self.guard.is_disposed() {
            return SubmitOutcome::Discarded;
        }

        let user = User {
            id,
            name: update.name,
            surname: update.surname,
            email: update.email,
            phone: update.phone,
            birthday: update.birthday,
        };
        let record = match self.sessions.load().await {
            Some(existing) => existing.with_user(user.clone()),
            None => SessionRecord::new(user.clone(), None),
        };
        // The server already accepted the change
        if let Err(e) = self.sessions.save(&record).await {
            tracing::warn!(error = %e, "[AuthUseCase] Failed to persist updated session");
        }
        {
            let mut state = self.stores.user.write().await;
            state.set_user(Some(&user));
            state.set_password("");
        }

        self.notifier.notify(Notification::success(
            message.unwrap_or_else(|| "Your profile has been updated.".to_string()),
        ));
        SubmitOutcome::Completed(user)
    }

    /// Deletes the account, then signs out locally.
    pub async fn delete_account(&self, confirmation: Confirmation) -> SubmitOutcome<()> {
        if !confirmation.is_confirmed() {
            return SubmitOutcome::Cancelled;
        }
        let Some(id) = self.stores.user.read().await.id else {
            return self.fail(NOT_SIGNED_IN_MESSAGE);
        };

        let message = match self.users.delete_account(id).await {
            ApiResponse::Success { message, .. } => message,
            ApiResponse::Failure { message } => return self.fail(message),
        };
        if self.guard.is_disposed() {
            return SubmitOutcome::Discarded;
        }

        if let Err(e) = self.clear_local().await {
            tracing::warn!(error = %e, "[AuthUseCase] Failed to clear local data after account deletion");
        }
        tracing::info!(user_id = %id, "[AuthUseCase] Account deleted");
        self.notify_success(message.unwrap_or_else(|| "Your account has been deleted.".to_string()));
        SubmitOutcome::Completed(())
    }

    pub async fn request_password_reset(&self, form: &ForgotPasswordForm) -> SubmitOutcome<()> {
        let email = match form.validate() {
            Ok(email) => email,
            Err(errors) => return SubmitOutcome::Rejected(errors),
        };

        let response = self.users.request_password_reset(&email).await;
        self.acknowledge(
            response,
            "If the address is registered, you will receive an email with instructions.",
        )
    }

    pub async fn reset_password(&self, form: &ResetPasswordForm) -> SubmitOutcome<()> {
        let reset = match form.validate() {
            Ok(reset) => reset,
            Err(errors) => return SubmitOutcome::Rejected(errors),
        };

        let response = self
            .users
            .reset_password(&reset.token, &reset.password)
            .await;
        self.acknowledge(response, "Your password has been changed.")
    }

    async fn clear_local(&self) -> Result<()> {
        let session = self.sessions.clear().await;
        let selection = self.selections.clear_selection().await;
        self.stores.reset().await;
        session.and(selection)
    }

    /// Completes a command whose only effect is remote, then navigates.
    fn acknowledge(&self, response: ApiResponse<()>, fallback: &str) -> SubmitOutcome<()> {
        match response {
            ApiResponse::Success { message, .. } => {
                if self.guard.is_disposed() {
                    return SubmitOutcome::Discarded;
                }
                self.notify_success(message.unwrap_or_else(|| fallback.to_string()));
                SubmitOutcome::Completed(())
            }
            ApiResponse::Failure { message } => self.fail(message),
        }
    }

    fn notify_success(&self, message: String) {
        self.notifier.notify(before_navigation(
            Notification::success(message),
            self.redirect_delay,
        ));
    }

    fn fail<T>(&self, message: impl Into<String>) -> SubmitOutcome<T> {
        report_failure(self.notifier.as_ref(), &self.guard, message)
    }
}
