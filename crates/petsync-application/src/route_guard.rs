//! Session check in front of protected routes.

use crate::stores::AppStores;
use petsync_core::route::Route;
use petsync_core::session::SessionRepository;
use petsync_core::user::User;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Where a guarded navigation stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Waiting for the session check.
    Checking,
    /// A valid session exists; the route may render.
    Authorized { user: User },
    /// The route is public and was not checked.
    Public,
    /// Navigation must continue at `to`.
    Redirecting { to: Route },
}

/// Resolves protected routes against the persisted session.
///
/// The check waits a short, configurable delay before reading storage so the
/// "checking" state is observable. Subscribers follow state changes through a
/// `watch` channel.
pub struct RouteGuard {
    /// Durable session read on every check
    sessions: Arc<dyn SessionRepository>,
    /// Mirrors the outcome into the user state
    stores: Arc<AppStores>,
    delay: Duration,
    state: watch::Sender<GuardState>,
}

impl RouteGuard {
    pub fn new(sessions: Arc<dyn SessionRepository>, stores: Arc<AppStores>, delay: Duration) -> Self {
        let (state, _) = watch::channel(GuardState::Checking);
        Self {
            sessions,
            stores,
            delay,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<GuardState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> GuardState {
        self.state.borrow().clone()
    }

    /// Decides whether `route` may render.
    ///
    /// - public routes pass unchecked, except the login page, which sends a
    ///   signed-in user to the home page
    /// - protected routes wait for the delay, then need a loadable session;
    ///   otherwise they redirect to the login page
    pub async fn check(&self, route: Route) -> GuardState {
        if !route.is_protected() {
            let next = if route == Route::SIGN_IN && self.sessions.load().await.is_some() {
                GuardState::Redirecting {
                    to: Route::AFTER_SIGN_IN,
                }
            } else {
                GuardState::Public
            };
            self.state.send_replace(next.clone());
            return next;
        }

        self.state.send_replace(GuardState::Checking);
        tokio::time::sleep(self.delay).await;

        let next = match self.sessions.load().await {
            Some(record) => {
                let mut user = self.stores.user.write().await;
                if user.id != Some(record.user.id) {
                    user.set_user(Some(&record.user));
                }
                GuardState::Authorized { user: record.user }
            }
            None => {
                tracing::debug!(route = %route.path(), "[RouteGuard] No session, redirecting to sign-in");
                self.stores.user.write().await.reset_user();
                GuardState::Redirecting { to: Route::SIGN_IN }
            }
        };
        self.state.send_replace(next.clone());
        next
    }
}
