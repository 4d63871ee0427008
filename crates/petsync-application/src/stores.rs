//! Process-wide state containers shared by every coordinator.

use petsync_core::pet::PetContext;
use petsync_core::user::UserSessionState;
use tokio::sync::RwLock;

/// In-memory application state, injected into each use case as `Arc<AppStores>`.
///
/// Lock order when both are needed: `user` before `pets`.
#[derive(Debug, Default)]
pub struct AppStores {
    pub user: RwLock<UserSessionState>,
    pub pets: RwLock<PetContext>,
}

impl AppStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the signed-in user and the pet roster, as on logout.
    pub async fn reset(&self) {
        self.user.write().await.reset_user();
        self.pets.write().await.reset();
    }
}
