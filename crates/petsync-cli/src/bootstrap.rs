//! Wires configuration, storage, gateways and use cases into one [`App`].

use crate::output;
use anyhow::{Result, bail};
use petsync_application::{
    AppStores, AuthUseCase, GuardState, NotificationCenter, NotificationReceiver, PetUseCase,
    RecordCoordinator, RouteGuard,
};
use petsync_core::notification::Notifier;
use petsync_core::record::{DailyActivity, Feeding, MedicalHistory};
use petsync_core::route::Route;
use petsync_core::session::{SelectionRepository, SessionRepository};
use petsync_core::user::User;
use petsync_infrastructure::{
    AppConfig, EncryptedSessionStore, JsonFileStore, KeyValueStore, PetSyncPaths, SelectionStore,
    SessionCipher,
};
use petsync_interaction::{ApiClient, BreedClient};
use std::sync::Arc;

pub struct App {
    pub stores: Arc<AppStores>,
    pub auth: AuthUseCase,
    pub pets: PetUseCase,
    pub feedings: RecordCoordinator<Feeding>,
    pub activities: RecordCoordinator<DailyActivity>,
    pub medical: RecordCoordinator<MedicalHistory>,
    pub guard: RouteGuard,
    inbox: NotificationReceiver,
}

impl App {
    /// Builds every collaborator from `config`, with durable slots in the
    /// storage file under `paths`.
    pub fn build(paths: &PetSyncPaths, config: &AppConfig) -> Result<Self> {
        let storage_file = paths.storage_file()?;
        tracing::debug!(path = %storage_file.display(), "[Bootstrap] Using storage file");

        let slots: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(storage_file));
        let cipher = Arc::new(SessionCipher::new(&config.secret_key));
        let sessions: Arc<dyn SessionRepository> =
            Arc::new(EncryptedSessionStore::new(slots.clone(), cipher));
        let selections: Arc<dyn SelectionRepository> = Arc::new(SelectionStore::new(slots));

        let api = Arc::new(ApiClient::new(config.api_url.clone(), config.request_timeout)?);
        let breeds = Arc::new(BreedClient::new(
            config.breed_api_url.clone(),
            config.request_timeout,
        )?);

        let stores = Arc::new(AppStores::new());
        let (center, inbox) = NotificationCenter::channel();
        let notifier: Arc<dyn Notifier> = Arc::new(center);

        Ok(Self {
            auth: AuthUseCase::new(
                api.clone(),
                sessions.clone(),
                selections.clone(),
                stores.clone(),
                notifier.clone(),
                config.redirect_delay,
            ),
            pets: PetUseCase::new(
                api.clone(),
                breeds,
                selections,
                stores.clone(),
                notifier.clone(),
            ),
            feedings: RecordCoordinator::<Feeding>::new(
                api.clone(),
                stores.clone(),
                notifier.clone(),
            ),
            activities: RecordCoordinator::<DailyActivity>::new(
                api.clone(),
                stores.clone(),
                notifier.clone(),
            ),
            medical: RecordCoordinator::<MedicalHistory>::new(api, stores.clone(), notifier),
            guard: RouteGuard::new(sessions, stores.clone(), config.guard_delay),
            stores,
            inbox,
        })
    }

    /// Runs the route guard for a protected command.
    pub async fn authorize(&self, route: Route) -> Result<User> {
        match self.guard.check(route).await {
            GuardState::Authorized { user } => Ok(user),
            GuardState::Redirecting { to } => {
                bail!("Not signed in ({}). Run `petsync login` first.", to.path())
            }
            state => bail!("Unexpected guard state for {}: {state:?}", route.path()),
        }
    }

    /// Authorizes, then loads the roster so a pet selection is in place.
    pub async fn authorize_with_pets(&self, route: Route) -> Result<User> {
        let user = self.authorize(route).await?;
        output::finish(self.pets.refresh_roster().await)?;
        Ok(user)
    }

    /// Prints notifications raised so far.
    pub fn flush_notifications(&mut self) {
        for notification in self.inbox.drain() {
            output::print_notification(&notification);
        }
    }
}
