#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use petsync_application::{AppStores, AuthUseCase, NotificationCenter, NotificationReceiver, PetUseCase};
use petsync_core::error::Result;
use petsync_core::gateway::{
    ApiResponse, AuthSession, BreedGateway, PetGateway, RecordGateway, RecordList, UserGateway,
};
use petsync_core::notification::Notification;
use petsync_core::pet::{Pet, PetDraft, PetSummary};
use petsync_core::record::PetRecord;
use petsync_core::selection::ActivePetSelection;
use petsync_core::session::{SelectionRepository, SessionRecord, SessionRepository};
use petsync_core::types::{PetId, RecordId, UserId};
use petsync_core::user::{NewUser, ProfileUpdate, User};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned response plus a call counter.
pub struct Scripted<T> {
    response: Mutex<T>,
    calls: AtomicUsize,
}

impl<T: Clone> Scripted<T> {
    pub fn new(response: T) -> Self {
        Self {
            response: Mutex::new(response),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, response: T) {
        *self.response.lock().unwrap() = response;
    }

    pub fn next(&self) -> T {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Gateways
// ============================================================================

pub struct MockUserGateway {
    pub auth: Scripted<ApiResponse<AuthSession>>,
    pub command: Scripted<ApiResponse<()>>,
}

impl MockUserGateway {
    pub fn new() -> Self {
        Self {
            auth: Scripted::new(ApiResponse::failure("not scripted")),
            command: Scripted::new(ApiResponse::success(())),
        }
    }
}

#[async_trait]
impl UserGateway for MockUserGateway {
    async fn authenticate(&self, _email: &str, _password: &str) -> ApiResponse<AuthSession> {
        self.auth.next()
    }

    async fn register(&self, _user: &NewUser) -> ApiResponse<()> {
        self.command.next()
    }

    async fn update_profile(&self, _id: UserId, _update: &ProfileUpdate) -> ApiResponse<()> {
        self.command.next()
    }

    async fn delete_account(&self, _id: UserId) -> ApiResponse<()> {
        self.command.next()
    }

    async fn request_password_reset(&self, _email: &str) -> ApiResponse<()> {
        self.command.next()
    }

    async fn reset_password(&self, _token: &str, _password: &str) -> ApiResponse<()> {
        self.command.next()
    }
}

pub struct MockPetGateway {
    pub names: Scripted<ApiResponse<RecordList<PetSummary>>>,
    pub pets: Scripted<ApiResponse<RecordList<Pet>>>,
    pub create: Scripted<ApiResponse<Option<Pet>>>,
    pub command: Scripted<ApiResponse<()>>,
    pub drafts: Mutex<Vec<PetDraft>>,
}

impl MockPetGateway {
    pub fn new() -> Self {
        Self {
            names: Scripted::new(ApiResponse::success(RecordList::Found(Vec::new()))),
            pets: Scripted::new(ApiResponse::success(RecordList::Found(Vec::new()))),
            create: Scripted::new(ApiResponse::success(None)),
            command: Scripted::new(ApiResponse::success(())),
            drafts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PetGateway for MockPetGateway {
    async fn list_pets(&self, _user_id: UserId) -> ApiResponse<RecordList<Pet>> {
        self.pets.next()
    }

    async fn list_pet_names(&self, _user_id: UserId) -> ApiResponse<RecordList<PetSummary>> {
        self.names.next()
    }

    async fn create_pet(&self, _user_id: UserId, draft: &PetDraft) -> ApiResponse<Option<Pet>> {
        self.drafts.lock().unwrap().push(draft.clone());
        self.create.next()
    }

    async fn update_pet(&self, _id: PetId, draft: &PetDraft) -> ApiResponse<()> {
        self.drafts.lock().unwrap().push(draft.clone());
        self.command.next()
    }

    async fn delete_pet(&self, _id: PetId) -> ApiResponse<()> {
        self.command.next()
    }
}

pub struct MockRecordGateway<R: PetRecord> {
    pub list: Scripted<ApiResponse<RecordList<R>>>,
    pub create: Scripted<ApiResponse<Option<R>>>,
    pub command: Scripted<ApiResponse<()>>,
}

impl<R: PetRecord> MockRecordGateway<R> {
    pub fn new() -> Self {
        Self {
            list: Scripted::new(ApiResponse::success(RecordList::Found(Vec::new()))),
            create: Scripted::new(ApiResponse::success(None)),
            command: Scripted::new(ApiResponse::success(())),
        }
    }
}

#[async_trait]
impl<R: PetRecord> RecordGateway<R> for MockRecordGateway<R> {
    async fn list_records(&self, _pet_id: PetId) -> ApiResponse<RecordList<R>> {
        self.list.next()
    }

    async fn create_record(&self, _pet_id: PetId, _draft: &R::Draft) -> ApiResponse<Option<R>> {
        self.create.next()
    }

    async fn update_record(&self, _id: RecordId, _draft: &R::Draft) -> ApiResponse<()> {
        self.command.next()
    }

    async fn delete_record(&self, _id: RecordId) -> ApiResponse<()> {
        self.command.next()
    }
}

pub struct MockBreedGateway {
    pub breeds: Scripted<ApiResponse<Vec<String>>>,
    pub image: Scripted<ApiResponse<String>>,
}

impl MockBreedGateway {
    pub fn new() -> Self {
        Self {
            breeds: Scripted::new(ApiResponse::success(Vec::new())),
            image: Scripted::new(ApiResponse::failure("no image")),
        }
    }
}

#[async_trait]
impl BreedGateway for MockBreedGateway {
    async fn list_breeds(&self) -> ApiResponse<Vec<String>> {
        self.breeds.next()
    }

    async fn random_image(&self, _breed: &str) -> ApiResponse<String> {
        self.image.next()
    }
}

// ============================================================================
// Repositories
// ============================================================================

#[derive(Default)]
pub struct MemorySessions {
    pub record: Mutex<Option<SessionRecord>>,
}

#[async_trait]
impl SessionRepository for MemorySessions {
    async fn save(&self, record: &SessionRecord) -> Result<()> {
        *self.record.lock().unwrap() = Some(record.clone());
        Ok(())
    }

    async fn load(&self) -> Option<SessionRecord> {
        self.record.lock().unwrap().clone()
    }

    async fn clear(&self) -> Result<()> {
        *self.record.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySelections {
    pub selection: Mutex<ActivePetSelection>,
}

#[async_trait]
impl SelectionRepository for MemorySelections {
    async fn save_selection(&self, selection: &ActivePetSelection) -> Result<()> {
        *self.selection.lock().unwrap() = selection.clone();
        Ok(())
    }

    async fn load_selection(&self) -> ActivePetSelection {
        self.selection.lock().unwrap().clone()
    }

    async fn clear_selection(&self) -> Result<()> {
        *self.selection.lock().unwrap() = ActivePetSelection::Unset;
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn sample_user() -> User {
    User {
        id: UserId(7),
        name: "Ana".to_string(),
        surname: "García".to_string(),
        email: "ana@example.com".to_string(),
        phone: "600000000".to_string(),
        birthday: date(1990, 5, 17),
    }
}

pub fn pet(id: i64, name: &str) -> Pet {
    Pet {
        id: PetId(id),
        user_id: Some(UserId(7)),
        name: name.to_string(),
        breed: "beagle".to_string(),
        gender: "female".to_string(),
        weight: 12.0,
        birthday: Some(date(2020, 1, 1)),
        photo: String::new(),
    }
}

pub struct Harness {
    pub stores: Arc<AppStores>,
    pub users: Arc<MockUserGateway>,
    pub pets: Arc<MockPetGateway>,
    pub breeds: Arc<MockBreedGateway>,
    pub sessions: Arc<MemorySessions>,
    pub selections: Arc<MemorySelections>,
    pub notifier: Arc<NotificationCenter>,
    pub inbox: NotificationReceiver,
}

impl Harness {
    pub fn new() -> Self {
        let (center, inbox) = NotificationCenter::channel();
        Self {
            stores: Arc::new(AppStores::new()),
            users: Arc::new(MockUserGateway::new()),
            pets: Arc::new(MockPetGateway::new()),
            breeds: Arc::new(MockBreedGateway::new()),
            sessions: Arc::new(MemorySessions::default()),
            selections: Arc::new(MemorySelections::default()),
            notifier: Arc::new(center),
            inbox,
        }
    }

    pub fn auth(&self) -> AuthUseCase {
        AuthUseCase::new(
            self.users.clone(),
            self.sessions.clone(),
            self.selections.clone(),
            self.stores.clone(),
            self.notifier.clone(),
            Duration::from_millis(2300),
        )
    }

    pub fn pet_usecase(&self) -> PetUseCase {
        PetUseCase::new(
            self.pets.clone(),
            self.breeds.clone(),
            self.selections.clone(),
            self.stores.clone(),
            self.notifier.clone(),
        )
    }

    /// Puts a signed-in user in both the session store and the user state.
    pub async fn sign_in(&self) -> User {
        let user = sample_user();
        *self.sessions.record.lock().unwrap() = Some(SessionRecord::new(user.clone(), None));
        self.stores.user.write().await.set_user(Some(&user));
        user
    }

    /// Loads `pets` into the roster with the first one selected.
    pub async fn with_roster(&self, pets: &[Pet]) {
        let mut context = self.stores.pets.write().await;
        context.set_pets(pets.to_vec());
    }

    pub fn notifications(&mut self) -> Vec<Notification> {
        self.inbox.drain()
    }
}
