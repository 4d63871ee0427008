//! Application layer for PetSync.
//!
//! This crate provides the use cases and coordinators that connect the
//! domain types of `petsync-core` with the gateways and repositories
//! injected by the front-end.
//!
//! # Module Structure
//!
//! - `stores`: Shared in-memory state ([`AppStores`])
//! - `auth_usecase`: Sign in/out, registration, profile and password flows
//! - `pet_usecase`: Roster, pet CRUD, active-pet selection, breed lookups
//! - `record_coordinator`: Feeding, daily-activity and medical-history pages
//! - `route_guard`: Session check in front of protected routes
//! - `notification_center`: Channel-backed [`Notifier`](petsync_core::notification::Notifier)

pub mod auth_usecase;
pub mod dispose;
pub mod notification_center;
pub mod outcome;
pub mod pet_usecase;
pub mod record_coordinator;
pub mod route_guard;
pub mod stores;

pub use auth_usecase::AuthUseCase;
pub use dispose::DisposeGuard;
pub use notification_center::{NotificationCenter, NotificationReceiver};
pub use outcome::{Confirmation, SubmitOutcome};
pub use pet_usecase::PetUseCase;
pub use record_coordinator::{RecordCoordinator, RecordView};
pub use route_guard::{GuardState, RouteGuard};
pub use stores::AppStores;
