//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User entity and registration/profile payloads
//! - `state`: In-memory user session state with field-level setters

mod model;
mod state;

// Re-export public API
pub use model::{NewUser, ProfileUpdate, User};
pub use state::UserSessionState;
