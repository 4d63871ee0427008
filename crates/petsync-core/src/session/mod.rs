//! Persisted session domain module.
//!
//! # Module Structure
//!
//! - `model`: The record written at login
//! - `repository`: Storage traits for the session and the pet selection

mod model;
mod repository;

// Re-export public API
pub use model::SessionRecord;
pub use repository::{SelectionRepository, SessionRepository};
