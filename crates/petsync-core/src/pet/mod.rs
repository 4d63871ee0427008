//! Pet domain module.
//!
//! # Module Structure
//!
//! - `model`: Pet entity, roster summary and create/update payload
//! - `roster`: Roster cache holding the active-pet selection
//! - `filter`: Home-page filtering over the detailed pet list

mod filter;
mod model;
mod roster;

// Re-export public API
pub use filter::PetFilter;
pub use model::{Gender, Pet, PetDraft, PetSummary};
pub use roster::PetContext;
