//! Domain layer of the PetSync client.
//!
//! Pure models, state containers and the traits that the infrastructure and
//! interaction crates implement. Nothing in this crate performs I/O.
//!
//! # Module Structure
//!
//! - `error`: Shared error type
//! - `types`: Identifier newtypes and the wire date format
//! - `user`: User entity and in-memory session state
//! - `pet`: Pet entity, roster cache and home filter
//! - `selection`: Active-pet selection and its reconciliation rule
//! - `record`: Feedings, daily activities and medical histories
//! - `gateway`: Remote Data Gateway traits and normalized responses
//! - `session`: Persisted session record and storage traits
//! - `validation`: Declarative field validation
//! - `forms`: Form inputs with their validation tables
//! - `route`: Routes and route protection
//! - `notification`: Transient notifications

pub mod error;
pub mod forms;
pub mod gateway;
pub mod notification;
pub mod pet;
pub mod record;
pub mod route;
pub mod selection;
pub mod session;
pub mod types;
pub mod user;
pub mod validation;
