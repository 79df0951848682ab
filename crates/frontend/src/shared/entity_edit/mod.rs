//! Detail forms: load one entity, edit a draft, validate, save.
//!
//! - `schema.rs`: declarative field rules
//! - `draft.rs`: original/draft pair and edit mode
//! - `controller.rs`: load/save state machine
//! - `hook.rs`: Leptos bindings

pub mod controller;
pub mod draft;
pub mod hook;
pub mod schema;

pub use controller::{DetailSnapshot, DetailStatus, EntityConfig, EntityDetailController, SaveOutcome};
pub use draft::{EditError, EditMode, EntityDraft, FieldValue};
pub use hook::{use_entity_detail, EntityDetailHandle};
pub use schema::{FieldErrors, FieldInput, Rule, Schema};
