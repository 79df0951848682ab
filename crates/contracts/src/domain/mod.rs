//! Entity DTOs managed by the admin dashboard.
//!
//! Every DTO serializes with the backend's camelCase field names; the
//! `fields` module next to each type lists those names for form bindings.

pub mod bank;
pub mod category;
pub mod country;
pub mod order;
pub mod vendor;
