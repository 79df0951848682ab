//! Wire contracts shared between the admin front-end and the marketplace API.

pub mod domain;
pub mod shared;
pub mod system;
