//! Paginated, filtered, debounced list screens.
//!
//! - `query_state.rs`: search/filter/page state of one screen
//! - `debounce.rs`: trailing-edge debounce for free-text search
//! - `fetcher.rs`: request parameters and response normalization
//! - `controller.rs`: state machine with the stale-response guard
//! - `hook.rs`: Leptos bindings

pub mod controller;
pub mod debounce;
pub mod fetcher;
pub mod hook;
pub mod query_state;

pub use controller::{ListQueryController, ListSnapshot, ListStatus};
pub use fetcher::{FilterDef, ListConfig};
pub use hook::{use_list_query, ListQueryHandle};
pub use query_state::QueryState;
