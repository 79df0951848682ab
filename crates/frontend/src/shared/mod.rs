pub mod api;
pub mod api_utils;
pub mod components;
pub mod config;
pub mod entity_edit;
pub mod icons;
pub mod list_query;
pub mod timer;

#[cfg(test)]
pub mod testing;
