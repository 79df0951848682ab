pub mod list;
pub mod states;
