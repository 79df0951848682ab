pub mod options;
pub mod ui;

pub const ENDPOINT: &str = "/api/countries";
pub const STATES_ENDPOINT: &str = "/api/states";
