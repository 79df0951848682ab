pub mod ui;

pub const ENDPOINT: &str = "/api/categories";
