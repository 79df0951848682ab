pub mod bank;
pub mod category;
pub mod common;
pub mod country;
pub mod order;
pub mod vendor;
