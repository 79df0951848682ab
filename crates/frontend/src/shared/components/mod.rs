pub mod filter_select;
pub mod form_field;
pub mod list_status;
pub mod list_toolbar;
pub mod detail_frame;
pub mod pagination_controls;
pub mod search_input;
pub mod status_badge;

pub use filter_select::FilterSelect;
pub use detail_frame::{DetailFrame, DetailTarget};
pub use form_field::{CheckboxField, FieldError, FileField, SelectField, TextField};
pub use list_status::ListStatusView;
pub use list_toolbar::{ListPager, ListToolbar};
pub use pagination_controls::PaginationControls;
pub use search_input::SearchInput;
pub use status_badge::{ActiveBadge, StatusBadge};
