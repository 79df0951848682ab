//! HTTP layer for the admin screens: transport seam, session capability,
//! error taxonomy and the request helpers the controllers share.

pub mod client;
pub mod error;
pub mod gloo;
pub mod session;
pub mod transport;

pub use client::ApiClient;
pub use error::{ApiError, ErrorKind};
pub use session::SessionContext;
pub use transport::{ApiRequest, ApiResponse, FileUpload, FormPart, Method, RequestBody, Transport};
