use thiserror::Error;

/// Failure classes every screen distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response reached us.
    Network,
    /// 401 or 404: the session is treated as invalid.
    Auth,
    /// Any other non-2xx status, or a body we cannot use.
    Server,
    /// Client-side schema failure. Never produced by the network layer.
    Validation,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Network => "Network error",
            ErrorKind::Auth => "Session expired",
            ErrorKind::Server => "Server error",
            ErrorKind::Validation => "Validation error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", .kind.label(), .message)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Server, message)
    }

    pub fn is_auth(&self) -> bool {
        self.kind == ErrorKind::Auth
    }

    /// Classifies a non-2xx HTTP status. The backend answers 404 for
    /// tokens it no longer knows, so 404 counts as an auth failure.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = server_message(body).unwrap_or_else(|| format!("HTTP {}", status));
        match status {
            401 | 404 => Self::auth(detail),
            _ => Self::server(detail),
        }
    }
}

/// Pulls `message` or `error` out of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key)?.as_str().map(str::to_string))
        .filter(|m| !m.trim().is_empty())
}
