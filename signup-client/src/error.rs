// signup-client/src/error.rs
use thiserror::Error;

/// Shown when a mutation is attempted without an admin session
pub const ADMIN_LOGIN_REQUIRED: &str = "Admin login required";

/// Shown in place of the activity list when the catalog cannot be loaded
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load activities. Please try again later.";

/// The request never produced a readable response
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Connection refused or timed out before any answer
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Durable token storage could not be read or written
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Login or token verification failed; `message` is user-facing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// The catalog could not be loaded; the previous snapshot is kept
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("unexpected status {0} from /activities")]
    Status(u16),
    #[error("malformed catalog: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// A signup or unregister was not applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Rejected locally; no request was sent
    #[error("{}", ADMIN_LOGIN_REQUIRED)]
    Unauthorized,
    /// `.` and `..` cannot be carried as a URL path segment; no request was sent
    #[error("Invalid activity name: {0}")]
    InvalidActivity(String),
    /// The backend answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// No usable answer from the backend
    #[error("{message}")]
    Failed { message: String },
}
