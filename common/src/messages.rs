// common/src/messages.rs
//! Wire bodies exchanged with the activities backend.
use serde::{Deserialize, Serialize};

/// User as returned by `/login` and `/verify-token`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub email: String,
    pub name: String,
}

/// Successful `/login` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPayload,
}

/// Successful `/verify-token` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub valid: Option<bool>,
    pub user: UserPayload,
}

/// Successful signup/unregister body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body; `detail` is absent on some failures
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<String>,
}

/// One entry of the `/activities` mapping, keyed by activity name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}
