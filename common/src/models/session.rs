// common/src/models/session.rs
use serde::{Deserialize, Serialize};

use crate::messages::UserPayload;

/// Role of an authenticated user. The backend only issues tokens to admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
}

/// Identity attached to a verified session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<UserPayload> for User {
    fn from(payload: UserPayload) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
            role: Role::Admin,
        }
    }
}

/// Authentication state derived from a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    LoggedIn,
}

/// Client-side session.
///
/// `user` is only ever set together with the token it was verified for, so a
/// session can never carry a user for a token the backend has not accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// Create an empty, logged out session
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn state(&self) -> AuthState {
        if self.user.is_some() {
            AuthState::LoggedIn
        } else {
            AuthState::LoggedOut
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.user, Some(User { role: Role::Admin, .. }))
    }

    /// Install a token together with the user the backend confirmed for it
    pub fn authenticate(&mut self, token: String, user: User) {
        self.token = Some(token);
        self.user = Some(user);
    }

    /// Drop token and user
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}
