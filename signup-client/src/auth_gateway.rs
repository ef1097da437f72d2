// signup-client/src/auth_gateway.rs
use std::sync::Arc;

use common::models::User;
use common::{LoginResponse, VerifyResponse};
use url::form_urlencoded;

use crate::error::AuthError;
use crate::session_store::SessionStore;
use crate::transport::{ApiRequest, ApiUrls, Transport};

const LOGIN_FAILED: &str = "Login failed";
const LOGIN_RETRY: &str = "Login failed. Please try again.";
const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Token and identity returned by a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub token: String,
    pub user: User,
}

/// Login, token verification and logout against the backend
#[derive(Clone)]
pub struct AuthGateway {
    transport: Arc<dyn Transport>,
    urls: ApiUrls,
}

impl AuthGateway {
    pub fn new(transport: Arc<dyn Transport>, urls: ApiUrls) -> Self {
        Self { transport, urls }
    }

    /// Exchange credentials for a token. The caller persists the token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, AuthError> {
        let form = form_urlencoded::Serializer::new(String::new())
            .append_pair("email", email)
            .append_pair("password", password)
            .finish();
        let request = ApiRequest::post(self.urls.login()).with_form(form);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Login request failed: {}", e);
                return Err(AuthError::new(LOGIN_RETRY));
            }
        };

        if !response.is_success() {
            tracing::info!("Login rejected with status {}", response.status);
            return Err(AuthError::new(
                response.detail().unwrap_or_else(|| LOGIN_FAILED.to_string()),
            ));
        }

        let body: LoginResponse = response.json().map_err(|e| {
            tracing::error!("Unreadable login response: {}", e);
            AuthError::new(LOGIN_RETRY)
        })?;

        tracing::info!("Logged in as {}", body.user.email);
        Ok(LoginSuccess {
            token: body.token,
            user: body.user.into(),
        })
    }

    /// Check a stored token with the backend.
    ///
    /// Expired, malformed and unreachable all yield the same error: the caller
    /// treats the session as logged out.
    pub async fn verify(&self, token: &str) -> Result<User, AuthError> {
        let request = ApiRequest::get(self.urls.verify_token()).with_bearer(token);

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!("Token verification request failed: {}", e);
            AuthError::new(NOT_AUTHENTICATED)
        })?;

        if !response.is_success() {
            tracing::info!("Stored token rejected with status {}", response.status);
            return Err(AuthError::new(NOT_AUTHENTICATED));
        }

        match response.json::<VerifyResponse>() {
            Ok(VerifyResponse { valid: Some(false), .. }) => {
                tracing::info!("Backend reported stored token as invalid");
                Err(AuthError::new(NOT_AUTHENTICATED))
            }
            Ok(body) => Ok(body.user.into()),
            Err(e) => {
                tracing::warn!("Unreadable verification response: {}", e);
                Err(AuthError::new(NOT_AUTHENTICATED))
            }
        }
    }

    /// Local only: forget the persisted token. The caller clears its session.
    pub fn logout(&self, store: &SessionStore) {
        if store.clear().is_err() {
            tracing::warn!("Logged out but the stored token could not be removed");
        }
        tracing::info!("Logged out");
    }
}
