// signup-client/src/activity_repository.rs
use std::sync::Arc;

use common::models::Catalog;
use common::MessageResponse;

use crate::error::{ActionError, FetchError};
use crate::transport::{ApiRequest, ApiUrls, Transport};

const ACTION_FAILED: &str = "An error occurred";
const SIGNUP_RETRY: &str = "Failed to register student. Please try again.";
const UNREGISTER_RETRY: &str = "Failed to unregister. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Signup,
    Unregister,
}

impl Mutation {
    fn retry_message(self) -> &'static str {
        match self {
            Mutation::Signup => SIGNUP_RETRY,
            Mutation::Unregister => UNREGISTER_RETRY,
        }
    }
}

/// Owns the in-memory catalog snapshot and performs participant mutations.
///
/// Mutations never touch the snapshot; callers re-fetch after a success.
pub struct ActivityRepository {
    transport: Arc<dyn Transport>,
    urls: ApiUrls,
    catalog: Catalog,
}

impl ActivityRepository {
    pub fn new(transport: Arc<dyn Transport>, urls: ApiUrls) -> Self {
        Self {
            transport,
            urls,
            catalog: Catalog::new(),
        }
    }

    /// Current snapshot; empty until the first successful fetch
    pub fn snapshot(&self) -> &Catalog {
        &self.catalog
    }

    /// Replace the snapshot with the backend's catalog.
    ///
    /// On any failure the previous snapshot stays installed.
    pub async fn fetch_all(&mut self) -> Result<&Catalog, FetchError> {
        let response = self
            .transport
            .send(ApiRequest::get(self.urls.activities()))
            .await
            .map_err(|e| {
                tracing::error!("Error fetching activities: {}", e);
                e
            })?;

        if !response.is_success() {
            tracing::error!("Activities request returned status {}", response.status);
            return Err(FetchError::Status(response.status));
        }

        let catalog: Catalog = response.json().map_err(|e| {
            tracing::error!("Malformed activities response: {}", e);
            e
        })?;

        tracing::debug!("Installed catalog with {} activities", catalog.len());
        self.catalog = catalog;
        Ok(&self.catalog)
    }

    pub async fn signup(&self, activity: &str, email: &str, token: &str) -> Result<String, ActionError> {
        self.mutate(Mutation::Signup, activity, email, token).await
    }

    pub async fn unregister(&self, activity: &str, email: &str, token: &str) -> Result<String, ActionError> {
        self.mutate(Mutation::Unregister, activity, email, token).await
    }

    async fn mutate(
        &self,
        mutation: Mutation,
        activity: &str,
        email: &str,
        token: &str,
    ) -> Result<String, ActionError> {
        if token.is_empty() {
            tracing::warn!("{:?} of {} refused without a token", mutation, email);
            return Err(ActionError::Unauthorized);
        }
        if !ApiUrls::is_path_segment(activity) {
            tracing::warn!("{:?} refused for unaddressable activity {:?}", mutation, activity);
            return Err(ActionError::InvalidActivity(activity.to_string()));
        }

        let request = match mutation {
            Mutation::Signup => ApiRequest::post(self.urls.signup(activity, email)),
            Mutation::Unregister => ApiRequest::delete(self.urls.unregister(activity, email)),
        }
        .with_bearer(token);

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::error!("{:?} request failed: {}", mutation, e);
            ActionError::Failed {
                message: mutation.retry_message().to_string(),
            }
        })?;

        if !response.is_success() {
            let message = response.detail().unwrap_or_else(|| ACTION_FAILED.to_string());
            tracing::info!(
                "{:?} of {} for {} rejected ({}): {}",
                mutation, email, activity, response.status, message
            );
            return Err(ActionError::Rejected {
                status: response.status,
                message,
            });
        }

        let body: MessageResponse = response.json().map_err(|e| {
            tracing::error!("Unreadable {:?} response: {}", mutation, e);
            ActionError::Failed {
                message: mutation.retry_message().to_string(),
            }
        })?;

        tracing::info!("{:?} of {} for {} applied", mutation, email, activity);
        Ok(body.message)
    }
}
