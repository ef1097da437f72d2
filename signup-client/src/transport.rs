// signup-client/src/transport.rs
use async_trait::async_trait;
use common::ErrorResponse;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// A request against the backend, independent of the HTTP client in use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub bearer: Option<String>,
    /// `application/x-www-form-urlencoded` body
    pub form: Option<String>,
}

impl ApiRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            bearer: None,
            form: None,
        }
    }

    pub fn post(url: Url) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(url)
        }
    }

    pub fn delete(url: Url) -> Self {
        Self {
            method: Method::Delete,
            ..Self::get(url)
        }
    }

    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    pub fn with_form(mut self, body: String) -> Self {
        self.form = Some(body);
        self
    }
}

/// Status and raw body of a backend answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// The `detail` field of an error body, if the body has one
    pub fn detail(&self) -> Option<String> {
        self.json::<ErrorResponse>().ok().and_then(|e| e.detail)
    }
}

/// Sends requests to the backend. Implementations never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// [`Transport`] over a shared `reqwest` connection pool
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(request.url.clone()),
            Method::Post => self.client.post(request.url.clone()),
            Method::Delete => self.client.delete(request.url.clone()),
        };

        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(form) = request.form {
            builder = builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(form);
        }

        tracing::debug!("{:?} {}", request.method, request.url.path());

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                TransportError::Unavailable(e.to_string())
            } else {
                TransportError::Request(e)
            }
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}

/// The backend URL is not usable as a base for endpoint paths
#[derive(Debug, thiserror::Error)]
pub enum BaseUrlError {
    #[error("invalid backend url: {0}")]
    Parse(#[from] url::ParseError),
    #[error("backend url {0} cannot carry a path")]
    NotHierarchical(String),
}

/// Endpoint URLs of the backend.
///
/// Path segments and query values are always percent-encoded here, so callers
/// pass raw activity names and emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrls {
    base: Url,
}

impl ApiUrls {
    pub fn new(base: &str) -> Result<Self, BaseUrlError> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(BaseUrlError::NotHierarchical(base.to_string()));
        }
        Ok(Self { base })
    }

    pub fn login(&self) -> Url {
        self.endpoint(&["login"])
    }

    pub fn verify_token(&self) -> Url {
        self.endpoint(&["verify-token"])
    }

    pub fn activities(&self) -> Url {
        self.endpoint(&["activities"])
    }

    pub fn signup(&self, activity: &str, email: &str) -> Url {
        self.with_email(self.endpoint(&["activities", activity, "signup"]), email)
    }

    pub fn unregister(&self, activity: &str, email: &str) -> Url {
        self.with_email(self.endpoint(&["activities", activity, "unregister"]), email)
    }

    /// `url` drops `.` and `..` segments, so those names have no endpoint
    pub fn is_path_segment(name: &str) -> bool {
        !matches!(name, "." | "..")
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        // `new` rejects bases without a path, so this always applies
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn with_email(&self, mut url: Url, email: &str) -> Url {
        url.query_pairs_mut().append_pair("email", email);
        url
    }
}
