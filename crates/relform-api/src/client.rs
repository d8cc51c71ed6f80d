//! Authenticated HTTP client for the related-user backend
//!
//! Provides a typed HTTP client that attaches the session's bearer token,
//! unwraps the `{ "data": ... }` response envelope, and turns error bodies
//! into [`ApiError`] values that carry the backend's `logMessage` marker.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use relform_api::{client::ApiClient, session::MemorySessionStore};
//!
//! let store = Arc::new(MemorySessionStore::new());
//! let client = ApiClient::with_base_url("https://admin.example.com/api", store);
//! assert_eq!(client.base_url(), "https://admin.example.com/api");
//! ```

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use relform_core::{config::ApiConfig, ports::ISessionStore};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::ApiError;

// ============================================================================
// Response types
// ============================================================================

/// Success envelope wrapping every response payload
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) data: T,
}

/// Payload shape of list endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct ListResult<T> {
    #[serde(default = "Vec::new")]
    pub(crate) result: Vec<T>,
}

/// Error body returned with non-success statuses
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: Option<String>,
    log_message: Option<String>,
}

/// Builds an [`ApiError::Rejected`] from a failed response
fn rejection(status: StatusCode, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

    ApiError::Rejected {
        status: status.as_u16(),
        message,
        log_message: parsed.log_message,
    }
}

// ============================================================================
// ApiClient
// ============================================================================

/// HTTP client for backend API calls
///
/// The access token is read from the session store each time a request is
/// built, so a request replayed after a refresh carries the new token.
pub struct ApiClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests, without a trailing slash
    base_url: String,
    /// Source of the bearer token
    session: Arc<dyn ISessionStore>,
}

impl ApiClient {
    /// Creates a client with a per-request timeout
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<dyn ISessionStore>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url.into()),
            session,
        })
    }

    /// Creates a client from the `api` configuration section
    pub fn from_config(
        config: &ApiConfig,
        session: Arc<dyn ISessionStore>,
    ) -> anyhow::Result<Self> {
        Self::new(
            config.base_url.clone(),
            session,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Creates a client with default settings (useful for testing)
    pub fn with_base_url(base_url: impl Into<String>, session: Arc<dyn ISessionStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url.into()),
            session,
        }
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a request builder for the given method and path
    ///
    /// Prepends the base URL and adds the Authorization header when the
    /// session store holds credentials.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, &url);

        let credentials = self
            .session
            .get()
            .map_err(|e| ApiError::SessionUnavailable(format!("{e:#}")))?;

        Ok(match credentials {
            Some(credentials) => builder.bearer_auth(&credentials.access_token),
            None => {
                debug!(path, "No session credentials; sending unauthenticated request");
                builder
            }
        })
    }

    /// Sends a request and unwraps the `data` envelope of the response
    pub async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = rejection(status, &body);
            debug!(status = status.as_u16(), error = %err, "Request rejected");
            return Err(err);
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(envelope.data)
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}
