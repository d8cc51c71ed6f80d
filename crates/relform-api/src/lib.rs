//! Relform API - HTTP adapter for the related-user backend
//!
//! Provides async implementations of the core ports:
//! - Related-user CRUD and permission group search
//! - Session token refresh
//! - Session credential stores (process memory, system keyring)
//!
//! ## Modules
//!
//! - [`client`] - Authenticated HTTP client and response envelope handling
//! - [`provider`] - `IRelatedUserApi` implementation
//! - [`auth`] - `ISessionRefresher` implementation
//! - [`session`] - `ISessionStore` implementations

pub mod auth;
pub mod client;
pub mod provider;
pub mod session;

use relform_core::domain::{RemoteError, RemoteErrorKind};
use thiserror::Error;

/// Errors that can occur when communicating with the backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status
    #[error("{message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// User-facing message from the error body
        message: String,
        /// Diagnostic marker from the error body (`logMessage`)
        log_message: Option<String>,
    },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The response body could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The session store could not be read
    #[error("Session unavailable: {0}")]
    SessionUnavailable(String),
}

impl From<ApiError> for RemoteError {
    fn from(err: ApiError) -> Self {
        let kind = match &err {
            ApiError::Rejected { log_message, .. } => {
                RemoteErrorKind::from_log_message(log_message.as_deref())
            }
            _ => RemoteErrorKind::Other,
        };
        RemoteError::new(kind, err.to_string())
    }
}
