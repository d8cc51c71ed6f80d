//! Domain error types
//!
//! This module defines the error types shared across the core:
//! - [`DomainError`] for validation of domain values
//! - [`RemoteError`] for failures reported by remote calls, tagged with a
//!   [`RemoteErrorKind`] at the transport boundary
//! - [`ErrorClassification`] and [`classify`], which decide whether a failure
//!   is recoverable through a session refresh

use thiserror::Error;

/// Marker the remote API places in an error's `logMessage` field when the
/// access token is no longer valid.
pub const EXPIRED_SESSION_MARKER: &str = "jwt expired";

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// ID parsing error
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Route is empty or malformed
    #[error("Invalid route: {0}")]
    InvalidRoute(String),
}

// ============================================================================
// RemoteError
// ============================================================================

/// Structured tag attached to every remote failure by the remote-call layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The caller's access token has expired
    ExpiredSession,
    /// Any other failure (HTTP status, transport, decoding)
    Other,
}

impl RemoteErrorKind {
    /// Derives the kind from the `logMessage` field of an API error body
    pub fn from_log_message(log_message: Option<&str>) -> Self {
        match log_message {
            Some(EXPIRED_SESSION_MARKER) => RemoteErrorKind::ExpiredSession,
            _ => RemoteErrorKind::Other,
        }
    }
}

/// A failure returned by a remote operation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteError {
    /// Classification attached at the boundary
    pub kind: RemoteErrorKind,
    /// Message suitable for mapping to a user-visible notification
    pub message: String,
}

impl RemoteError {
    /// Creates an error of the given kind
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an expired-session error
    pub fn expired_session(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::ExpiredSession, message)
    }

    /// Creates a non-recoverable error
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Other, message)
    }

    /// Returns true if this failure can be recovered by refreshing the session
    pub fn is_expired_session(&self) -> bool {
        self.kind == RemoteErrorKind::ExpiredSession
    }
}

// ============================================================================
// ErrorClassification
// ============================================================================

/// Outcome of inspecting a remote failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorClassification {
    /// Recoverable through one refresh and retry
    ExpiredSession,
    /// Propagated to the caller unchanged
    Other(String),
}

/// Classifies a remote failure by its structured kind
pub fn classify(error: &RemoteError) -> ErrorClassification {
    match error.kind {
        RemoteErrorKind::ExpiredSession => ErrorClassification::ExpiredSession,
        RemoteErrorKind::Other => ErrorClassification::Other(error.message.clone()),
    }
}
