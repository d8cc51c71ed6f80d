//! Session-aware retry guard
//!
//! Wraps any remote operation so that an expired session is recovered
//! transparently: the guard refreshes the credentials through the
//! [`ISessionRefresher`] port and replays the operation exactly once.
//!
//! ## Outcomes of [`SessionRetryGuard::execute`]
//!
//! | First attempt | Refresh | Result |
//! |---|---|---|
//! | `Ok(v)` | not called | `Ok(v)` |
//! | `Other` failure | not called | `Err(GuardError::Remote)` |
//! | expired session | succeeds | whatever the second attempt returns |
//! | expired session | fails | session cleared, entry route, `Err(GuardError::RefreshFailed)` |
//!
//! A second expired-session failure after a successful refresh is returned
//! as-is. There is never a third attempt.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    domain::{classify, Credentials, ErrorClassification, RemoteError, Route},
    ports::{IMessenger, INavigator, ISessionRefresher, ISessionStore},
};

use super::messages::ErrorMessages;

/// Failure returned by a guarded operation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// The operation failed and was not (or no longer) retried
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The session could not be refreshed; the user has been signed out
    #[error("Session refresh failed: {message}")]
    RefreshFailed {
        /// Message of the refresh failure
        message: String,
    },
}

impl GuardError {
    /// Raw message of the underlying failure
    pub fn message(&self) -> &str {
        match self {
            GuardError::Remote(err) => &err.message,
            GuardError::RefreshFailed { message } => message,
        }
    }

    /// True when the guard already reported the failure and navigated away
    pub fn is_refresh_failure(&self) -> bool {
        matches!(self, GuardError::RefreshFailed { .. })
    }
}

/// Retries a remote operation once after refreshing an expired session
pub struct SessionRetryGuard {
    store: Arc<dyn ISessionStore>,
    refresher: Arc<dyn ISessionRefresher>,
    navigator: Arc<dyn INavigator>,
    messenger: Arc<dyn IMessenger>,
    messages: ErrorMessages,
    entry_route: Route,
}

impl SessionRetryGuard {
    /// Creates a guard with the default entry route (`/`)
    pub fn new(
        store: Arc<dyn ISessionStore>,
        refresher: Arc<dyn ISessionRefresher>,
        navigator: Arc<dyn INavigator>,
        messenger: Arc<dyn IMessenger>,
    ) -> Self {
        Self {
            store,
            refresher,
            navigator,
            messenger,
            messages: ErrorMessages::default(),
            entry_route: Route::entry(),
        }
    }

    /// Sets the route used after a failed refresh
    pub fn with_entry_route(mut self, route: Route) -> Self {
        self.entry_route = route;
        self
    }

    /// Sets the mapping used for the refresh failure notification
    pub fn with_messages(mut self, messages: ErrorMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn entry_route(&self) -> &Route {
        &self.entry_route
    }

    /// Runs `operation`, recovering once from an expired session.
    ///
    /// `operation` may be invoked twice and must be safe to replay.
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T, GuardError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if let ErrorClassification::Other(message) = classify(&error) {
            debug!(error = %message, "Remote operation failed");
            return Err(GuardError::Remote(error));
        }

        info!("Session expired, refreshing credentials");
        self.refresh_session().await?;

        debug!("Replaying operation after session refresh");
        let result = operation().await;
        if let Err(ref err) = result {
            warn!(error = %err, expired = err.is_expired_session(), "Replayed operation failed");
        }
        result.map_err(GuardError::Remote)
    }

    /// Refreshes and persists the credentials, or ends the session
    async fn refresh_session(&self) -> Result<(), GuardError> {
        match self.try_refresh().await {
            Ok(()) => {
                info!("Session refreshed");
                Ok(())
            }
            Err(message) => {
                self.end_session(&message).await;
                Err(GuardError::RefreshFailed { message })
            }
        }
    }

    async fn try_refresh(&self) -> Result<(), String> {
        let current = self
            .store
            .get()
            .map_err(|e| format!("Failed to read session: {e}"))?;
        let Some(Credentials { refresh_token, .. }) = current else {
            return Err("No active session".to_string());
        };

        let credentials = self
            .refresher
            .refresh(&refresh_token)
            .await
            .map_err(|e| e.message)?;

        self.store
            .set(&credentials)
            .map_err(|e| format!("Failed to store refreshed session: {e}"))
    }

    /// Reports the failure, clears the session and returns to the entry route
    async fn end_session(&self, message: &str) {
        warn!(error = %message, "Session refresh failed, signing out");

        if let Err(e) = self.messenger.report(&self.messages.to_message(message)).await {
            warn!(error = %e, "Failed to report refresh failure");
        }
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear session");
        }
        if let Err(e) = self.navigator.navigate(&self.entry_route).await {
            warn!(error = %e, route = %self.entry_route, "Failed to navigate to entry route");
        }
    }
}
