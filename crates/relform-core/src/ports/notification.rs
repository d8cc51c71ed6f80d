//! Messaging and navigation ports (driven/secondary ports)
//!
//! This module defines the interfaces for surfacing short transient
//! notifications to the user and for moving the user between application
//! routes.
//!
//! ## Design Notes
//!
//! - Both are fire-and-forget; the caller does not wait for user interaction.
//! - Failures are returned as `anyhow::Result` because delivery is
//!   adapter-specific. Use cases log them and carry on.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::Route;

/// Default time a message stays on screen
pub const DEFAULT_MESSAGE_DURATION: Duration = Duration::from_secs(4);

/// A transient user-visible notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Text shown to the user
    pub text: String,
    /// How long the message stays visible
    pub duration: Duration,
}

impl Message {
    /// Creates a message with the default duration
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: DEFAULT_MESSAGE_DURATION,
        }
    }

    /// Sets the display duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Port trait for user-visible notifications (snackbar/toast)
#[async_trait::async_trait]
pub trait IMessenger: Send + Sync {
    /// Surfaces a message to the user
    async fn report(&self, message: &Message) -> anyhow::Result<()>;
}

/// Port trait for application navigation
#[async_trait::async_trait]
pub trait INavigator: Send + Sync {
    /// Moves the user to `route`
    async fn navigate(&self, route: &Route) -> anyhow::Result<()>;
}
