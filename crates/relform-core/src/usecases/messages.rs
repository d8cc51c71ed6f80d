//! Mapping from raw API error messages to user-visible text

use std::collections::HashMap;
use std::time::Duration;

use crate::config::MessagesConfig;
use crate::ports::Message;

/// Text shown when the API gives no usable message
pub const DEFAULT_FALLBACK_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Maps raw API messages to the text the user sees
#[derive(Debug, Clone)]
pub struct ErrorMessages {
    overrides: HashMap<String, String>,
    fallback: String,
    duration: Duration,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            fallback: DEFAULT_FALLBACK_MESSAGE.to_string(),
            duration: crate::ports::DEFAULT_MESSAGE_DURATION,
        }
    }
}

impl ErrorMessages {
    pub fn from_config(config: &MessagesConfig) -> Self {
        Self {
            overrides: config.overrides.clone(),
            fallback: config.fallback.clone(),
            duration: Duration::from_secs(config.duration_secs),
        }
    }

    /// Adds or replaces an override
    pub fn with_override(mut self, raw: impl Into<String>, text: impl Into<String>) -> Self {
        self.overrides.insert(raw.into(), text.into());
        self
    }

    /// Configured override, else the raw message, else the fallback
    pub fn api_error_message(&self, raw: &str) -> String {
        let raw = raw.trim();
        if let Some(text) = self.overrides.get(raw) {
            return text.clone();
        }
        if raw.is_empty() {
            return self.fallback.clone();
        }
        raw.to_string()
    }

    /// Builds the notification for a raw API message
    pub fn to_message(&self, raw: &str) -> Message {
        Message::new(self.api_error_message(raw)).with_duration(self.duration)
    }
}
