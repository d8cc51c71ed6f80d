//! Configuration module for relform.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for relform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub routes: RoutesConfig,
    pub messages: MessagesConfig,
    pub logging: LoggingConfig,
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Permission group fields matched by the autocomplete filter.
    pub search_fields: Vec<String>,
}

/// Where the session credentials live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// `memory` or `keyring`.
    pub backend: String,
    /// Keyring username used when `backend` is `keyring`.
    pub keyring_user: String,
}

/// Application routes used for navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Entry route shown after the session ends.
    pub entry: String,
    /// Related-user list shown after a successful submit.
    pub list: String,
}

/// User-visible message settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Seconds a message stays on screen.
    pub duration_secs: u64,
    /// Text used when the API returns no message.
    pub fallback: String,
    /// Raw API message → text shown to the user.
    pub overrides: HashMap<String, String>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/relform/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("relform")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Config::default()
// ---------------------------------------------------------------------------

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_secs: 30,
            search_fields: vec!["name".to_string()],
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            keyring_user: "default".to_string(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            entry: "/".to_string(),
            list: "main/related-user".to_string(),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            duration_secs: 4,
            fallback: crate::usecases::messages::DEFAULT_FALLBACK_MESSAGE.to_string(),
            overrides: HashMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"api.timeout_secs"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid values for `session.backend`.
const VALID_SESSION_BACKENDS: &[&str] = &["memory", "keyring"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- api ---
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            errors.push(ValidationError {
                field: "api.base_url".into(),
                message: format!("must be an http(s) URL, got '{}'", self.api.base_url),
            });
        }
        if self.api.timeout_secs == 0 {
            errors.push(ValidationError {
                field: "api.timeout_secs".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.api.search_fields.iter().all(|f| f.trim().is_empty()) {
            errors.push(ValidationError {
                field: "api.search_fields".into(),
                message: "must name at least one field".into(),
            });
        }

        // --- session ---
        if !VALID_SESSION_BACKENDS.contains(&self.session.backend.as_str()) {
            errors.push(ValidationError {
                field: "session.backend".into(),
                message: format!(
                    "invalid backend '{}'; valid options: {}",
                    self.session.backend,
                    VALID_SESSION_BACKENDS.join(", ")
                ),
            });
        }
        if self.session.backend == "keyring" && self.session.keyring_user.trim().is_empty() {
            errors.push(ValidationError {
                field: "session.keyring_user".into(),
                message: "must not be empty when backend is 'keyring'".into(),
            });
        }

        // --- routes ---
        let routes = [
            ("routes.entry", &self.routes.entry),
            ("routes.list", &self.routes.list),
        ];
        for (field, route) in routes {
            if let Err(e) = crate::domain::Route::new(route.clone()) {
                errors.push(ValidationError {
                    field: field.into(),
                    message: e.to_string(),
                });
            }
        }

        // --- messages ---
        if self.messages.duration_secs == 0 {
            errors.push(ValidationError {
                field: "messages.duration_secs".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use relform_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .api_base_url("https://admin.example.com/api")
///     .session_backend("keyring")
///     .logging_level("debug")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- api ---

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api.base_url = url.into();
        self
    }

    pub fn api_timeout_secs(mut self, seconds: u64) -> Self {
        self.config.api.timeout_secs = seconds;
        self
    }

    pub fn api_search_fields(mut self, fields: Vec<String>) -> Self {
        self.config.api.search_fields = fields;
        self
    }

    // --- session ---

    pub fn session_backend(mut self, backend: impl Into<String>) -> Self {
        self.config.session.backend = backend.into();
        self
    }

    pub fn session_keyring_user(mut self, user: impl Into<String>) -> Self {
        self.config.session.keyring_user = user.into();
        self
    }

    // --- routes ---

    pub fn routes_entry(mut self, route: impl Into<String>) -> Self {
        self.config.routes.entry = route.into();
        self
    }

    pub fn routes_list(mut self, route: impl Into<String>) -> Self {
        self.config.routes.list = route.into();
        self
    }

    // --- messages ---

    pub fn messages_duration_secs(mut self, seconds: u64) -> Self {
        self.config.messages.duration_secs = seconds;
        self
    }

    pub fn messages_override(mut self, raw: impl Into<String>, text: impl Into<String>) -> Self {
        self.config.messages.overrides.insert(raw.into(), text.into());
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
