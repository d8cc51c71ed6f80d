//! Adapter wiring shared by the commands
//!
//! Loads and validates the configuration, picks the session store backend,
//! and builds the retry guard and the form controller over the HTTP adapters.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use relform_api::{
    auth::HttpSessionRefresher,
    client::ApiClient,
    provider::HttpRelatedUserApi,
    session::{KeyringSessionStore, MemorySessionStore},
};
use relform_core::{
    config::Config,
    domain::Route,
    ports::ISessionStore,
    usecases::{ErrorMessages, FormSettings, RelatedUserForm, SessionRetryGuard},
};
use tracing::{debug, info};

use crate::adapters::{TerminalMessenger, TerminalNavigator};
use crate::output::OutputFormat;

/// Path of the configuration file: `--config` or the platform default
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path)
}

/// Loads the configuration; an explicit path must exist, the default may not
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = config_path(explicit);
    let config = match explicit {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&path),
    };
    debug!(config_path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Builds the session store selected by `session.backend`
pub fn session_store(config: &Config) -> Arc<dyn ISessionStore> {
    match config.session.backend.as_str() {
        "keyring" => Arc::new(KeyringSessionStore::new(config.session.keyring_user.clone())),
        _ => Arc::new(MemorySessionStore::new()),
    }
}

/// Wired adapters for one command invocation
pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn ISessionStore>,
    pub client: Arc<ApiClient>,
    pub messenger: Arc<TerminalMessenger>,
    pub navigator: Arc<TerminalNavigator>,
}

impl AppContext {
    pub fn load(explicit_config: Option<&Path>, format: OutputFormat) -> Result<Self> {
        let config = load_config(explicit_config)?;

        let errors = config.validate();
        if !errors.is_empty() {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            anyhow::bail!("Invalid configuration: {}", messages.join("; "));
        }

        let store = session_store(&config);
        let client = Arc::new(
            ApiClient::from_config(&config.api, store.clone())
                .context("Failed to create API client")?,
        );
        info!(base_url = %client.base_url(), backend = %config.session.backend, "API client ready");

        Ok(Self {
            config,
            store,
            client,
            messenger: Arc::new(TerminalMessenger::new(format)),
            navigator: Arc::new(TerminalNavigator::new()),
        })
    }

    pub fn guard(&self) -> Result<SessionRetryGuard> {
        let entry = Route::new(self.config.routes.entry.clone()).context("Invalid entry route")?;
        Ok(SessionRetryGuard::new(
            self.store.clone(),
            Arc::new(HttpSessionRefresher::new(self.client.clone())),
            self.navigator.clone(),
            self.messenger.clone(),
        )
        .with_entry_route(entry)
        .with_messages(ErrorMessages::from_config(&self.config.messages)))
    }

    pub fn form(&self) -> Result<RelatedUserForm> {
        let settings = FormSettings::from_config(&self.config).context("Invalid list route")?;
        Ok(RelatedUserForm::new(
            Arc::new(HttpRelatedUserApi::new(self.client.clone())),
            self.guard()?,
            self.messenger.clone(),
            self.navigator.clone(),
        )
        .with_settings(settings))
    }
}
