//! Session credential stores
//!
//! ## Components
//!
//! - [`MemorySessionStore`] - Credentials held in process memory
//! - [`KeyringSessionStore`] - Credentials stored in the system keyring

use std::sync::Mutex;

use anyhow::{Context, Result};
use relform_core::{domain::Credentials, ports::ISessionStore};
use tracing::{debug, info};

/// Keyring service name for storing credentials
const KEYRING_SERVICE: &str = "relform";

// ============================================================================
// MemorySessionStore
// ============================================================================

/// Keeps the credential pair in process memory
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    credentials: Mutex<Option<Credentials>>,
}

impl MemorySessionStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `credentials`
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: Mutex::new(Some(credentials)),
        }
    }
}

impl ISessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<Credentials>> {
        let guard = self
            .credentials
            .lock()
            .map_err(|_| anyhow::anyhow!("Session store lock poisoned"))?;
        Ok(guard.clone())
    }

    fn set(&self, credentials: &Credentials) -> Result<()> {
        let mut guard = self
            .credentials
            .lock()
            .map_err(|_| anyhow::anyhow!("Session store lock poisoned"))?;
        *guard = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .credentials
            .lock()
            .map_err(|_| anyhow::anyhow!("Session store lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

// ============================================================================
// KeyringSessionStore
// ============================================================================

/// Stores the credential pair in the system keyring
///
/// Uses the `keyring` crate to store credentials in the OS credential
/// store (e.g., GNOME Keyring, KDE Wallet, macOS Keychain). Credentials are
/// serialized as JSON under the service name "relform" and the configured
/// username.
#[derive(Debug, Clone)]
pub struct KeyringSessionStore {
    username: String,
}

impl KeyringSessionStore {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(KEYRING_SERVICE, &self.username)
            .context("Failed to create keyring entry")
    }
}

impl ISessionStore for KeyringSessionStore {
    fn get(&self) -> Result<Option<Credentials>> {
        match self.entry()?.get_password() {
            Ok(json) => {
                let credentials: Credentials = serde_json::from_str(&json)
                    .context("Failed to deserialize credentials from keyring")?;
                debug!(user = %self.username, "Loaded credentials from keyring");
                Ok(Some(credentials))
            }
            Err(keyring::Error::NoEntry) => {
                debug!(user = %self.username, "No credentials found in keyring");
                Ok(None)
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to read from keyring")),
        }
    }

    fn set(&self, credentials: &Credentials) -> Result<()> {
        let json = serde_json::to_string(credentials).context("Failed to serialize credentials")?;
        self.entry()?
            .set_password(&json)
            .context("Failed to store credentials in keyring")?;
        debug!(user = %self.username, "Stored credentials in keyring");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) => {
                info!(user = %self.username, "Cleared credentials from keyring");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => {
                debug!(user = %self.username, "No credentials to clear");
                Ok(())
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to delete from keyring")),
        }
    }
}
