//! Session ports (driven/secondary ports)
//!
//! - [`ISessionStore`] holds the persisted credential pair.
//! - [`ISessionRefresher`] exchanges a refresh token for a new pair.
//!
//! ## Design Notes
//!
//! - The store is synchronous: every implementation (process memory, system
//!   keyring) answers without awaiting network I/O.
//! - The refresher returns a [`RemoteError`] like every other remote call so
//!   its message can be surfaced through the same mapping.

use crate::domain::{Credentials, RemoteError};

/// Port trait for the persisted session credentials
///
/// The retry guard is the only writer inside the core. Adapters that send
/// authenticated requests read from the same store at send time.
pub trait ISessionStore: Send + Sync {
    /// Returns the current credentials, `None` when no session exists
    fn get(&self) -> anyhow::Result<Option<Credentials>>;

    /// Replaces the stored credentials
    fn set(&self, credentials: &Credentials) -> anyhow::Result<()>;

    /// Erases all persisted session state
    fn clear(&self) -> anyhow::Result<()>;
}

/// Port trait for the external token refresh call
#[async_trait::async_trait]
pub trait ISessionRefresher: Send + Sync {
    /// Exchanges `refresh_token` for a new credential pair
    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, RemoteError>;
}
