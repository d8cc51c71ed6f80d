//! Session credentials
//!
//! The credential pair issued on login and replaced on every successful
//! refresh. Storage is handled by the [`ISessionStore`] port.
//!
//! [`ISessionStore`]: crate::ports::ISessionStore

use serde::{Deserialize, Serialize};

/// Access/refresh token pair for the remote API
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Bearer token for authenticating API requests
    pub access_token: String,
    /// Token exchanged for a new pair when the access token expires
    pub refresh_token: String,
}

impl Credentials {
    /// Creates a credential pair
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Tokens never end up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}
