//! Session token refresh
//!
//! Exchanges a refresh token for a new credential pair through
//! `POST /auth/refresh-token`. Persisting the new pair is left to the caller
//! (the retry guard writes it to the session store).

use std::sync::Arc;

use async_trait::async_trait;
use relform_core::{
    domain::{Credentials, RemoteError},
    ports::ISessionRefresher,
};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::ApiClient;

/// Path of the token refresh endpoint
const REFRESH_PATH: &str = "/auth/refresh-token";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    auth_token: String,
    auth_refresh_token: String,
}

impl From<RefreshResponse> for Credentials {
    fn from(response: RefreshResponse) -> Self {
        Credentials::new(response.auth_token, response.auth_refresh_token)
    }
}

/// [`ISessionRefresher`] backed by the backend's refresh endpoint
pub struct HttpSessionRefresher {
    client: Arc<ApiClient>,
}

impl HttpSessionRefresher {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ISessionRefresher for HttpSessionRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, RemoteError> {
        debug!("Requesting new session tokens");

        let request = self
            .client
            .request(Method::POST, REFRESH_PATH)?
            .json(&RefreshRequest { refresh_token });
        let response: RefreshResponse = self.client.send(request).await?;

        info!("Session tokens refreshed");
        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_request_serialization() {
        let body = serde_json::to_value(RefreshRequest {
            refresh_token: "r-1",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "refreshToken": "r-1" }));
    }

    #[test]
    fn test_refresh_response_into_credentials() {
        let response: RefreshResponse =
            serde_json::from_str(r#"{"authToken":"a-2","authRefreshToken":"r-2"}"#).unwrap();
        let credentials: Credentials = response.into();
        assert_eq!(credentials, Credentials::new("a-2", "r-2"));
    }
}
