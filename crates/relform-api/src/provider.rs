//! HttpRelatedUserApi - IRelatedUserApi implementation over HTTP
//!
//! Wraps the [`ApiClient`] to fulfil the [`IRelatedUserApi`] port contract.
//!
//! ## Design Notes
//!
//! - Every call builds a fresh request, so a call replayed by the retry
//!   guard picks up the refreshed bearer token.
//! - `save` and `update` are idempotent from the client's point of view:
//!   they send the full form value each time.

use std::sync::Arc;

use async_trait::async_trait;
use relform_core::domain::{
    PermissionGroup, PermissionGroupFilter, RecordId, RelatedUser, RelatedUserInput, RemoteError,
};
use relform_core::ports::IRelatedUserApi;
use reqwest::Method;
use tracing::debug;

use crate::client::{ApiClient, ListResult};

const RELATED_USER_PATH: &str = "/related-user";
const PERMISSION_GROUP_PATH: &str = "/permission-group";

/// Related-user resource backed by the REST API
pub struct HttpRelatedUserApi {
    client: Arc<ApiClient>,
}

impl HttpRelatedUserApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn record_path(id: &RecordId) -> String {
        format!("{}/{}", RELATED_USER_PATH, id)
    }
}

#[async_trait]
impl IRelatedUserApi for HttpRelatedUserApi {
    async fn find(&self, id: &RecordId) -> Result<RelatedUser, RemoteError> {
        debug!(%id, "Loading related user");
        let request = self.client.request(Method::GET, &Self::record_path(id))?;
        Ok(self.client.send(request).await?)
    }

    async fn save(&self, input: &RelatedUserInput) -> Result<RelatedUser, RemoteError> {
        debug!("Creating related user");
        let request = self
            .client
            .request(Method::POST, RELATED_USER_PATH)?
            .json(input);
        Ok(self.client.send(request).await?)
    }

    async fn update(
        &self,
        input: &RelatedUserInput,
        id: &RecordId,
    ) -> Result<RelatedUser, RemoteError> {
        debug!(%id, "Updating related user");
        let request = self
            .client
            .request(Method::PUT, &Self::record_path(id))?
            .json(input);
        Ok(self.client.send(request).await?)
    }

    async fn list_permission_groups(
        &self,
        filter: &PermissionGroupFilter,
    ) -> Result<Vec<PermissionGroup>, RemoteError> {
        debug!(term = filter.term(), "Searching permission groups");
        let request = self
            .client
            .request(Method::GET, PERMISSION_GROUP_PATH)?
            .query(&[("filter", filter.to_query_value())]);
        let list: ListResult<PermissionGroup> = self.client.send(request).await?;
        debug!(count = list.result.len(), "Permission groups received");
        Ok(list.result)
    }
}
