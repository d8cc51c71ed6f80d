//! Related user API port (driven/secondary port)
//!
//! The remote CRUD surface the form controller talks to.
//!
//! ## Design Notes
//!
//! - Every method returns [`RemoteError`] so the retry guard can recognise
//!   an expired session with a pattern match.
//! - All methods must be safe to invoke twice in a row: the guard replays an
//!   operation once after a successful refresh.

use crate::domain::{
    PermissionGroup, PermissionGroupFilter, RecordId, RelatedUser, RelatedUserInput, RemoteError,
};

/// Port trait for the related-user resource
#[async_trait::async_trait]
pub trait IRelatedUserApi: Send + Sync {
    /// Loads the record with the given id
    async fn find(&self, id: &RecordId) -> Result<RelatedUser, RemoteError>;

    /// Creates a new record
    async fn save(&self, input: &RelatedUserInput) -> Result<RelatedUser, RemoteError>;

    /// Updates the record with the given id
    async fn update(
        &self,
        input: &RelatedUserInput,
        id: &RecordId,
    ) -> Result<RelatedUser, RemoteError>;

    /// Lists permission groups matching the filter
    async fn list_permission_groups(
        &self,
        filter: &PermissionGroupFilter,
    ) -> Result<Vec<PermissionGroup>, RemoteError>;
}
