//! Domain entities and business logic
//!
//! This module contains the core domain types:
//! - Newtypes for record identifiers and routes
//! - Session credentials
//! - Related user records and the permission group selection
//! - Error types and remote failure classification

pub mod errors;
pub mod newtypes;
pub mod related_user;
pub mod session;

// Re-export commonly used types
pub use errors::{
    classify, DomainError, ErrorClassification, RemoteError, RemoteErrorKind,
    EXPIRED_SESSION_MARKER,
};
pub use newtypes::{RecordId, Route};
pub use related_user::{
    PermissionGroup, PermissionGroupChip, PermissionGroupFilter, PermissionGroupSelection,
    RelatedUser, RelatedUserInput,
};
pub use session::Credentials;
