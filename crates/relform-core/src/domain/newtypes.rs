//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for record identifiers and navigation routes.
//! Each newtype ensures data validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// RecordId
// ============================================================================

/// Identifier of a record on the remote API (the `_id` field)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Create a new RecordId
    ///
    /// # Errors
    /// Returns error if the ID is empty or contains characters that would
    /// break a URL path segment
    pub fn new(id: String) -> Result<Self, DomainError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidId("Record ID cannot be empty".to_string()));
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidId(format!(
                "Record ID contains invalid characters: {trimmed}"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for RecordId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

// ============================================================================
// Route
// ============================================================================

/// An application route the navigator can move to (e.g. `/` or `main/related-user`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Route(String);

impl Route {
    /// Create a new Route
    ///
    /// # Errors
    /// Returns error if the route is empty or contains whitespace
    pub fn new(route: String) -> Result<Self, DomainError> {
        if route.is_empty() {
            return Err(DomainError::InvalidRoute("Route cannot be empty".to_string()));
        }
        if route.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidRoute(format!(
                "Route contains whitespace: {route}"
            )));
        }
        Ok(Self(route))
    }

    /// The application entry route
    #[must_use]
    pub fn entry() -> Self {
        Self("/".to_string())
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Route {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for Route {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.0
    }
}
