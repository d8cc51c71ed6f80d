//! Related user record and permission group types
//!
//! Wire-shaped DTOs for the related-user resource plus the tag-style
//! permission group selection kept by the form controller.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::newtypes::RecordId;

/// A permission group option, as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGroup {
    /// Remote identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
}

impl PermissionGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A related user record as returned by `find`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedUser {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    /// Selected permission group ids
    #[serde(default)]
    pub permission_group_id: Vec<String>,
    /// Populated permission groups (id and name)
    #[serde(default)]
    pub permission_group: Vec<PermissionGroup>,
    /// Single populated group the API attaches for display lookups
    #[serde(rename = "__permissionGroup", default)]
    pub populated_permission_group: Option<PermissionGroup>,
}

/// The form value sent on save and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedUserInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub unique_id: Option<String>,
    pub business_name: Option<String>,
    pub permission_group_id: Vec<String>,
}

impl RelatedUserInput {
    /// Builds the form value from a loaded record
    pub fn from_record(record: &RelatedUser) -> Self {
        Self {
            email: record.email.clone(),
            name: record.name.clone(),
            unique_id: record.unique_id.clone(),
            business_name: record.business_name.clone(),
            permission_group_id: record.permission_group_id.clone(),
        }
    }
}

// ============================================================================
// Chips
// ============================================================================

/// One selected permission group in the tag-style input
///
/// Chips typed by hand carry no id: they are displayed but never submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGroupChip {
    pub label: String,
    pub id: Option<String>,
}

/// Ordered chip selection; the label list and the id list never drift apart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionGroupSelection {
    chips: Vec<PermissionGroupChip>,
}

impl PermissionGroupSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the selection from populated groups
    pub fn from_groups(groups: &[PermissionGroup]) -> Self {
        Self {
            chips: groups
                .iter()
                .map(|g| PermissionGroupChip {
                    label: g.name.clone(),
                    id: Some(g.id.clone()),
                })
                .collect(),
        }
    }

    /// Appends a chip selected from the autocomplete options
    pub fn push_option(&mut self, group: &PermissionGroup) {
        self.chips.push(PermissionGroupChip {
            label: group.name.clone(),
            id: Some(group.id.clone()),
        });
    }

    /// Appends a label-only chip
    pub fn push_label(&mut self, label: impl Into<String>) {
        self.chips.push(PermissionGroupChip {
            label: label.into(),
            id: None,
        });
    }

    /// Removes the first chip with the given label. Returns the removed chip.
    pub fn remove_label(&mut self, label: &str) -> Option<PermissionGroupChip> {
        let index = self.chips.iter().position(|c| c.label == label)?;
        Some(self.chips.remove(index))
    }

    /// Labels in display order
    pub fn labels(&self) -> Vec<&str> {
        self.chips.iter().map(|c| c.label.as_str()).collect()
    }

    /// Ids to submit, in display order
    pub fn ids(&self) -> Vec<String> {
        self.chips.iter().filter_map(|c| c.id.clone()).collect()
    }

    pub fn chips(&self) -> &[PermissionGroupChip] {
        &self.chips
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    pub fn clear(&mut self) {
        self.chips.clear();
    }
}

// ============================================================================
// PermissionGroupFilter
// ============================================================================

/// Case-insensitive `like` filter over one or more permission group fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGroupFilter {
    fields: Vec<String>,
    term: String,
}

impl PermissionGroupFilter {
    /// Creates a filter; `None` when the term or the field list is empty
    pub fn new(fields: &[String], term: &str) -> Option<Self> {
        let fields: Vec<String> = fields
            .iter()
            .filter(|f| !f.is_empty() && f.as_str() != "undefined")
            .cloned()
            .collect();
        if term.is_empty() || fields.is_empty() {
            return None;
        }
        Some(Self {
            fields,
            term: term.to_string(),
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// JSON document sent in the `filter` query parameter
    pub fn to_query_value(&self) -> String {
        let clauses: Vec<serde_json::Value> = self
            .fields
            .iter()
            .map(|field| {
                let mut clause = serde_json::Map::new();
                clause.insert(
                    field.clone(),
                    json!({ "like": self.term, "options": "i" }),
                );
                serde_json::Value::Object(clause)
            })
            .collect();
        json!({ "or": clauses }).to_string()
    }
}

/// Convenience for callers holding a [`RecordId`]
impl RelatedUser {
    pub fn record_id(&self) -> Option<RecordId> {
        self.id.clone().and_then(|id| RecordId::new(id).ok())
    }
}
