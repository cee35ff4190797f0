//! Resolved name records

use serde::{Deserialize, Serialize};

/// What kind of backend entity an identifier resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Cluster,
    Tenant,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Cluster => "cluster",
            RecordKind::Tenant => "tenant",
        }
    }
}

/// Display data for one identifier.
///
/// Records are never mutated once built; the cache replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Entity kind, unset for unresolved identifiers
    #[serde(rename = "type")]
    pub kind: Option<RecordKind>,

    /// The identifier as supplied by the caller
    pub id: String,

    /// Display name
    pub name: String,

    /// Owning tenant, only for clusters with tenant linkage
    #[serde(rename = "tenantId", skip_serializing_if = "Option::is_none", default)]
    pub tenant_id: Option<String>,

    #[serde(rename = "tenantName", skip_serializing_if = "Option::is_none", default)]
    pub tenant_name: Option<String>,
}

impl NameRecord {
    /// The `{id, name: id}` record used whenever a name cannot be resolved.
    pub fn unresolved(id: &str) -> Self {
        Self {
            kind: None,
            id: id.to_string(),
            name: id.to_string(),
            tenant_id: None,
            tenant_name: None,
        }
    }

    pub fn cluster(
        id: &str,
        name: impl Into<String>,
        tenant_id: Option<String>,
        tenant_name: Option<String>,
    ) -> Self {
        Self {
            kind: Some(RecordKind::Cluster),
            id: id.to_string(),
            name: name.into(),
            tenant_id,
            tenant_name,
        }
    }

    pub fn tenant(id: &str, name: impl Into<String>) -> Self {
        Self {
            kind: Some(RecordKind::Tenant),
            id: id.to_string(),
            name: name.into(),
            tenant_id: None,
            tenant_name: None,
        }
    }
}
