//! Lookup backend
//!
//! Read-only access to the relational store that owns cluster and tenant
//! records. The resolver only ever talks to the [`LookupBackend`] trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::BackendError;

#[cfg(test)]
pub mod mock;
pub mod sqlite;

#[cfg(test)]
pub use mock::{MockBackend, Query};
pub use sqlite::SqliteBackend;

pub type Result<T> = std::result::Result<T, BackendError>;

/// Deploy classification whose clusters are named through premium detail rows
pub const NEXTGEN_HOST: &str = "nextgen-host";

/// Query shapes the resolver issues against the backend.
///
/// `Ok(None)` (or an empty list) means "no matching row"; `Err` is a
/// transport or decoding failure.
#[async_trait]
pub trait LookupBackend: Send + Sync {
    /// Full cluster record, with tenant name resolved through the tenants table
    async fn cluster_by_id(&self, id: &str) -> Result<Option<ClusterRow>>;

    /// Full tenant record
    async fn tenant_by_id(&self, id: &str) -> Result<Option<TenantRow>>;

    /// Bare tenant name
    async fn tenant_name_by_id(&self, id: &str) -> Result<Option<String>>;

    /// Bare cluster name
    async fn cluster_name_by_id(&self, id: &str) -> Result<Option<String>>;

    /// Non-empty names of premium cluster details under `parent_id`, newest first
    async fn premium_cluster_names_by_parent_id(&self, parent_id: &str) -> Result<Vec<String>>;
}

/// Cluster record as stored in the backend.
///
/// Only id, name, tenant linkage and deploy type drive resolution; the rest
/// is carried through unread.
#[allow(dead_code)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterRow {
    pub cluster_id: String,
    pub cluster_name: String,
    pub tenant_id: String,
    pub tenant_name: String,
    pub deploy_type: String,
    pub version: String,
    pub cluster_lifecycle: String,
    pub creation_duration: String,
    pub tenant_plan: String,
    pub provider: String,
    pub region: String,
    pub project_id: String,
    pub org_id: String,
    pub cluster_type: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ClusterRow {
    pub fn is_nextgen_host(&self) -> bool {
        self.deploy_type == NEXTGEN_HOST
    }
}

/// Tenant record as stored in the backend
#[allow(dead_code)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantRow {
    pub tenant_id: String,
    pub tenant_name: String,
    pub kind: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
