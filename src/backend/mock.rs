//! Mock lookup backend for testing
//!
//! Configure rows via builder methods, then hand it to a resolver. Every
//! query is counted so tests can assert which fallback steps ran.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ClusterRow, LookupBackend, Result, TenantRow};
use crate::error::BackendError;

/// The query shapes of [`LookupBackend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    ClusterById,
    TenantById,
    TenantNameById,
    ClusterNameById,
    PremiumNames,
}

/// Per-query call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct QueryCounts {
    counts: HashMap<Query, usize>,
}

impl QueryCounts {
    pub fn get(&self, query: Query) -> usize {
        self.counts.get(&query).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Mock backend.
///
/// # Example
/// ```ignore
/// let backend = MockBackend::new()
///     .with_tenant(TenantRow {
///         tenant_id: "7".into(),
///         tenant_name: "Acme".into(),
///         ..Default::default()
///     })
///     .failing(Query::ClusterById);
/// ```
#[derive(Default)]
pub struct MockBackend {
    clusters: HashMap<String, ClusterRow>,
    tenants: HashMap<String, TenantRow>,
    tenant_names: HashMap<String, String>,
    cluster_names: HashMap<String, String>,
    premium_names: HashMap<String, Vec<String>>,
    /// Queries that always return a transport error
    failing: HashSet<Query>,
    /// Panic on any query (for asserting cache hits)
    forbid_queries: bool,
    call_count: Mutex<QueryCounts>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster(mut self, row: ClusterRow) -> Self {
        self.clusters.insert(row.cluster_id.clone(), row);
        self
    }

    pub fn with_tenant(mut self, row: TenantRow) -> Self {
        self.tenants.insert(row.tenant_id.clone(), row);
        self
    }

    pub fn with_tenant_name(mut self, id: &str, name: &str) -> Self {
        self.tenant_names.insert(id.to_string(), name.to_string());
        self
    }

    pub fn with_cluster_name(mut self, id: &str, name: &str) -> Self {
        self.cluster_names.insert(id.to_string(), name.to_string());
        self
    }

    /// Premium detail names for `parent_id`, already ordered newest first
    pub fn with_premium_names(mut self, parent_id: &str, names: &[&str]) -> Self {
        self.premium_names.insert(
            parent_id.to_string(),
            names.iter().map(|n| n.to_string()).collect(),
        );
        self
    }

    pub fn failing(mut self, query: Query) -> Self {
        self.failing.insert(query);
        self
    }

    pub fn forbid_queries(mut self) -> Self {
        self.forbid_queries = true;
        self
    }

    pub fn call_counts(&self) -> QueryCounts {
        self.call_count.lock().unwrap().clone()
    }

    fn begin(&self, query: Query) -> Result<()> {
        assert!(
            !self.forbid_queries,
            "backend queried ({:?}) when a cache hit was expected",
            query
        );
        *self
            .call_count
            .lock()
            .unwrap()
            .counts
            .entry(query)
            .or_insert(0) += 1;

        if self.failing.contains(&query) {
            return Err(BackendError::Query(format!("{:?}: connection reset", query)));
        }
        Ok(())
    }
}

#[async_trait]
impl LookupBackend for MockBackend {
    async fn cluster_by_id(&self, id: &str) -> Result<Option<ClusterRow>> {
        self.begin(Query::ClusterById)?;
        Ok(self.clusters.get(id).cloned())
    }

    async fn tenant_by_id(&self, id: &str) -> Result<Option<TenantRow>> {
        self.begin(Query::TenantById)?;
        Ok(self.tenants.get(id).cloned())
    }

    async fn tenant_name_by_id(&self, id: &str) -> Result<Option<String>> {
        self.begin(Query::TenantNameById)?;
        Ok(self.tenant_names.get(id).cloned())
    }

    async fn cluster_name_by_id(&self, id: &str) -> Result<Option<String>> {
        self.begin(Query::ClusterNameById)?;
        Ok(self.cluster_names.get(id).cloned())
    }

    async fn premium_cluster_names_by_parent_id(&self, parent_id: &str) -> Result<Vec<String>> {
        self.begin(Query::PremiumNames)?;
        Ok(self
            .premium_names
            .get(parent_id)
            .cloned()
            .unwrap_or_default())
    }
}
