//! Fallback chain of name sources
//!
//! Each source answers "what is the name of this id" from one query shape.
//! The resolver walks them in order and takes the first answer; an error
//! from a source counts the same as no answer.

use std::sync::Arc;

use async_trait::async_trait;

use super::NameRecord;
use crate::backend::{LookupBackend, Result};

/// One step of the fallback chain
#[async_trait]
pub trait NameSource: Send + Sync {
    /// Label used in logs
    fn label(&self) -> &'static str;

    /// `Ok(None)` when this source has nothing usable for `id`
    async fn lookup(&self, id: &str) -> Result<Option<NameRecord>>;
}

/// The fixed resolution order: cluster, tenant, tenant name, cluster name.
pub fn default_chain(backend: Arc<dyn LookupBackend>) -> Vec<Box<dyn NameSource>> {
    vec![
        Box::new(ClusterSource {
            backend: backend.clone(),
        }),
        Box::new(TenantSource {
            backend: backend.clone(),
        }),
        Box::new(TenantNameSource {
            backend: backend.clone(),
        }),
        Box::new(ClusterNameSource { backend }),
    ]
}

/// Full cluster record, with premium-detail naming for nextgen hosts
pub struct ClusterSource {
    backend: Arc<dyn LookupBackend>,
}

#[async_trait]
impl NameSource for ClusterSource {
    fn label(&self) -> &'static str {
        "cluster"
    }

    async fn lookup(&self, id: &str) -> Result<Option<NameRecord>> {
        let Some(cluster) = self.backend.cluster_by_id(id).await? else {
            return Ok(None);
        };

        let mut name = cluster.cluster_name.clone();
        if cluster.is_nextgen_host() && (name.is_empty() || name == id) {
            match self.backend.premium_cluster_names_by_parent_id(id).await {
                Ok(names) => {
                    if let Some(joined) = join_premium_names(id, &names) {
                        name = joined;
                    }
                }
                Err(e) => log::debug!("Premium detail lookup failed for {}: {}", id, e),
            }
        }

        Ok(Some(NameRecord::cluster(
            id,
            name,
            non_empty(cluster.tenant_id),
            non_empty(cluster.tenant_name),
        )))
    }
}

/// Full tenant record
pub struct TenantSource {
    backend: Arc<dyn LookupBackend>,
}

#[async_trait]
impl NameSource for TenantSource {
    fn label(&self) -> &'static str {
        "tenant"
    }

    async fn lookup(&self, id: &str) -> Result<Option<NameRecord>> {
        Ok(self
            .backend
            .tenant_by_id(id)
            .await?
            .map(|tenant| NameRecord::tenant(id, tenant.tenant_name)))
    }
}

/// Bare tenant name, for tenants whose full record does not decode
pub struct TenantNameSource {
    backend: Arc<dyn LookupBackend>,
}

#[async_trait]
impl NameSource for TenantNameSource {
    fn label(&self) -> &'static str {
        "tenant_name"
    }

    async fn lookup(&self, id: &str) -> Result<Option<NameRecord>> {
        Ok(self
            .backend
            .tenant_name_by_id(id)
            .await?
            .and_then(non_empty)
            .map(|name| NameRecord::tenant(id, name)))
    }
}

/// Bare cluster name
pub struct ClusterNameSource {
    backend: Arc<dyn LookupBackend>,
}

#[async_trait]
impl NameSource for ClusterNameSource {
    fn label(&self) -> &'static str {
        "cluster_name"
    }

    async fn lookup(&self, id: &str) -> Result<Option<NameRecord>> {
        Ok(self
            .backend
            .cluster_name_by_id(id)
            .await?
            .and_then(non_empty)
            .map(|name| NameRecord::cluster(id, name, None, None)))
    }
}

/// Join premium detail names (newest first) into one display name.
///
/// Names are trimmed; empty ones and ones equal to `id` are skipped.
pub fn join_premium_names(id: &str, names: &[String]) -> Option<String> {
    let meaningful: Vec<&str> = names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty() && *name != id)
        .collect();

    if meaningful.is_empty() {
        None
    } else {
        Some(meaningful.join(", "))
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ClusterRow, MockBackend, Query, TenantRow};

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_join_premium_names() {
        assert_eq!(
            join_premium_names("5", &names(&["Beta", "", "Alpha"])),
            Some("Beta, Alpha".to_string())
        );
        assert_eq!(
            join_premium_names("5", &names(&["  Gamma  ", "5"])),
            Some("Gamma".to_string())
        );
        assert_eq!(join_premium_names("5", &names(&["", " ", "5"])), None);
        assert_eq!(join_premium_names("5", &[]), None);
    }

    #[tokio::test]
    async fn test_cluster_source_carries_tenant_linkage() {
        let backend = Arc::new(MockBackend::new().with_cluster(ClusterRow {
            cluster_id: "100".into(),
            cluster_name: "prod-east".into(),
            tenant_id: "10".into(),
            tenant_name: "Acme".into(),
            ..Default::default()
        }));
        let source = ClusterSource {
            backend: backend.clone(),
        };

        let record = source.lookup("100").await.unwrap().unwrap();
        assert_eq!(
            record,
            NameRecord::cluster("100", "prod-east", Some("10".into()), Some("Acme".into()))
        );
        assert_eq!(backend.call_counts().get(Query::PremiumNames), 0);
    }

    #[tokio::test]
    async fn test_cluster_source_keeps_name_when_premium_fails() {
        let backend = Arc::new(
            MockBackend::new()
                .with_cluster(ClusterRow {
                    cluster_id: "101".into(),
                    cluster_name: "101".into(),
                    deploy_type: "nextgen-host".into(),
                    ..Default::default()
                })
                .failing(Query::PremiumNames),
        );
        let source = ClusterSource { backend };

        let record = source.lookup("101").await.unwrap().unwrap();
        assert_eq!(record.name, "101");
        assert!(record.tenant_id.is_none());
    }

    #[tokio::test]
    async fn test_tenant_source_accepts_empty_name() {
        let backend = Arc::new(MockBackend::new().with_tenant(TenantRow {
            tenant_id: "7".into(),
            ..Default::default()
        }));
        let source = TenantSource { backend };

        let record = source.lookup("7").await.unwrap().unwrap();
        assert_eq!(record, NameRecord::tenant("7", ""));
    }

    #[tokio::test]
    async fn test_name_only_sources_skip_empty_names() {
        let backend: Arc<dyn LookupBackend> = Arc::new(
            MockBackend::new()
                .with_tenant_name("7", "")
                .with_cluster_name("7", ""),
        );

        let tenant = TenantNameSource {
            backend: backend.clone(),
        };
        let cluster = ClusterNameSource { backend };

        assert!(tenant.lookup("7").await.unwrap().is_none());
        assert!(cluster.lookup("7").await.unwrap().is_none());
    }

    #[test]
    fn test_default_chain_order() {
        let chain = default_chain(Arc::new(MockBackend::new()));
        let labels: Vec<_> = chain.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["cluster", "tenant", "tenant_name", "cluster_name"]);
    }
}
