//! Display model implementations for table and JSON output
//!
//! Display models flatten resolver results into CLI-friendly rows with
//! column names for tables and stable keys for JSON.

use serde::Serialize;
use tabled::Tabled;

use crate::cache::{CacheStats, format_ttl};
use crate::error::ResolveError;
use crate::resolver::NameRecord;

/// Outcome label for a successful resolution
pub const OUTCOME_OK: &str = "ok";

/// One resolved (or unresolved) id
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ResolutionDisplay {
    /// Id as supplied
    #[tabled(rename = "ID")]
    pub id: String,

    /// cluster, tenant, or empty for unresolved ids
    #[tabled(rename = "TYPE")]
    #[serde(rename = "type")]
    pub kind: String,

    /// Display name (the id itself when unresolved)
    #[tabled(rename = "NAME")]
    pub name: String,

    /// Owning tenant id
    #[tabled(rename = "TENANT ID")]
    #[serde(rename = "tenantId")]
    pub tenant_id: String,

    /// Owning tenant name
    #[tabled(rename = "TENANT NAME")]
    #[serde(rename = "tenantName")]
    pub tenant_name: String,

    /// ok, not_found, not_found_cached, backend_unavailable, invalid_input
    #[tabled(rename = "OUTCOME")]
    pub outcome: String,
}

impl ResolutionDisplay {
    /// Build a row from a resolver result, substituting the placeholder on failure.
    pub fn from_result(id: &str, result: &Result<NameRecord, ResolveError>) -> Self {
        let (record, outcome) = match result {
            Ok(record) => (Some(record.clone()), OUTCOME_OK),
            Err(e) => (e.placeholder(), e.outcome()),
        };

        match record {
            Some(record) => Self {
                id: record.id,
                kind: record.kind.map(|k| k.as_str().to_string()).unwrap_or_default(),
                name: record.name,
                tenant_id: record.tenant_id.unwrap_or_default(),
                tenant_name: record.tenant_name.unwrap_or_default(),
                outcome: outcome.to_string(),
            },
            None => Self {
                id: id.to_string(),
                kind: String::new(),
                name: String::new(),
                tenant_id: String::new(),
                tenant_name: String::new(),
                outcome: outcome.to_string(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome == OUTCOME_OK
    }
}

/// Cache statistics as a single table row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct StatsDisplay {
    #[tabled(rename = "TOTAL")]
    pub total: usize,

    #[tabled(rename = "FOUND")]
    pub found: usize,

    #[tabled(rename = "NOT FOUND")]
    pub not_found: usize,

    #[tabled(rename = "EXPIRED")]
    pub expired: usize,

    #[tabled(rename = "CACHE TTL")]
    pub cache_ttl: String,

    #[tabled(rename = "NOT FOUND TTL")]
    pub not_found_ttl: String,
}

impl From<&CacheStats> for StatsDisplay {
    fn from(stats: &CacheStats) -> Self {
        Self {
            total: stats.total,
            found: stats.found,
            not_found: stats.not_found,
            expired: stats.expired,
            cache_ttl: format_ttl(stats.cache_ttl),
            not_found_ttl: format_ttl(stats.not_found_ttl),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_resolution_display_from_cluster() {
        let record = NameRecord::cluster(
            "100",
            "prod-east",
            Some("7".to_string()),
            Some("Acme".to_string()),
        );
        let row = ResolutionDisplay::from_result("100", &Ok(record));

        assert_eq!(row.id, "100");
        assert_eq!(row.kind, "cluster");
        assert_eq!(row.name, "prod-east");
        assert_eq!(row.tenant_id, "7");
        assert_eq!(row.tenant_name, "Acme");
        assert!(row.is_ok());
    }

    #[test]
    fn test_resolution_display_not_found_uses_placeholder() {
        let row =
            ResolutionDisplay::from_result("404", &Err(ResolveError::NotFound("404".to_string())));

        assert_eq!(row.name, "404");
        assert_eq!(row.kind, "");
        assert_eq!(row.outcome, "not_found");
        assert!(!row.is_ok());
    }

    #[test]
    fn test_resolution_display_invalid_input() {
        let row = ResolutionDisplay::from_result("", &Err(ResolveError::InvalidInput));

        assert_eq!(row.id, "");
        assert_eq!(row.name, "");
        assert_eq!(row.outcome, "invalid_input");
    }

    #[test]
    fn test_resolution_display_json_keys() {
        let record = NameRecord::tenant("7", "Acme");
        let row = ResolutionDisplay::from_result("7", &Ok(record));
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["type"], "tenant");
        assert_eq!(json["tenantName"], "");
        assert_eq!(json["outcome"], "ok");
    }

    #[test]
    fn test_stats_display_formats_ttls() {
        let stats = CacheStats {
            total: 3,
            found: 2,
            not_found: 1,
            expired: 0,
            cache_ttl: Duration::from_secs(86400),
            not_found_ttl: Duration::from_secs(90),
        };
        let row = StatsDisplay::from(&stats);

        assert_eq!(row.cache_ttl, "24h0m0s");
        assert_eq!(row.not_found_ttl, "1m30s");
    }
}
