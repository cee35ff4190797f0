//! SQLite lookup backend
//!
//! Opens the lookup database read-only. Nullable descriptive columns are
//! coalesced to empty strings; identity columns, names, and timestamps are
//! read strictly, so a row with NULLs there fails the full-record query and
//! the resolver moves on to the name-only fallbacks.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};

use super::{ClusterRow, LookupBackend, Result, TenantRow};
use crate::error::BackendError;

const CLUSTER_BY_ID: &str = r#"
    SELECT c.cluster_id, c.cluster_name, c.tenant_id,
           COALESCE(NULLIF(c.tenant_name, ''), t.tenant_name, '') AS tenant_name,
           COALESCE(c.deploy_type, '') AS deploy_type,
           COALESCE(c.version, '') AS version,
           COALESCE(c.cluster_lifecycle, '') AS cluster_lifecycle,
           COALESCE(c.creation_duration, '') AS creation_duration,
           COALESCE(c.tenant_plan, '') AS tenant_plan,
           COALESCE(c.provider, '') AS provider,
           COALESCE(c.region, '') AS region,
           COALESCE(c.project_id, '') AS project_id,
           COALESCE(c.org_id, '') AS org_id,
           COALESCE(c.cluster_type, '') AS cluster_type,
           c.created_at, c.updated_at
    FROM clusters c
    LEFT JOIN tenants t ON c.tenant_id = t.tenant_id
    WHERE c.cluster_id = ?1
"#;

const TENANT_BY_ID: &str = r#"
    SELECT tenant_id, tenant_name, kind, created_at, updated_at
    FROM tenants WHERE tenant_id = ?1
"#;

const TENANT_NAME_BY_ID: &str = "SELECT tenant_name FROM tenants WHERE tenant_id = ?1";

const CLUSTER_NAME_BY_ID: &str = "SELECT cluster_name FROM clusters WHERE cluster_id = ?1";

const PREMIUM_NAMES_BY_PARENT_ID: &str = r#"
    SELECT name FROM premium_cluster_details
    WHERE parent_id = ?1 AND name != ''
    ORDER BY created DESC
"#;

/// Read-only SQLite implementation of [`LookupBackend`].
///
/// Holds one connection behind a mutex, so queries from concurrent
/// `resolve` calls run one at a time. Each query blocks the calling task
/// until the lock and the query complete.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Open the lookup database at `path`.
    ///
    /// Queries wait at most `busy_timeout` for a locked database.
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self> {
        if !path.exists() {
            return Err(BackendError::Open(format!(
                "{} does not exist",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| BackendError::Open(e.to_string()))?;

        conn.busy_timeout(busy_timeout)
            .map_err(|e| BackendError::Open(e.to_string()))?;

        // Ping
        conn.query_row("SELECT 1", [], |r| r.get::<_, i64>(0))
            .map_err(|e| BackendError::Open(e.to_string()))?;

        log::info!("Lookup backend connected: {}", path.display());
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already open connection
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| BackendError::Query("connection lock poisoned".to_string()))?;
        f(&conn).map_err(BackendError::from)
    }

    fn query_name(&self, sql: &str, id: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(sql, [id], |r| r.get::<_, String>(0))
                .optional()
        })
    }
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let secs: i64 = row.get(idx)?;
    Ok(DateTime::from_timestamp(secs, 0))
}

fn cluster_from_row(row: &Row<'_>) -> rusqlite::Result<ClusterRow> {
    Ok(ClusterRow {
        cluster_id: row.get(0)?,
        cluster_name: row.get(1)?,
        tenant_id: row.get(2)?,
        tenant_name: row.get(3)?,
        deploy_type: row.get(4)?,
        version: row.get(5)?,
        cluster_lifecycle: row.get(6)?,
        creation_duration: row.get(7)?,
        tenant_plan: row.get(8)?,
        provider: row.get(9)?,
        region: row.get(10)?,
        project_id: row.get(11)?,
        org_id: row.get(12)?,
        cluster_type: row.get(13)?,
        created_at: timestamp(row, 14)?,
        updated_at: timestamp(row, 15)?,
    })
}

fn tenant_from_row(row: &Row<'_>) -> rusqlite::Result<TenantRow> {
    Ok(TenantRow {
        tenant_id: row.get(0)?,
        tenant_name: row.get(1)?,
        kind: row.get(2)?,
        created_at: timestamp(row, 3)?,
        updated_at: timestamp(row, 4)?,
    })
}

#[async_trait]
impl LookupBackend for SqliteBackend {
    async fn cluster_by_id(&self, id: &str) -> Result<Option<ClusterRow>> {
        self.with_conn(|conn| conn.query_row(CLUSTER_BY_ID, [id], cluster_from_row).optional())
    }

    async fn tenant_by_id(&self, id: &str) -> Result<Option<TenantRow>> {
        self.with_conn(|conn| conn.query_row(TENANT_BY_ID, [id], tenant_from_row).optional())
    }

    async fn tenant_name_by_id(&self, id: &str) -> Result<Option<String>> {
        self.query_name(TENANT_NAME_BY_ID, id)
    }

    async fn cluster_name_by_id(&self, id: &str) -> Result<Option<String>> {
        self.query_name(CLUSTER_NAME_BY_ID, id)
    }

    async fn premium_cluster_names_by_parent_id(&self, parent_id: &str) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(PREMIUM_NAMES_BY_PARENT_ID)?;
            let names = stmt
                .query_map([parent_id], |r| r.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(names)
        })
    }
}

/// Schema of the tables the backend reads, for building fixture databases
#[cfg(test)]
pub const TEST_SCHEMA: &str = r#"
    CREATE TABLE tenants (
        tenant_id TEXT PRIMARY KEY NOT NULL,
        tenant_name TEXT,
        kind TEXT,
        created_at INTEGER,
        updated_at INTEGER
    );

    CREATE TABLE clusters (
        cluster_id TEXT PRIMARY KEY NOT NULL,
        cluster_name TEXT,
        tenant_id TEXT,
        tenant_name TEXT,
        deploy_type TEXT,
        version TEXT,
        cluster_lifecycle TEXT,
        creation_duration TEXT,
        tenant_plan TEXT,
        provider TEXT,
        region TEXT,
        project_id TEXT,
        org_id TEXT,
        cluster_type TEXT,
        created_at INTEGER,
        updated_at INTEGER
    );

    CREATE TABLE premium_cluster_details (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        parent_id TEXT NOT NULL,
        name TEXT NOT NULL,
        created INTEGER NOT NULL
    );
"#;
