//! Dual-TTL cache store
//!
//! One map guarded by one `RwLock`. Reads take the shared lock, writes the
//! exclusive one. Entries are replaced, never modified in place.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tokio::sync::RwLock;

use super::{CacheTtl, Clock, SystemClock, format_ttl};
use crate::resolver::NameRecord;

/// A stored resolution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    record: NameRecord,
    not_found: bool,
    stored_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn record(&self) -> &NameRecord {
        &self.record
    }

    /// True for a confirmed miss
    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    fn is_valid(&self, ttl: &CacheTtl, now: DateTime<Utc>) -> bool {
        match (now - self.stored_at).to_std() {
            Ok(age) => age < ttl.for_entry(self.not_found),
            // Clock went backwards; the entry is younger than any TTL
            Err(_) => true,
        }
    }
}

/// Snapshot of cache contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
    /// Stored entries past their TTL that the sweep has not removed yet
    pub expired: usize,
    #[serde(serialize_with = "serialize_ttl")]
    pub cache_ttl: Duration,
    #[serde(serialize_with = "serialize_ttl")]
    pub not_found_ttl: Duration,
}

fn serialize_ttl<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_ttl(*ttl))
}

/// Concurrent identifier -> entry map with per-class expiry
pub struct CacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: CacheTtl,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    pub fn new(ttl: CacheTtl) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: CacheTtl, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Get the entry for `id` if one exists and is still within its TTL.
    ///
    /// Expired entries are reported as absent but left in place.
    pub async fn get(&self, id: &str) -> Option<CacheEntry> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        entries
            .get(id)
            .filter(|entry| entry.is_valid(&self.ttl, now))
            .cloned()
    }

    /// Store or overwrite the entry for `id`, stamped with the current time.
    pub async fn put(&self, id: &str, record: NameRecord, not_found: bool) {
        let entry = CacheEntry {
            record,
            not_found,
            stored_at: self.clock.now(),
        };
        self.entries.write().await.insert(id.to_string(), entry);
    }

    /// Discard every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
        log::info!("Name resolver cache cleared");
    }

    /// Remove every entry that is past its TTL, returning how many were removed.
    pub async fn clean_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, entry| entry.is_valid(&self.ttl, now));
        let cleaned = before - entries.len();

        if cleaned > 0 {
            log::info!("Cleaned {} expired cache entries", cleaned);
        }
        cleaned
    }

    /// Classify every stored entry, including lapsed ones not yet swept.
    pub async fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entries = self.entries.read().await;

        let mut stats = CacheStats {
            total: entries.len(),
            found: 0,
            not_found: 0,
            expired: 0,
            cache_ttl: self.ttl.found,
            not_found_ttl: self.ttl.not_found,
        };

        for entry in entries.values() {
            if !entry.is_valid(&self.ttl, now) {
                stats.expired += 1;
            } else if entry.not_found {
                stats.not_found += 1;
            } else {
                stats.found += 1;
            }
        }

        stats
    }
}
