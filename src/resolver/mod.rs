//! Name resolver
//!
//! Maps cluster and tenant ids to display names. Results come from the
//! cache when a valid entry exists, otherwise from the fallback chain over
//! the lookup backend. Confirmed misses are cached with a shorter TTL and
//! written to the miss audit trail.
//!
//! The resolver is an ordinary value: build one at startup from a
//! [`ResolverConfig`] and share it (usually as `Arc<Resolver>`).

pub mod chain;
pub mod record;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::audit::{MissAuditor, MissReason};
use crate::backend::LookupBackend;
use crate::cache::{CacheStats, CacheStore, CacheTtl};
use crate::error::ResolveError;

pub use chain::NameSource;
pub use record::NameRecord;

/// Default miss log location, relative to the working directory
pub const DEFAULT_MISS_LOG: &str = "name_service_miss.log";

/// Construction parameters for a [`Resolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub cache_ttl: Duration,
    pub not_found_ttl: Duration,
    pub miss_log_path: PathBuf,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_ttl: CacheTtl::DEFAULT_FOUND,
            not_found_ttl: CacheTtl::DEFAULT_NOT_FOUND,
            miss_log_path: PathBuf::from(DEFAULT_MISS_LOG),
        }
    }
}

/// True for a non-empty string of ASCII decimal digits
pub fn is_numeric(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Cached id -> name resolver
pub struct Resolver {
    cache: CacheStore,
    /// `None` while no backend is connected
    chain: Option<Vec<Box<dyn NameSource>>>,
    auditor: MissAuditor,
}

impl Resolver {
    /// Build a resolver, opening the miss log named in `config`.
    ///
    /// Pass `None` for `backend` when no lookup backend is connected; ids
    /// then fail with [`ResolveError::BackendUnavailable`] until restart.
    pub fn new(config: &ResolverConfig, backend: Option<Arc<dyn LookupBackend>>) -> Self {
        let ttl = CacheTtl::new(config.cache_ttl, config.not_found_ttl);
        Self::with_parts(
            CacheStore::new(ttl),
            backend,
            MissAuditor::open(&config.miss_log_path),
        )
    }

    /// Build a resolver from already constructed parts
    pub fn with_parts(
        cache: CacheStore,
        backend: Option<Arc<dyn LookupBackend>>,
        auditor: MissAuditor,
    ) -> Self {
        Self {
            cache,
            chain: backend.map(chain::default_chain),
            auditor,
        }
    }

    pub fn is_backend_available(&self) -> bool {
        self.chain.is_some()
    }

    /// Resolve `id` to a display record.
    ///
    /// Non-numeric ids resolve to themselves without touching the cache.
    /// On failure, [`ResolveError::placeholder`] gives the `{id, name: id}`
    /// record to render instead.
    pub async fn resolve(&self, id: &str) -> Result<NameRecord, ResolveError> {
        if id.is_empty() {
            return Err(ResolveError::InvalidInput);
        }

        if !is_numeric(id) {
            return Ok(NameRecord::unresolved(id));
        }

        if let Some(entry) = self.cache.get(id).await {
            if entry.is_not_found() {
                log::debug!("Cache hit (not found): {}", id);
                return Err(ResolveError::NotFoundCached(id.to_string()));
            }
            log::debug!("Cache hit: {}", id);
            return Ok(entry.record().clone());
        }

        let Some(chain) = &self.chain else {
            self.auditor.record(id, MissReason::BackendUnavailable);
            return Err(ResolveError::BackendUnavailable(id.to_string()));
        };

        for source in chain {
            match source.lookup(id).await {
                Ok(Some(record)) => {
                    log::debug!("Resolved {} via {} lookup", id, source.label());
                    self.cache.put(id, record.clone(), false).await;
                    return Ok(record);
                }
                Ok(None) => {}
                Err(e) => log::debug!("{} lookup failed for {}: {}", source.label(), id, e),
            }
        }

        self.cache.put(id, NameRecord::unresolved(id), true).await;
        self.auditor.record(id, MissReason::NotFoundInBackend);
        Err(ResolveError::NotFound(id.to_string()))
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub async fn clear(&self) {
        self.cache.clear().await;
    }

    /// Sweep expired entries; meant to be driven by a periodic timer.
    pub async fn clean_expired(&self) -> usize {
        self.cache.clean_expired().await
    }
}
