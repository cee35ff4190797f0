//! In-memory name cache
//!
//! Holds positive and negative resolution results behind a single
//! reader/writer lock. Each class of entry has its own TTL; expired entries
//! are hidden from readers and removed only by an explicit sweep.

pub mod clock;
pub mod store;

use std::time::Duration;

/// TTL configuration per entry class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    /// Lifetime of successfully resolved entries
    pub found: Duration,
    /// Lifetime of confirmed misses, shorter so new backend records show up sooner
    pub not_found: Duration,
}

impl CacheTtl {
    pub const DEFAULT_FOUND: Duration = Duration::from_secs(24 * 60 * 60); // 24 hr
    pub const DEFAULT_NOT_FOUND: Duration = Duration::from_secs(60 * 60); // 1 hr

    pub fn new(found: Duration, not_found: Duration) -> Self {
        Self { found, not_found }
    }

    /// TTL that applies to an entry of the given class
    pub fn for_entry(&self, not_found: bool) -> Duration {
        if not_found {
            self.not_found
        } else {
            self.found
        }
    }
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FOUND, Self::DEFAULT_NOT_FOUND)
    }
}

/// Render a TTL the way durations appear in the stats map, e.g. `24h0m0s` or `1.5s`.
pub fn format_ttl(ttl: Duration) -> String {
    let total = ttl.as_secs();
    let nanos = u64::from(ttl.subsec_nanos());

    if total == 0 {
        return match nanos {
            0 => "0s".to_string(),
            n if n < 1_000 => format!("{}ns", n),
            n if n < 1_000_000 => format!("{}µs", with_fraction(n / 1_000, n % 1_000, 3)),
            n => format!("{}ms", with_fraction(n / 1_000_000, n % 1_000_000, 6)),
        };
    }

    let (hours, mins) = (total / 3600, (total % 3600) / 60);
    let secs = with_fraction(total % 60, nanos, 9);

    if hours > 0 {
        format!("{}h{}m{}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m{}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// `whole.frac` with trailing zeros dropped; `frac` has `digits` decimal places.
fn with_fraction(whole: u64, frac: u64, digits: usize) -> String {
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = digits);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

pub use clock::{Clock, SystemClock};
pub use store::{CacheStats, CacheStore};
