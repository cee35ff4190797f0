//! Command execution context
//!
//! Loads configuration, connects the lookup backend, and builds the one
//! resolver a command shares across all of its work.

use std::sync::Arc;

use crate::backend::{LookupBackend, SqliteBackend};
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;
use crate::resolver::Resolver;

/// Context for command execution containing the resolver and output format.
pub struct ResolverContext {
    /// Shared resolver
    pub resolver: Arc<Resolver>,
    /// Output format preference
    pub format: OutputFormat,
}

impl ResolverContext {
    /// Create a new context.
    ///
    /// A backend that is missing or fails to open is not an error: the
    /// resolver runs without one and reports ids as unavailable.
    ///
    /// # Errors
    /// Returns error if the config cannot be loaded.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = load_config(opts)?;
        let backend = connect_backend(&config);
        let resolver = Arc::new(Resolver::new(&config.resolver_config(), backend));

        Ok(Self {
            resolver,
            format: opts.format,
        })
    }
}

/// Load the config file and lay the CLI overrides over it
pub fn load_config(opts: &GlobalOptions) -> Result<Config> {
    let mut config = Config::load_at(opts.config_ref())?;
    opts.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

/// Open the configured lookup backend, or `None` if there is none or it fails.
pub fn connect_backend(config: &Config) -> Option<Arc<dyn LookupBackend>> {
    let Some(ref backend) = config.backend else {
        log::warn!("No lookup backend configured (name resolution will be unavailable)");
        return None;
    };

    match SqliteBackend::open(&backend.path, backend.busy_timeout()) {
        Ok(conn) => Some(Arc::new(conn)),
        Err(e) => {
            log::warn!(
                "Lookup backend connection failed: {} (name resolution will be unavailable)",
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_connect_backend_without_config() {
        assert!(connect_backend(&Config::default()).is_none());
    }

    #[test]
    fn test_connect_backend_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.set_backend_path(dir.path().join("missing.db"));

        assert!(connect_backend(&config).is_none());
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "cache_ttl_secs: 60\nmiss_log_path: /from/file.log\n").unwrap();

        let opts = GlobalOptions {
            format: OutputFormat::Table,
            config: Some(path.display().to_string()),
            backend: None,
            miss_log: Some(PathBuf::from("/from/flag.log")),
        };

        let config = load_config(&opts).unwrap();
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.miss_log_path, PathBuf::from("/from/flag.log"));
    }
}
