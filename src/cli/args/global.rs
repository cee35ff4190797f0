//! Global CLI options shared across all commands
//!
//! Consolidates the global flags so command handlers take a single value.

use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; [`GlobalOptions::apply_to`] lays it over a
/// loaded [`Config`].
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.namecache/config.yaml)
    pub config: Option<String>,

    /// Lookup database override
    pub backend: Option<PathBuf>,

    /// Miss log path override
    pub miss_log: Option<PathBuf>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            backend: cli.backend.clone(),
            miss_log: cli.miss_log.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Apply flag overrides on top of a loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ref path) = self.backend {
            config.set_backend_path(path.clone());
        }
        if let Some(ref path) = self.miss_log {
            config.miss_log_path = path.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(backend: Option<&str>, miss_log: Option<&str>) -> GlobalOptions {
        GlobalOptions {
            format: OutputFormat::Json,
            config: Some("/custom/path".to_string()),
            backend: backend.map(PathBuf::from),
            miss_log: miss_log.map(PathBuf::from),
        }
    }

    #[test]
    fn test_config_ref() {
        assert_eq!(opts(None, None).config_ref(), Some("/custom/path"));
    }

    #[test]
    fn test_apply_to_overrides_backend_and_miss_log() {
        let mut config = Config::default();

        opts(Some("/data/lookup.db"), Some("/var/log/miss.log")).apply_to(&mut config);

        assert_eq!(
            config.backend.map(|b| b.path),
            Some(PathBuf::from("/data/lookup.db"))
        );
        assert_eq!(config.miss_log_path, PathBuf::from("/var/log/miss.log"));
    }

    #[test]
    fn test_apply_to_without_overrides_keeps_config() {
        let mut config = Config::default();
        opts(None, None).apply_to(&mut config);
        assert_eq!(config, Config::default());
    }
}
