//! Configuration management for namecache

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::resolver::{DEFAULT_MISS_LOG, ResolverConfig};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Lifetime of resolved names, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Lifetime of confirmed misses, in seconds
    #[serde(default = "default_not_found_ttl_secs")]
    pub not_found_ttl_secs: u64,

    /// Append-only miss audit log
    #[serde(default = "default_miss_log_path")]
    pub miss_log_path: PathBuf,

    /// Lookup backend; absent means names cannot be resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendConfig>,
}

/// Lookup backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Path to the SQLite lookup database
    pub path: PathBuf,

    /// How long a query waits on a locked database, in milliseconds
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl BackendConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

fn default_cache_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_not_found_ttl_secs() -> u64 {
    60 * 60
}

fn default_miss_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_MISS_LOG)
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            not_found_ttl_secs: default_not_found_ttl_secs(),
            miss_log_path: default_miss_log_path(),
            backend: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".namecache").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(config_path: Option<&str>) -> Result<PathBuf> {
        match config_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an explicit path, or from the default location.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load_at(config_path: Option<&str>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from(Path::new(path)),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    log::debug!("No config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject TTLs that would make every entry expire immediately
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid("cache_ttl_secs must be positive".to_string()).into());
        }
        if self.not_found_ttl_secs == 0 {
            return Err(
                ConfigError::Invalid("not_found_ttl_secs must be positive".to_string()).into(),
            );
        }
        Ok(())
    }

    /// Point the backend at `path`, keeping any configured timeout
    pub fn set_backend_path(&mut self, path: PathBuf) {
        match self.backend.as_mut() {
            Some(backend) => backend.path = path,
            None => self.backend = Some(BackendConfig::new(path)),
        }
    }

    /// The construction parameters for the resolver
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            not_found_ttl: Duration::from_secs(self.not_found_ttl_secs),
            miss_log_path: self.miss_log_path.clone(),
        }
    }
}
