//! Error types for namecache

use thiserror::Error;

use crate::resolver::NameRecord;

/// Result type alias for namecache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a failed resolution.
///
/// Every variant except [`ResolveError::InvalidInput`] still has a usable
/// display value, available through [`ResolveError::placeholder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("empty id")]
    InvalidInput,

    #[error("lookup backend not connected")]
    BackendUnavailable(String),

    #[error("ID not found: {0}")]
    NotFound(String),

    #[error("ID not found (cached): {0}")]
    NotFoundCached(String),
}

impl ResolveError {
    /// The `{id, name: id}` record callers render in place of a resolved name.
    pub fn placeholder(&self) -> Option<NameRecord> {
        match self {
            ResolveError::InvalidInput => None,
            ResolveError::BackendUnavailable(id)
            | ResolveError::NotFound(id)
            | ResolveError::NotFoundCached(id) => Some(NameRecord::unresolved(id)),
        }
    }

    /// Short machine-readable label, used in CLI output.
    pub fn outcome(&self) -> &'static str {
        match self {
            ResolveError::InvalidInput => "invalid_input",
            ResolveError::BackendUnavailable(_) => "backend_unavailable",
            ResolveError::NotFound(_) => "not_found",
            ResolveError::NotFoundCached(_) => "not_found_cached",
        }
    }
}

/// Lookup backend errors.
///
/// Never surfaced to callers: a backend that fails to open leaves the
/// resolver without one, and a failed query moves resolution to the next source.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Failed to open lookup backend: {0}")]
    Open(String),

    #[error("Backend query failed: {0}")]
    Query(String),
}

impl From<rusqlite::Error> for BackendError {
    fn from(err: rusqlite::Error) -> Self {
        BackendError::Query(err.to_string())
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_messages() {
        assert_eq!(ResolveError::InvalidInput.to_string(), "empty id");
        assert!(
            ResolveError::NotFound("42".to_string())
                .to_string()
                .contains("42")
        );
        assert!(
            ResolveError::NotFoundCached("42".to_string())
                .to_string()
                .contains("cached")
        );
    }

    #[test]
    fn test_placeholder_echoes_id() {
        let err = ResolveError::NotFound("1001".to_string());
        let record = err.placeholder().unwrap();
        assert_eq!(record.id, "1001");
        assert_eq!(record.name, "1001");
        assert!(record.kind.is_none());
    }

    #[test]
    fn test_invalid_input_has_no_placeholder() {
        assert!(ResolveError::InvalidInput.placeholder().is_none());
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(
            ResolveError::BackendUnavailable("1".into()).outcome(),
            "backend_unavailable"
        );
        assert_eq!(
            ResolveError::NotFoundCached("1".into()).outcome(),
            "not_found_cached"
        );
    }

    #[test]
    fn test_backend_error_from_rusqlite() {
        let err: BackendError = rusqlite::Error::QueryReturnedNoRows.into();
        match err {
            BackendError::Query(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected BackendError::Query"),
        }
    }

    #[test]
    fn test_backend_error_messages() {
        let open = BackendError::Open("/data/lookup.db does not exist".to_string());
        assert_eq!(
            open.to_string(),
            "Failed to open lookup backend: /data/lookup.db does not exist"
        );
        assert!(
            BackendError::Query("no such table".to_string())
                .to_string()
                .starts_with("Backend query failed")
        );
    }

    #[test]
    fn test_error_from_resolve_error() {
        let err: Error = ResolveError::InvalidInput.into();
        match err {
            Error::Resolve(ResolveError::InvalidInput) => (),
            _ => panic!("Expected Error::Resolve(ResolveError::InvalidInput)"),
        }
    }

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound("/tmp/missing.yaml".to_string());
        assert!(err.to_string().contains("/tmp/missing.yaml"));
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
