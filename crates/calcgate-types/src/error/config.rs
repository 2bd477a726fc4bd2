//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// Config file not found at expected path
    #[error("Config not found: {path}")]
    NotFound {
        /// Filesystem path where config was expected
        path: String,
    },

    /// Config file could not be read
    #[error("Config read error for {path}: {message}")]
    ReadError {
        /// Filesystem path that failed to read
        path: String,
        /// Description of the IO failure
        message: String,
    },

    /// Config file parse error (JSON)
    #[error("Config parse error: {message}")]
    ParseError {
        /// Description of the parse failure
        message: String,
    },

    /// Config validation error (invalid values)
    #[error("Config validation error for {field}: {message}")]
    ValidationError {
        /// Name of the field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },
}

impl ConfigError {
    /// Create a parse error from a serde_json error.
    pub fn from_json_error(e: &serde_json::Error) -> Self {
        Self::ParseError { message: e.to_string() }
    }

    /// Create a read error from an IO error.
    pub fn from_io_error(path: &std::path::Path, e: &std::io::Error) -> Self {
        Self::ReadError { path: path.display().to_string(), message: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_names_field() {
        let err = ConfigError::ValidationError {
            field: "rate_limits.text.max_requests".to_string(),
            message: "must be at least 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("rate_limits.text.max_requests"));
        assert!(msg.contains("at least 1"));
    }

    #[test]
    fn test_error_serialization_is_tagged() {
        let err = ConfigError::NotFound { path: "/etc/calcgate.json".to_string() };
        let json = serde_json::to_value(&err).unwrap_or_default();
        assert_eq!(json["type"], "NotFound");
        assert_eq!(json["details"]["path"], "/etc/calcgate.json");
    }
}
