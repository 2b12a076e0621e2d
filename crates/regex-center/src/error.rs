//! Error types for regex-center.
//!
//! Lookup misses are never errors: the registry answers them with sentinels
//! (`None`, `false`, an empty list, `0` or the unchanged input). The variants
//! here cover patterns the gate refuses to admit or use, and the ambient
//! configuration layer.

use thiserror::Error;

/// The main error type for regex-center operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Pattern Errors ===
    /// The expression matches a known catastrophic-backtracking shape.
    #[error("pattern '{key}' may be vulnerable to ReDoS: {expression}")]
    PotentiallyUnsafePattern {
        /// Registration or lookup key of the pattern.
        key: String,
        /// The offending expression.
        expression: String,
    },

    /// The regex engine rejected the expression.
    #[error("invalid pattern '{key}': {source}")]
    InvalidPattern {
        /// Registration or lookup key of the pattern.
        key: String,
        /// The underlying engine error.
        #[source]
        source: regex::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },
}

/// A specialized Result type for regex-center operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a potentially-unsafe-pattern error.
    #[must_use]
    pub fn unsafe_pattern(key: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::PotentiallyUnsafePattern {
            key: key.into(),
            expression: expression.into(),
        }
    }

    /// Create an invalid-pattern error.
    #[must_use]
    pub fn invalid_pattern(key: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            key: key.into(),
            source,
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error was raised by the ReDoS heuristic.
    #[must_use]
    pub fn is_unsafe_pattern(&self) -> bool {
        matches!(self, Self::PotentiallyUnsafePattern { .. })
    }

    /// Check if this error means the regex engine rejected the expression.
    #[must_use]
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }
}
