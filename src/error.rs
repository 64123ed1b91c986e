//! Error types for strata
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use thiserror::Error;

/// Result type alias for strata operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main error type for configuration assembly and access
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A read through the facade hit a path with no value
    #[error("configuration property \"{path}\" is not defined")]
    NotDefined { path: String },

    /// A source could not be read or parsed
    #[error("cannot parse config source {source_name}: {message}")]
    MalformedSource {
        source_name: String,
        message: String,
    },

    /// Observer dispatch kept producing updates past its cap
    #[error("runaway update cycle detected at \"{path}\" after {limit} dispatch rounds")]
    RecursionLimitExceeded { path: String, limit: usize },

    /// An environment or instance discriminator did not line up with the loaded sources
    #[error("FATAL: {message}")]
    StrictnessViolation { message: String },

    /// A write hit a frozen property or a non-extensible node
    #[error("cannot {action} configuration property \"{key}\": configuration objects are immutable unless mutations are allowed")]
    Immutable { action: &'static str, key: String },

    /// A value could not be converted into the requested type
    #[error("cannot deserialize \"{path}\": {message}")]
    Deserialize { path: String, message: String },
}

impl ConfigError {
    pub(crate) fn not_defined(path: impl Into<String>) -> Self {
        Self::NotDefined { path: path.into() }
    }

    pub(crate) fn malformed(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::MalformedSource {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn immutable(action: &'static str, key: impl Into<String>) -> Self {
        Self::Immutable {
            action,
            key: key.into(),
        }
    }
}
