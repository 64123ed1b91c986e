//! Configuration warning value object.

use std::fmt;

/// Category of a non-fatal configuration problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// An override source (`STRATA_CONFIG`, a custom env var) was not parseable and was skipped
    MalformedOverride,
    /// No configuration files were found in any config directory
    NoConfigFiles,
    /// An environment name matched no loaded file
    UnmatchedEnvironment,
    /// `default` or `local` was used as an environment name
    AmbiguousEnvironment,
    /// The instance name matched no loaded file
    UnmatchedInstance,
    /// A boolean flag had an unrecognised value
    InvalidFlag,
}

/// Non-fatal configuration warning.
///
/// Collected during construction and also emitted through `tracing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub kind: WarningKind,
    pub message: String,
    /// The source or parameter the warning is about, if any
    pub source: Option<String>,
    /// A suggested correction if available
    pub suggestion: Option<String>,
}

impl ConfigWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            suggestion: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Whether the warning is one of the strict-mode checks.
    pub fn is_strictness(&self) -> bool {
        matches!(
            self.kind,
            WarningKind::UnmatchedEnvironment
                | WarningKind::AmbiguousEnvironment
                | WarningKind::UnmatchedInstance
        )
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, ". Did you mean '{suggestion}'?")?;
        }
        Ok(())
    }
}
