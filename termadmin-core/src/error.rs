//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Opaque failure reported by the remote service
    ///
    /// Displays as the bare message so it can be shown to the user verbatim.
    #[error("{0}")]
    Remote(String),

    /// Structured failure reported by the remote service
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Term type not found
    #[error("Term type not found: {0}")]
    TermTypeNotFound(String),

    /// Attribute name not found
    #[error("Attribute name not found: {0}")]
    AttributeNameNotFound(String),

    /// Workflow config not found
    #[error("Workflow config not found: {0}")]
    WorkflowConfigNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::TermTypeNotFound(_)
            | Self::AttributeNameNotFound(_)
            | Self::WorkflowConfigNotFound(_)
            | Self::ValidationError(_)
            | Self::Remote(_) => true,
            Self::Api { status, .. } => (400..500).contains(status),
            Self::SerializationError(_) | Self::NetworkError(_) | Self::ConfigError(_) => false,
        }
    }

    /// Log this error at the level [`is_expected`](Self::is_expected) selects.
    pub fn log(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
