//! Error types for schema loading and field-path explanation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while resolving a field path against a schema document.
///
/// The `Display` text is the short message shown to users; `render` wraps it
/// with the failing segment the way hover text expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplainError {
    #[error("kind does not exist")]
    KindNotFound { kind: String },

    #[error("field does not exist")]
    FieldNotFound { field: String },

    #[error("unresolvable type reference")]
    UnresolvableTypeReference { field: String, reference: String },
}

impl ExplainError {
    /// The path segment the failure is reported against.
    pub fn subject(&self) -> &str {
        match self {
            ExplainError::KindNotFound { kind } => kind,
            ExplainError::FieldNotFound { field } => field,
            ExplainError::UnresolvableTypeReference { field, .. } => field,
        }
    }

    /// Render as documentation text: `**{segment}:** {message}`.
    pub fn render(&self) -> String {
        format!("**{}:** {}", self.subject(), self)
    }

    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Errors while loading schema documents or editor documents.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML: {source}")]
    InvalidYaml {
        #[source]
        source: serde_yaml::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}
