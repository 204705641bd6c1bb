//! Error types for the module rewrite engine.

use thiserror::Error;

/// Result type for rewrite operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Raised by a [`DependencyResolver`](crate::dependency::DependencyResolver)
/// when an import path cannot be turned into a dependency.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot resolve '{import_path}': {reason}")]
pub struct ResolveError {
    pub import_path: String,
    pub reason: String,
}

impl ResolveError {
    pub fn new(import_path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            import_path: import_path.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type. Every variant aborts the transform of the file that raised it.
#[derive(Error, Debug)]
pub enum TransformError {
    /// The syntax downleveler rejected the source
    #[error("Downlevel failed for {file}: {message}")]
    Downlevel { file: String, message: String },

    /// An import path could not be resolved
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Invalid pipeline options
    #[error("Invalid options: {0}")]
    Options(String),

    /// Invalid file type pattern
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransformError {
    pub fn downlevel(file: impl Into<String>, message: impl Into<String>) -> Self {
        TransformError::Downlevel {
            file: file.into(),
            message: message.into(),
        }
    }
}
