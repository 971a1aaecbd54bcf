//! Document-store error types.

use docrules_core::{Operation, RulesError};
use thiserror::Error;

/// Errors surfaced by rules-checked store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The rules denied the operation
    #[error("Permission denied: {} on {path}", operation.as_str())]
    PermissionDenied {
        /// The denied operation
        operation: Operation,
        /// Collection or document path the operation addressed
        path: String,
    },

    /// The addressed document does not exist
    #[error("Not found: {path}")]
    NotFound {
        /// Document path
        path: String,
    },

    /// The supplied document body is not a JSON object
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Rule evaluation itself failed
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a permission-denied error.
    #[must_use]
    pub fn denied(operation: Operation, path: impl Into<String>) -> Self {
        Self::PermissionDenied {
            operation,
            path: path.into(),
        }
    }

    /// Create a not-found error.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Whether this error is a rule denial, as opposed to an evaluation or
    /// storage fault. Denials are the expected outcome for denied cases.
    #[must_use]
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
