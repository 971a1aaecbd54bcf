//! Rules-evaluation error types.

use thiserror::Error;

/// Errors raised while evaluating access rules.
///
/// A `Deny` decision is not an error; these cover the cases where the engine
/// could not produce a decision at all.
#[derive(Error, Debug)]
pub enum RulesError {
    /// Rule set references a condition the engine cannot evaluate
    #[error("Invalid condition for {collection}.{operation}: {reason}")]
    InvalidCondition {
        /// Collection whose grant is malformed
        collection: String,
        /// Operation whose grant is malformed
        operation: String,
        /// What made the condition unevaluable
        reason: String,
    },

    /// Evaluation backend unavailable
    #[error("Rules engine unavailable: {0}")]
    Unavailable(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RulesError {
    /// Create an invalid-condition error.
    #[must_use]
    pub fn invalid_condition(
        collection: impl Into<String>,
        operation: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidCondition {
            collection: collection.into(),
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Result type for rules-evaluation operations.
pub type RulesResult<T> = Result<T, RulesError>;
