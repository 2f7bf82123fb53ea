//! Error types for the access control evaluator

use thiserror::Error;

use crate::remote::RemoteError;

/// Access control errors
#[derive(Debug, Error)]
pub enum AuthzError {
    /// No scope resolver understood any scope of the evaluator.
    ///
    /// This is an expected outcome of [`Evaluator::mutate_scopes`](crate::Evaluator::mutate_scopes)
    /// when the formula had nothing to rewrite, so callers usually match on it
    /// instead of treating it as a failure.
    #[error("No resolver found for scope")]
    ResolverNotFound,

    /// A scope resolver failed while resolving a scope
    #[error("Scope resolution failed: {0}")]
    Resolver(String),

    /// The remote authorization service could not answer a check
    #[error("Remote check failed: {0}")]
    Remote(#[from] RemoteError),

    /// Evaluation was cancelled before it could complete
    #[error("Evaluation cancelled")]
    Cancelled,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AuthzError {
    /// Returns true if this is the "no resolver for this scope" condition.
    #[must_use]
    pub fn is_resolver_not_found(&self) -> bool {
        matches!(self, Self::ResolverNotFound)
    }
}

/// Result type for access control operations
pub type Result<T> = std::result::Result<T, AuthzError>;
