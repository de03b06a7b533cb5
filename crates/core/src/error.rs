//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic domain failures (preconditions,
/// conflicts, invariants). Infrastructure concerns belong elsewhere.
/// Composition violations (a capability claimed without its prerequisites)
/// have no variant here: they are compile errors, never runtime values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A mutation was attempted in a persistence state that forbids it
    /// (e.g. changing a discriminator after insert).
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A uniqueness claim collided with an existing number in its scope.
    ///
    /// Recoverable: the caller may retry with a different value.
    #[error("number '{value}' already claimed in scope '{scope}'")]
    NumberConflict { value: String, scope: String },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// A requested entity was not found (domain-level).
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn number_conflict(value: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::NumberConflict {
            value: value.into(),
            scope: scope.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
