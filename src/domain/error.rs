//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree contract.
///
/// The algorithms themselves never fail: "not found" is an empty result.
/// These errors come from edits and from validating a tree before it is
/// handed to the algorithms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("duplicate node id: {0}")]
    DuplicateId(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
