//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::NodeId;

/// Domain errors represent a failed structural edit.
///
/// A missing target is the only way an edit can fail. It is always
/// recoverable: the forest the caller holds is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0}")]
    NotFound(NodeId),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Text that does not denote a valid (strictly positive) node id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid node id: {0:?}")]
pub struct InvalidNodeId(pub String);
