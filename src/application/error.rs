//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("node name must not be empty")]
    EmptyName,

    #[error("no node selected")]
    NothingSelected,

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// Errors that leave the session usable and unchanged.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ApplicationError::Config { .. })
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
