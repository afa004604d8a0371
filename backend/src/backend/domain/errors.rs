//! Error type shared by the domain services.

use thiserror::Error;

/// Failures a domain operation can report to its caller.
///
/// Storage problems are wrapped in `Persistence`; callers surface them as one
/// generic failure notice and leave their displayed state unchanged.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("session is not authorized")]
    Unauthorized,

    #[error("persistence failed: {0}")]
    Persistence(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
