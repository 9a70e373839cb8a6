//! Audit-specific error types.

use leaveledger_shared::error::AppError;
use thiserror::Error;

use crate::access::AccessError;
use crate::store::PersistenceError;

/// Errors raised while compiling or exporting the audit trail.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The acting role may not perform this operation.
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    /// The store backend failed.
    #[error(transparent)]
    Store(#[from] PersistenceError),
}

impl AuditError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Forbidden(_) => 403,
            Self::Store(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<AuditError> for AppError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::Forbidden(inner) => Self::Forbidden(inner.to_string()),
            AuditError::Store(inner) => Self::Store(inner.to_string()),
        }
    }
}
