//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Module-level errors (`LeaveError`, `ReconciliationError`, `AuditError`)
/// convert into this taxonomy at the boundary between the core and its
/// callers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Access denied for the acting role.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation (e.g. illegal status transition).
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Conflict (e.g. a write left a record in an inconsistent state).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Persistence store error.
    #[error("Store error: {0}")]
    Store(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::BusinessRule(_) => 422,
            Self::Conflict(_) => 409,
            Self::Store(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Store(_) => "STORE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
