//! Leave lifecycle error types.

use leaveledger_shared::error::AppError;
use leaveledger_shared::types::LeaveRequestId;
use thiserror::Error;

use crate::access::AccessError;
use crate::leave::types::LeaveStatus;
use crate::store::PersistenceError;

/// Errors that can occur during leave lifecycle operations.
#[derive(Debug, Error)]
pub enum LeaveError {
    /// A submission field failed validation.
    #[error("Validation failed on {field}: {message}")]
    Validation {
        /// The offending field.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The submitting staff member has no resolvable profile.
    #[error("Staff profile not found for {0}")]
    ProfileNotFound(String),

    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: LeaveStatus,
        /// The attempted target status.
        to: LeaveStatus,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Leave request not found.
    #[error("Leave request {0} not found")]
    RecordNotFound(LeaveRequestId),

    /// The acting role is not permitted to perform this operation.
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    /// Persistence store error.
    #[error(transparent)]
    Store(#[from] PersistenceError),
}

impl LeaveError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } | Self::RejectionReasonRequired => 400,
            Self::Forbidden(_) => 403,
            Self::ProfileNotFound(_) | Self::RecordNotFound(_) => 404,
            Self::InvalidTransition { .. } => 422,
            Self::Store(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::ProfileNotFound(_) => "PROFILE_NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::RecordNotFound(_) => "RECORD_NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<LeaveError> for AppError {
    fn from(err: LeaveError) -> Self {
        match &err {
            LeaveError::Validation { .. } | LeaveError::RejectionReasonRequired => {
                Self::Validation(err.to_string())
            }
            LeaveError::ProfileNotFound(_) | LeaveError::RecordNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            LeaveError::InvalidTransition { .. } => Self::BusinessRule(err.to_string()),
            LeaveError::Forbidden(_) => Self::Forbidden(err.to_string()),
            LeaveError::Store(_) => Self::Store(err.to_string()),
        }
    }
}
