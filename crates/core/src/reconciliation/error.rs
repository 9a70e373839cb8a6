//! Reconciliation-specific error types.

use leaveledger_shared::error::AppError;
use leaveledger_shared::types::{BillingMonth, ReportId};
use thiserror::Error;

use crate::access::AccessError;
use crate::store::PersistenceError;

/// Errors raised while generating or reading reconciliation reports.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// No approved chargeable leave matched the month and company.
    #[error("No approved chargeable leave for {company} in {month}")]
    NoQualifyingRecords {
        /// The parent company queried.
        company: String,
        /// The billing month queried.
        month: BillingMonth,
    },

    /// The report header was written but some line items were not.
    #[error("Report {report_id} persisted {written} of {total} line items")]
    PartialWrite {
        /// The report whose line items are incomplete.
        report_id: ReportId,
        /// Line items successfully written.
        written: usize,
        /// Line items the report should have.
        total: usize,
        /// The write failure that interrupted the sequence.
        #[source]
        source: PersistenceError,
    },

    /// The acting role may not perform this operation.
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    /// The store backend failed.
    #[error(transparent)]
    Store(#[from] PersistenceError),
}

impl ReconciliationError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NoQualifyingRecords { .. } => 404,
            Self::PartialWrite { .. } | Self::Store(_) => 500,
            Self::Forbidden(_) => 403,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoQualifyingRecords { .. } => "NO_QUALIFYING_RECORDS",
            Self::PartialWrite { .. } => "PARTIAL_WRITE",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<ReconciliationError> for AppError {
    fn from(err: ReconciliationError) -> Self {
        match err {
            ReconciliationError::NoQualifyingRecords { .. } => Self::NotFound(err.to_string()),
            ReconciliationError::Forbidden(inner) => Self::Forbidden(inner.to_string()),
            ReconciliationError::PartialWrite { .. } | ReconciliationError::Store(_) => {
                Self::Store(err.to_string())
            }
        }
    }
}
