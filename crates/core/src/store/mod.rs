//! Persistence contract consumed by the engines.
//!
//! The durable store is an external collaborator. The core only requires
//! create, read-by-filter, and update-by-id operations with last-write-wins
//! semantics, plus read-your-writes visibility within a single operation's
//! own sequence of calls (`generate_report` writes a header and then its
//! line items). Backends must not reorder or coalesce those writes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use leaveledger_shared::types::{
    BillingMonth, ExportId, LeaveRequestId, LineItemId, ReportId, StaffId,
};
use thiserror::Error;

use crate::audit::types::AuditExportRecord;
use crate::leave::types::{LeaveRecord, LeaveStatus, StaffProfile};
use crate::reconciliation::types::{ReconciliationReport, ReportLineItem};

/// Errors surfaced by a store backend.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The referenced document does not exist.
    #[error("Document {id} not found in {collection}")]
    NotFound {
        /// The collection queried.
        collection: &'static str,
        /// The missing document id.
        id: String,
    },

    /// The backend failed to perform the operation.
    #[error("Store backend error in {collection}: {message}")]
    Backend {
        /// The collection involved.
        collection: &'static str,
        /// Backend-provided detail.
        message: String,
    },
}

/// Filter for leave record queries.
///
/// `None` in a field disables that dimension. All set fields AND-combine,
/// mirroring the compound queries the production document store serves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaveQuery {
    /// Match a single staff member.
    pub staff_id: Option<StaffId>,
    /// Match a single parent company.
    pub parent_company: Option<String>,
    /// Match any of these statuses (empty = all statuses).
    pub statuses: Vec<LeaveStatus>,
    /// Match on chargeability.
    pub is_chargeable: Option<bool>,
    /// Match records whose start date falls within this month.
    pub start_within: Option<BillingMonth>,
}

impl LeaveQuery {
    /// Returns true if the given record matches this filter.
    #[must_use]
    pub fn matches(&self, record: &LeaveRecord) -> bool {
        if let Some(staff_id) = self.staff_id
            && record.staff_id != staff_id
        {
            return false;
        }
        if let Some(company) = &self.parent_company
            && &record.parent_company != company
        {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&record.status) {
            return false;
        }
        if let Some(chargeable) = self.is_chargeable
            && record.is_chargeable != chargeable
        {
            return false;
        }
        if let Some(month) = self.start_within
            && !month.contains(record.start_date)
        {
            return false;
        }
        true
    }
}

/// Partial update applied to a leave record by a decision or
/// acknowledgement. Last write wins; concurrent decisions race by design.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveUpdate {
    /// The new status.
    pub status: LeaveStatus,
    /// Rejection reason, set on rejection.
    pub rejection_reason: Option<String>,
    /// Deciding manager's email, set on a manager decision.
    pub manager_email: Option<String>,
    /// When the manager decision was made.
    pub manager_decided_at: Option<DateTime<Utc>>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Durable storage for leave records.
#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Persists a new leave record, returning its id.
    async fn insert_leave(&self, record: LeaveRecord) -> Result<LeaveRequestId, PersistenceError>;

    /// Reads a leave record by id.
    async fn get_leave(&self, id: LeaveRequestId)
    -> Result<Option<LeaveRecord>, PersistenceError>;

    /// Lists leave records matching the filter, in no guaranteed order.
    async fn list_leaves(&self, query: &LeaveQuery) -> Result<Vec<LeaveRecord>, PersistenceError>;

    /// Applies a partial update to a leave record by id (last write wins).
    async fn update_leave(
        &self,
        id: LeaveRequestId,
        update: LeaveUpdate,
    ) -> Result<(), PersistenceError>;
}

/// Lookup of staff profiles by email.
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    /// Resolves a staff profile by email, or `None` if unknown.
    async fn lookup_staff(&self, email: &str) -> Result<Option<StaffProfile>, PersistenceError>;
}

/// Durable storage for reconciliation reports and their line items.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persists a report header, returning its id.
    async fn insert_report(
        &self,
        report: ReconciliationReport,
    ) -> Result<ReportId, PersistenceError>;

    /// Persists a single report line item.
    async fn insert_line_item(&self, item: ReportLineItem) -> Result<LineItemId, PersistenceError>;

    /// Lists every persisted report header.
    async fn list_reports(&self) -> Result<Vec<ReconciliationReport>, PersistenceError>;

    /// Lists the line items belonging to a report.
    async fn list_line_items(
        &self,
        report_id: ReportId,
    ) -> Result<Vec<ReportLineItem>, PersistenceError>;
}

/// Durable storage for audit export records.
#[async_trait]
pub trait AuditExportStore: Send + Sync {
    /// Persists an export record, returning its id.
    async fn insert_export(&self, record: AuditExportRecord)
    -> Result<ExportId, PersistenceError>;

    /// Lists every persisted export record.
    async fn list_exports(&self) -> Result<Vec<AuditExportRecord>, PersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::leave::types::LeaveType;

    fn record(company: &str, status: LeaveStatus, chargeable: bool, start: &str) -> LeaveRecord {
        let start_date: NaiveDate = start.parse().expect("valid date");
        LeaveRecord {
            id: LeaveRequestId::new(),
            staff_id: StaffId::new(),
            staff_email: "staff@example.com".to_string(),
            staff_name: "Staff".to_string(),
            parent_company: company.to_string(),
            leave_type: LeaveType::Annual,
            is_chargeable: chargeable,
            start_date,
            end_date: start_date,
            total_days: 1,
            reason: "reason".to_string(),
            company_ref_id: "REF-1".to_string(),
            daily_rate: dec!(400),
            calculated_cost: if chargeable { dec!(400) } else { dec!(0) },
            status,
            rejection_reason: None,
            manager_email: None,
            manager_decided_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = LeaveQuery::default();
        assert!(query.matches(&record("ABC Staffing", LeaveStatus::Pending, true, "2026-02-03")));
        assert!(query.matches(&record("DEF Staffing", LeaveStatus::Rejected, false, "2025-11-30")));
    }

    #[test]
    fn test_reconciliation_query_predicate() {
        let query = LeaveQuery {
            parent_company: Some("ABC Staffing".to_string()),
            statuses: vec![LeaveStatus::ApprovedManager, LeaveStatus::ApprovedParent],
            is_chargeable: Some(true),
            start_within: Some("2026-02".parse().expect("valid month")),
            ..LeaveQuery::default()
        };

        assert!(query.matches(&record(
            "ABC Staffing",
            LeaveStatus::ApprovedManager,
            true,
            "2026-02-10"
        )));
        assert!(query.matches(&record(
            "ABC Staffing",
            LeaveStatus::ApprovedParent,
            true,
            "2026-02-28"
        )));

        // Wrong company, status, chargeability, or month all fail.
        assert!(!query.matches(&record(
            "DEF Staffing",
            LeaveStatus::ApprovedManager,
            true,
            "2026-02-10"
        )));
        assert!(!query.matches(&record(
            "ABC Staffing",
            LeaveStatus::Pending,
            true,
            "2026-02-10"
        )));
        assert!(!query.matches(&record(
            "ABC Staffing",
            LeaveStatus::ApprovedManager,
            false,
            "2026-02-10"
        )));
        assert!(!query.matches(&record(
            "ABC Staffing",
            LeaveStatus::ApprovedManager,
            true,
            "2026-03-01"
        )));
    }

    #[test]
    fn test_staff_query() {
        let mine = record("ABC Staffing", LeaveStatus::Pending, true, "2026-02-03");
        let query = LeaveQuery {
            staff_id: Some(mine.staff_id),
            ..LeaveQuery::default()
        };
        assert!(query.matches(&mine));
        assert!(!query.matches(&record("ABC Staffing", LeaveStatus::Pending, true, "2026-02-03")));
    }
}
