//! Reconciliation report data types.

use chrono::{DateTime, NaiveDate, Utc};
use leaveledger_shared::types::{BillingMonth, LeaveRequestId, LineItemId, ReportId, StaffId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::leave::types::LeaveType;

/// One line of a reconciliation report, covering a single leave record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLineItem {
    /// Unique identifier.
    pub id: LineItemId,
    /// The report this line belongs to.
    pub report_id: ReportId,
    /// The underlying leave record.
    pub leave_id: LeaveRequestId,
    /// Staff identity.
    pub staff_id: StaffId,
    /// Staff display name.
    pub staff_name: String,
    /// Staff email.
    pub staff_email: String,
    /// Leave category.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Chargeable days on this line.
    pub total_days: i64,
    /// Daily rate snapshot from the leave record.
    pub daily_rate: Decimal,
    /// What we billed: the record's calculated cost.
    pub calculated_cost: Decimal,
    /// What the parent company reported for this record.
    pub actual_amount: Decimal,
    /// `actual_amount - calculated_cost`.
    pub variance: Decimal,
    /// Variance as a percentage of the billed cost, one decimal place.
    /// `None` when the billed cost is zero.
    pub variance_percent: Option<Decimal>,
}

/// A monthly, per-company reconciliation report header.
///
/// Immutable once generated. Regeneration writes a new report under the
/// same `(month, company)` key; callers treat the newest as canonical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Unique identifier.
    pub id: ReportId,
    /// The billing month covered.
    pub month: BillingMonth,
    /// The parent company covered.
    pub parent_company: String,
    /// The generating user.
    pub generated_by: Uuid,
    /// The generating user's email.
    pub generated_by_email: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Count of distinct staff across the line items.
    pub total_staff: usize,
    /// Count of leave records covered.
    pub total_leaves: usize,
    /// Sum of chargeable days.
    pub total_chargeable_days: i64,
    /// Sum of calculated costs across the line items.
    pub total_billed_amount: Decimal,
    /// Sum of company-reported actual amounts.
    pub total_actual_amount: Decimal,
    /// `total_actual_amount - total_billed_amount`.
    pub total_variance: Decimal,
    /// Total variance as a percentage of the billed amount, two decimal
    /// places. `None` when the billed amount is zero.
    pub variance_percentage: Option<Decimal>,
    /// True when the absolute variance exceeds the discrepancy threshold.
    pub has_discrepancies: bool,
    /// True when the variance trips the review thresholds (dollar OR
    /// percent rule).
    pub needs_review: bool,
}

/// A generated report together with its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedReport {
    /// The report header.
    pub report: ReconciliationReport,
    /// Line items ordered by leave start date, ascending.
    pub line_items: Vec<ReportLineItem>,
}
