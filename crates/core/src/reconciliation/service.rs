//! Pure reconciliation report construction.
//!
//! Builds a report header and its line items from an already-queried set
//! of leave records. Querying and persistence live in the engine; this
//! service is deterministic given its inputs.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use leaveledger_shared::types::{BillingMonth, LineItemId, ReportId};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::leave::types::LeaveRecord;
use crate::reconciliation::actuals::ActualAmountSource;
use crate::reconciliation::error::ReconciliationError;
use crate::reconciliation::types::{GeneratedReport, ReconciliationReport, ReportLineItem};
use crate::variance::service::{ReviewThresholds, variance_percentage};

/// Stateless reconciliation report builder.
pub struct ReconciliationService;

impl ReconciliationService {
    /// Builds a reconciliation report over the given leave records.
    ///
    /// The records are assumed to already satisfy the reconciliation
    /// query (approved, chargeable, starting within the month, one
    /// company). Line items are ordered by leave start date, ascending.
    ///
    /// # Errors
    ///
    /// Returns `ReconciliationError::NoQualifyingRecords` when the record
    /// set is empty; nothing is billed for such a month.
    #[allow(clippy::too_many_arguments)]
    pub fn build_report(
        records: &[LeaveRecord],
        month: BillingMonth,
        parent_company: &str,
        generated_by: Uuid,
        generated_by_email: &str,
        generated_at: DateTime<Utc>,
        actuals: &dyn ActualAmountSource,
        thresholds: &ReviewThresholds,
    ) -> Result<GeneratedReport, ReconciliationError> {
        if records.is_empty() {
            return Err(ReconciliationError::NoQualifyingRecords {
                company: parent_company.to_string(),
                month,
            });
        }

        let mut ordered: Vec<&LeaveRecord> = records.iter().collect();
        ordered.sort_by(|a, b| a.start_date.cmp(&b.start_date));

        let report_id = ReportId::new();
        let mut staff: HashSet<_> = HashSet::new();
        let mut total_days = 0i64;
        let mut total_billed = Decimal::ZERO;
        let mut total_actual = Decimal::ZERO;

        let line_items: Vec<ReportLineItem> = ordered
            .iter()
            .map(|record| {
                let actual_amount = actuals.actual_for(record);
                let variance = actual_amount - record.calculated_cost;

                staff.insert(record.staff_id);
                total_days += record.total_days;
                total_billed += record.calculated_cost;
                total_actual += actual_amount;

                ReportLineItem {
                    id: LineItemId::new(),
                    report_id,
                    leave_id: record.id,
                    staff_id: record.staff_id,
                    staff_name: record.staff_name.clone(),
                    staff_email: record.staff_email.clone(),
                    leave_type: record.leave_type,
                    start_date: record.start_date,
                    end_date: record.end_date,
                    total_days: record.total_days,
                    daily_rate: record.daily_rate,
                    calculated_cost: record.calculated_cost,
                    actual_amount,
                    variance,
                    variance_percent: variance_percentage(variance, record.calculated_cost)
                        .map(|p| p.round_dp(1)),
                }
            })
            .collect();

        let total_variance = total_actual - total_billed;
        let report = ReconciliationReport {
            id: report_id,
            month,
            parent_company: parent_company.to_string(),
            generated_by,
            generated_by_email: generated_by_email.to_string(),
            generated_at,
            total_staff: staff.len(),
            total_leaves: line_items.len(),
            total_chargeable_days: total_days,
            total_billed_amount: total_billed,
            total_actual_amount: total_actual,
            total_variance,
            variance_percentage: variance_percentage(total_variance, total_billed)
                .map(|p| p.round_dp(2)),
            has_discrepancies: thresholds.has_discrepancies(total_variance),
            needs_review: thresholds.needs_review(total_variance, total_billed),
        };

        Ok(GeneratedReport { report, line_items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use leaveledger_shared::types::{LeaveRequestId, StaffId};
    use rust_decimal_macros::dec;

    use crate::leave::types::{LeaveStatus, LeaveType};
    use crate::reconciliation::actuals::FixedActuals;

    fn record(
        staff_id: StaffId,
        name: &str,
        start: &str,
        days: i64,
        rate: Decimal,
    ) -> LeaveRecord {
        let start_date: NaiveDate = start.parse().expect("valid date");
        LeaveRecord {
            id: LeaveRequestId::new(),
            staff_id,
            staff_email: format!("{}@example.com", name.to_lowercase()),
            staff_name: name.to_string(),
            parent_company: "ABC Staffing".to_string(),
            leave_type: LeaveType::Annual,
            is_chargeable: true,
            start_date,
            end_date: start_date + chrono::Duration::days(days - 1),
            total_days: days,
            reason: "reason".to_string(),
            company_ref_id: "REF-1".to_string(),
            daily_rate: rate,
            calculated_cost: Decimal::from(days) * rate,
            status: LeaveStatus::ApprovedManager,
            rejection_reason: None,
            manager_email: Some("manager@example.com".to_string()),
            manager_decided_at: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn month() -> BillingMonth {
        "2026-02".parse().expect("valid month")
    }

    #[test]
    fn test_empty_record_set_is_an_error() {
        let result = ReconciliationService::build_report(
            &[],
            month(),
            "ABC Staffing",
            Uuid::new_v4(),
            "finance@example.com",
            Utc::now(),
            &FixedActuals::new(),
            &ReviewThresholds::default(),
        );
        assert!(matches!(
            result,
            Err(ReconciliationError::NoQualifyingRecords { .. })
        ));
    }

    #[test]
    fn test_two_staff_report_totals_and_flags() {
        let alice = StaffId::new();
        let bob = StaffId::new();
        let records = vec![
            record(alice, "Alice", "2026-02-10", 2, dec!(400)),
            record(bob, "Bob", "2026-02-03", 3, dec!(400)),
        ];

        let mut actuals = FixedActuals::new();
        actuals.set(records[0].id, dec!(800));
        actuals.set(records[1].id, dec!(1100));

        let generated = ReconciliationService::build_report(
            &records,
            month(),
            "ABC Staffing",
            Uuid::new_v4(),
            "finance@example.com",
            Utc::now(),
            &actuals,
            &ReviewThresholds::default(),
        )
        .expect("report builds");

        let report = &generated.report;
        assert_eq!(report.total_staff, 2);
        assert_eq!(report.total_leaves, 2);
        assert_eq!(report.total_chargeable_days, 5);
        assert_eq!(report.total_billed_amount, dec!(2000));
        assert_eq!(report.total_actual_amount, dec!(1900));
        assert_eq!(report.total_variance, dec!(-100));
        assert_eq!(report.variance_percentage, Some(dec!(-5.00)));
        // -100 is not strictly above either threshold.
        assert!(!report.has_discrepancies);
        assert!(!report.needs_review);
    }

    #[test]
    fn test_line_items_ordered_by_start_date() {
        let records = vec![
            record(StaffId::new(), "Alice", "2026-02-20", 1, dec!(400)),
            record(StaffId::new(), "Bob", "2026-02-03", 1, dec!(400)),
            record(StaffId::new(), "Carol", "2026-02-11", 1, dec!(400)),
        ];
        let generated = ReconciliationService::build_report(
            &records,
            month(),
            "ABC Staffing",
            Uuid::new_v4(),
            "finance@example.com",
            Utc::now(),
            &FixedActuals::new(),
            &ReviewThresholds::default(),
        )
        .expect("report builds");

        let starts: Vec<NaiveDate> = generated
            .line_items
            .iter()
            .map(|item| item.start_date)
            .collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
        assert!(
            generated
                .line_items
                .iter()
                .all(|item| item.report_id == generated.report.id)
        );
    }

    #[test]
    fn test_line_variance_percent_is_one_decimal() {
        let records = vec![record(StaffId::new(), "Bob", "2026-02-03", 3, dec!(400))];
        let mut actuals = FixedActuals::new();
        actuals.set(records[0].id, dec!(1100));

        let generated = ReconciliationService::build_report(
            &records,
            month(),
            "ABC Staffing",
            Uuid::new_v4(),
            "finance@example.com",
            Utc::now(),
            &actuals,
            &ReviewThresholds::default(),
        )
        .expect("report builds");

        let line = &generated.line_items[0];
        assert_eq!(line.variance, dec!(-100));
        // -100 / 1200 = -8.33...%, one decimal on line items.
        assert_eq!(line.variance_percent, Some(dec!(-8.3)));
    }

    #[test]
    fn test_zero_billed_line_has_no_percentage() {
        let records = vec![record(StaffId::new(), "Zed", "2026-02-05", 2, dec!(0))];
        let generated = ReconciliationService::build_report(
            &records,
            month(),
            "ABC Staffing",
            Uuid::new_v4(),
            "finance@example.com",
            Utc::now(),
            &FixedActuals::new(),
            &ReviewThresholds::default(),
        )
        .expect("report builds");

        assert_eq!(generated.line_items[0].variance_percent, None);
        assert_eq!(generated.report.variance_percentage, None);
    }

    #[test]
    fn test_large_dollar_variance_needs_review() {
        let records = vec![record(StaffId::new(), "Alice", "2026-02-10", 10, dec!(400))];
        let mut actuals = FixedActuals::new();
        // Billed 4000, actual 4600: variance 600.
        actuals.set(records[0].id, dec!(4600));

        let generated = ReconciliationService::build_report(
            &records,
            month(),
            "ABC Staffing",
            Uuid::new_v4(),
            "finance@example.com",
            Utc::now(),
            &actuals,
            &ReviewThresholds::default(),
        )
        .expect("report builds");

        assert!(generated.report.has_discrepancies);
        assert!(generated.report.needs_review);
    }

    #[test]
    fn test_percent_rule_triggers_review_on_small_dollars() {
        let records = vec![record(StaffId::new(), "Alice", "2026-02-10", 1, dec!(400))];
        let mut actuals = FixedActuals::new();
        // Billed 400, actual 440: variance 40 (10%), under both dollar bars.
        actuals.set(records[0].id, dec!(440));

        let generated = ReconciliationService::build_report(
            &records,
            month(),
            "ABC Staffing",
            Uuid::new_v4(),
            "finance@example.com",
            Utc::now(),
            &actuals,
            &ReviewThresholds::default(),
        )
        .expect("report builds");

        assert!(!generated.report.has_discrepancies);
        assert!(generated.report.needs_review);
    }
}
