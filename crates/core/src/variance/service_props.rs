//! Property-based tests for variance analysis.

use chrono::Utc;
use leaveledger_shared::types::ReportId;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::reconciliation::types::ReconciliationReport;
use crate::variance::service::{
    classify, group_by_period_and_company, summarize, variance_percentage,
};
use crate::variance::types::VarianceClass;

/// Cents in `-10_000.00..=10_000.00` as a Decimal.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..=1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_report() -> impl Strategy<Value = (u32, u8, Decimal, Decimal, bool)> {
    (
        2020u32..2030,
        1u8..=12,
        arb_amount(),
        arb_amount(),
        any::<bool>(),
    )
}

fn report(
    (year, month, billed, actual, needs_review): (u32, u8, Decimal, Decimal, bool),
) -> ReconciliationReport {
    let variance = actual - billed;
    ReconciliationReport {
        id: ReportId::new(),
        month: format!("{year:04}-{month:02}").parse().expect("valid month"),
        parent_company: "ABC Staffing".to_string(),
        generated_by: Uuid::new_v4(),
        generated_by_email: "finance@example.com".to_string(),
        generated_at: Utc::now(),
        total_staff: 1,
        total_leaves: 1,
        total_chargeable_days: 1,
        total_billed_amount: billed,
        total_actual_amount: actual,
        total_variance: variance,
        variance_percentage: variance_percentage(variance, billed).map(|p| p.round_dp(2)),
        has_discrepancies: false,
        needs_review,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Exact means zero; critical means strictly beyond the dollar bar.
    #[test]
    fn prop_classify_partitions_by_magnitude(variance in arb_amount()) {
        match classify(variance) {
            VarianceClass::Exact => prop_assert!(variance.is_zero()),
            VarianceClass::Critical => prop_assert!(variance.abs() > Decimal::from(500)),
            VarianceClass::Minor => {
                prop_assert!(!variance.is_zero());
                prop_assert!(variance.abs() <= Decimal::from(500));
            }
        }
    }

    /// Classification ignores the sign of the variance.
    #[test]
    fn prop_classify_is_symmetric(variance in arb_amount()) {
        prop_assert_eq!(classify(variance), classify(-variance));
    }

    /// A percentage exists exactly when something was billed, and carries
    /// the variance's sign.
    #[test]
    fn prop_percentage_sign_and_definedness(
        variance in arb_amount(),
        billed in arb_amount(),
    ) {
        match variance_percentage(variance, billed) {
            None => prop_assert!(billed.is_zero()),
            Some(pct) => {
                prop_assert!(!billed.is_zero());
                prop_assert_eq!(pct.is_zero(), variance.is_zero());
                if billed > Decimal::ZERO && !variance.is_zero() {
                    prop_assert_eq!(pct < Decimal::ZERO, variance < Decimal::ZERO);
                }
            }
        }
    }

    /// Grouping conserves dollar totals, and the summary conserves them
    /// again over the rows.
    #[test]
    fn prop_grouping_conserves_totals(
        inputs in prop::collection::vec(arb_report(), 0..20)
    ) {
        let reports: Vec<ReconciliationReport> = inputs.into_iter().map(report).collect();
        let expected_billed: Decimal = reports.iter().map(|r| r.total_billed_amount).sum();
        let expected_actual: Decimal = reports.iter().map(|r| r.total_actual_amount).sum();

        let rows = group_by_period_and_company(&reports);
        let row_count_total: usize = rows.iter().map(|row| row.report_count).sum();
        prop_assert_eq!(row_count_total, reports.len());

        let summary = summarize(&rows);
        prop_assert_eq!(summary.total_billed, expected_billed);
        prop_assert_eq!(summary.total_actual, expected_actual);
        prop_assert_eq!(summary.total_variance, expected_actual - expected_billed);
    }

    /// Rows come out sorted: month descending, company ascending within
    /// a month, and no (month, company) key repeats.
    #[test]
    fn prop_rows_sorted_and_unique(
        inputs in prop::collection::vec(arb_report(), 0..20)
    ) {
        let reports: Vec<ReconciliationReport> = inputs.into_iter().map(report).collect();
        let rows = group_by_period_and_company(&reports);

        for pair in rows.windows(2) {
            let ordering = pair[1].month.cmp(&pair[0].month).then_with(|| {
                pair[0].parent_company.cmp(&pair[1].parent_company)
            });
            prop_assert!(ordering.is_lt());
        }
    }
}
