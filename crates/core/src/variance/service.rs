//! Variance classification, grouping, and summaries.
//!
//! Pure functions over persisted report headers. The dashboard shows one
//! row per (month, company); when regeneration left multiple reports
//! under the same key, the group folds them together and flags the
//! duplication instead of silently picking one.

use std::collections::BTreeMap;

use leaveledger_shared::config::ReconciliationConfig;
use leaveledger_shared::types::BillingMonth;
use rust_decimal::Decimal;
use tracing::warn;

use crate::reconciliation::types::ReconciliationReport;
use crate::variance::types::{GroupedVarianceRow, VarianceClass, VarianceSummary};

/// Dollar and percent bars applied to report variances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewThresholds {
    /// Absolute variance above which a report has discrepancies.
    pub discrepancy: Decimal,
    /// Absolute variance above which a report needs review.
    pub review: Decimal,
    /// Absolute variance percentage above which a report needs review.
    pub percent: Decimal,
}

impl Default for ReviewThresholds {
    fn default() -> Self {
        Self::from(&ReconciliationConfig::default())
    }
}

impl From<&ReconciliationConfig> for ReviewThresholds {
    fn from(config: &ReconciliationConfig) -> Self {
        Self {
            discrepancy: config.discrepancy_threshold,
            review: config.review_threshold,
            percent: config.percent_threshold,
        }
    }
}

impl ReviewThresholds {
    /// True when the absolute variance strictly exceeds the discrepancy bar.
    #[must_use]
    pub fn has_discrepancies(&self, variance: Decimal) -> bool {
        variance.abs() > self.discrepancy
    }

    /// True when the variance needs review: the absolute dollar amount
    /// strictly exceeds the review bar, or the percentage of the billed
    /// amount strictly exceeds the percent bar.
    #[must_use]
    pub fn needs_review(&self, variance: Decimal, billed: Decimal) -> bool {
        variance.abs() > self.review
            || variance_percentage(variance, billed).is_some_and(|pct| pct.abs() > self.percent)
    }
}

/// Variance as a percentage of the billed base, unrounded.
///
/// `None` when the base is zero: a percentage of nothing is not a small
/// number, it is undefined.
#[must_use]
pub fn variance_percentage(variance: Decimal, billed: Decimal) -> Option<Decimal> {
    if billed.is_zero() {
        None
    } else {
        Some(variance / billed * Decimal::ONE_HUNDRED)
    }
}

/// Classifies a single variance amount against the default thresholds.
///
/// Zero is exact; anything strictly above the review bar in absolute
/// dollars is critical; everything else is minor. Classification is
/// dollar-only — the percent rule affects review flags, not row badges.
#[must_use]
pub fn classify(variance: Decimal) -> VarianceClass {
    classify_with(&ReviewThresholds::default(), variance)
}

/// Classifies a variance amount against explicit thresholds.
#[must_use]
pub fn classify_with(thresholds: &ReviewThresholds, variance: Decimal) -> VarianceClass {
    if variance.is_zero() {
        VarianceClass::Exact
    } else if variance.abs() > thresholds.review {
        VarianceClass::Critical
    } else {
        VarianceClass::Minor
    }
}

/// Folds report headers into one dashboard row per (month, company).
///
/// Dollar totals sum; `needs_review` is OR-combined; the percentage is
/// recomputed from the summed totals. Rows sort by month descending,
/// then company ascending. Groups holding more than one report are
/// logged — duplicates mean a month was regenerated without superseding
/// the earlier report.
#[must_use]
pub fn group_by_period_and_company(reports: &[ReconciliationReport]) -> Vec<GroupedVarianceRow> {
    let mut groups: BTreeMap<(BillingMonth, String), GroupedVarianceRow> = BTreeMap::new();

    for report in reports {
        let key = (report.month, report.parent_company.clone());
        let row = groups.entry(key).or_insert_with(|| GroupedVarianceRow {
            month: report.month,
            parent_company: report.parent_company.clone(),
            total_billed: Decimal::ZERO,
            total_actual: Decimal::ZERO,
            total_variance: Decimal::ZERO,
            variance_percentage: None,
            needs_review: false,
            report_count: 0,
        });
        row.total_billed += report.total_billed_amount;
        row.total_actual += report.total_actual_amount;
        row.total_variance += report.total_variance;
        row.needs_review |= report.needs_review;
        row.report_count += 1;
    }

    let mut rows: Vec<GroupedVarianceRow> = groups
        .into_values()
        .map(|mut row| {
            row.variance_percentage = variance_percentage(row.total_variance, row.total_billed)
                .map(|pct| pct.round_dp(2));
            if row.report_count > 1 {
                warn!(
                    month = %row.month,
                    company = %row.parent_company,
                    reports = row.report_count,
                    "multiple reconciliation reports folded into one variance row"
                );
            }
            row
        })
        .collect();

    rows.sort_by(|a, b| {
        b.month
            .cmp(&a.month)
            .then_with(|| a.parent_company.cmp(&b.parent_company))
    });
    rows
}

/// Aggregates dashboard rows into headline figures.
#[must_use]
pub fn summarize(rows: &[GroupedVarianceRow]) -> VarianceSummary {
    let mut companies = std::collections::HashSet::new();
    let mut months = std::collections::HashSet::new();
    let mut summary = VarianceSummary {
        row_count: rows.len(),
        ..VarianceSummary::default()
    };
    for row in rows {
        summary.total_billed += row.total_billed;
        summary.total_actual += row.total_actual;
        summary.total_variance += row.total_variance;
        if row.needs_review {
            summary.rows_needing_review += 1;
        }
        companies.insert(row.parent_company.as_str());
        months.insert(row.month);
    }
    summary.distinct_companies = companies.len();
    summary.distinct_months = months.len();
    summary
}
