//! Variance analysis data types.

use leaveledger_shared::types::BillingMonth;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classification of a single variance amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceClass {
    /// Billed and actual match exactly.
    Exact,
    /// Absolute variance above the critical dollar bar.
    Critical,
    /// Any other nonzero variance.
    Minor,
}

impl VarianceClass {
    /// Returns the lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Critical => "critical",
            Self::Minor => "minor",
        }
    }

    /// Returns the dashboard color for this class.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Exact => "#28a745",
            Self::Critical => "#dc3545",
            Self::Minor => "#ffc107",
        }
    }

    /// Returns the dashboard icon for this class.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Exact => "✅",
            Self::Critical => "⚠️",
            Self::Minor => "⚡",
        }
    }
}

impl std::fmt::Display for VarianceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One variance dashboard row: all reports for a month and company,
/// folded together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedVarianceRow {
    /// The billing month.
    pub month: BillingMonth,
    /// The parent company.
    pub parent_company: String,
    /// Summed billed amount across the group's reports.
    pub total_billed: Decimal,
    /// Summed actual amount across the group's reports.
    pub total_actual: Decimal,
    /// Summed variance across the group's reports.
    pub total_variance: Decimal,
    /// Variance as a percentage of the summed billed amount, two decimal
    /// places. `None` when nothing was billed.
    pub variance_percentage: Option<Decimal>,
    /// True when any report in the group needed review.
    pub needs_review: bool,
    /// How many reports were folded into this row.
    pub report_count: usize,
}

/// Aggregate figures over a set of dashboard rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VarianceSummary {
    /// Summed billed amount across all rows.
    pub total_billed: Decimal,
    /// Summed actual amount across all rows.
    pub total_actual: Decimal,
    /// Summed variance across all rows.
    pub total_variance: Decimal,
    /// How many rows need review.
    pub rows_needing_review: usize,
    /// How many rows there are.
    pub row_count: usize,
    /// Distinct parent companies across the rows.
    pub distinct_companies: usize,
    /// Distinct billing months across the rows.
    pub distinct_months: usize,
}
