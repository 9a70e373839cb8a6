//! CSV export of the variance dashboard.

use std::fmt::Write as _;

use crate::variance::types::GroupedVarianceRow;

/// Renders dashboard rows as CSV, one line per (month, company) row.
///
/// Columns match the on-screen table. The percentage column shows `N/A`
/// when nothing was billed.
#[must_use]
pub fn variance_csv(rows: &[GroupedVarianceRow]) -> String {
    let mut out =
        String::from("Month,Parent Company,Billed Amount,Actual Amount,Variance,Variance %,Status\n");
    for row in rows {
        let percent = row
            .variance_percentage
            .map_or_else(|| "N/A".to_string(), |pct| format!("{pct}%"));
        let status = if row.needs_review { "Needs Review" } else { "OK" };
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{}",
            row.month,
            csv_field(&row.parent_company),
            row.total_billed,
            row.total_actual,
            row.total_variance,
            percent,
            status,
        );
    }
    out
}

/// Quotes a field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
