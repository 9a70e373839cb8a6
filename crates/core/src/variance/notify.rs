//! Variance alert content.
//!
//! Builds the message sent to a parent company's billing contact when a
//! month's variance needs review. Transport is an outer concern; the core
//! only produces the addressed content.

use serde::{Deserialize, Serialize};

use crate::variance::types::GroupedVarianceRow;

/// Billing contact details for a parent company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyContact {
    /// The parent company name.
    pub company: String,
    /// Primary billing contact address.
    pub billing_email: String,
    /// Additional recipients copied on alerts.
    #[serde(default)]
    pub cc: Vec<String>,
}

/// An addressed variance alert, ready for a mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceAlert {
    /// Primary recipient.
    pub to: String,
    /// Copied recipients.
    pub cc: Vec<String>,
    /// Message subject.
    pub subject: String,
    /// Plain-text message body.
    pub body: String,
}

/// Builds an alert for a dashboard row, or `None` when the row does not
/// need review.
#[must_use]
pub fn build_variance_alert(
    row: &GroupedVarianceRow,
    contact: &CompanyContact,
) -> Option<VarianceAlert> {
    if !row.needs_review {
        return None;
    }

    let period = row.month.display_name();
    let percent = row
        .variance_percentage
        .map_or_else(|| "n/a".to_string(), |pct| format!("{pct}%"));
    let direction = if row.total_variance > rust_decimal::Decimal::ZERO {
        "overbilled"
    } else {
        "underbilled"
    };

    let subject = format!("Billing variance requires review: {} - {period}", row.parent_company);
    let body = format!(
        "The reconciliation for {company} in {period} shows a variance that requires review.\n\
         \n\
         Billed amount:  {billed}\n\
         Actual amount:  {actual}\n\
         Variance:       {variance} ({percent}, {direction})\n\
         \n\
         Please review the report line items and confirm the billed figures.",
        company = row.parent_company,
        billed = row.total_billed,
        actual = row.total_actual,
        variance = row.total_variance,
    );

    Some(VarianceAlert {
        to: contact.billing_email.clone(),
        cc: contact.cc.clone(),
        subject,
        body,
    })
}

/// Builds alerts for every dashboard row needing review whose company has
/// a contact on file. Rows without a contact are skipped; empty when
/// nothing needs review.
#[must_use]
pub fn build_variance_alerts(
    rows: &[GroupedVarianceRow],
    contacts: &[CompanyContact],
) -> Vec<VarianceAlert> {
    rows.iter()
        .filter_map(|row| {
            let contact = contacts
                .iter()
                .find(|contact| contact.company == row.parent_company)?;
            build_variance_alert(row, contact)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn contact() -> CompanyContact {
        CompanyContact {
            company: "ABC Staffing".to_string(),
            billing_email: "billing@abcstaffing.example".to_string(),
            cc: vec!["finance@example.com".to_string()],
        }
    }

    fn row(needs_review: bool) -> GroupedVarianceRow {
        GroupedVarianceRow {
            month: "2026-02".parse().expect("valid month"),
            parent_company: "ABC Staffing".to_string(),
            total_billed: dec!(2000),
            total_actual: dec!(2700),
            total_variance: dec!(700),
            variance_percentage: Some(dec!(35.00)),
            needs_review,
            report_count: 1,
        }
    }

    #[test]
    fn test_no_alert_when_within_thresholds() {
        assert_eq!(build_variance_alert(&row(false), &contact()), None);
    }

    #[test]
    fn test_alert_is_addressed_and_names_figures() {
        let alert = build_variance_alert(&row(true), &contact()).expect("alert built");
        assert_eq!(alert.to, "billing@abcstaffing.example");
        assert_eq!(alert.cc, vec!["finance@example.com".to_string()]);
        assert!(alert.subject.contains("ABC Staffing"));
        assert!(alert.subject.contains("February 2026"));
        assert!(alert.body.contains("700"));
        assert!(alert.body.contains("35.00%"));
        assert!(alert.body.contains("overbilled"));
    }

    #[test]
    fn test_underbilled_direction() {
        let mut under = row(true);
        under.total_actual = dec!(1300);
        under.total_variance = dec!(-700);
        under.variance_percentage = Some(dec!(-35.00));
        let alert = build_variance_alert(&under, &contact()).expect("alert built");
        assert!(alert.body.contains("underbilled"));
    }

    #[test]
    fn test_bulk_alerts_skip_quiet_and_unknown_rows() {
        let mut def = row(true);
        def.parent_company = "DEF Staffing".to_string();

        let alerts = build_variance_alerts(&[row(false), row(true), def], &[contact()]);
        // One quiet row, one row without a contact: a single alert remains.
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].to, "billing@abcstaffing.example");
    }
}
