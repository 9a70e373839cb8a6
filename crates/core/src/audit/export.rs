//! CSV export of the audit timeline.

use std::fmt::Write as _;

use crate::audit::types::AuditEvent;

/// Timestamp format used in exported files.
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Renders audit events as CSV.
///
/// Every field is double-quoted; embedded quotes are doubled. Details
/// flatten into one column as `key: value` pairs separated by `; `.
#[must_use]
pub fn audit_csv(events: &[AuditEvent]) -> String {
    let mut out = String::from("\"Timestamp\",\"User\",\"Role\",\"Action\",\"Description\",\"Details\"\n");
    for event in events {
        let details = event
            .details
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            quoted(&event.timestamp.format(TIMESTAMP_FORMAT).to_string()),
            quoted(&event.user),
            quoted(&event.role),
            quoted(event.action.label()),
            quoted(&event.description),
            quoted(&details),
        );
    }
    out
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
