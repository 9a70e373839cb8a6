//! Audit timeline compilation.
//!
//! The trail is not stored as its own collection. Each compilation walks
//! the leave records, report headers, and prior export records, turns
//! them into events, and sorts the merged timeline newest first. Event
//! ids derive from source record ids, so recompiling yields the same ids.

use crate::access::Role;
use crate::audit::types::{AuditAction, AuditEvent, AuditFilter};
use crate::leave::types::{LeaveRecord, LeaveStatus};
use crate::reconciliation::types::ReconciliationReport;

use super::types::AuditExportRecord;

/// Fallback when a decided record lost its manager attribution.
const UNKNOWN_MANAGER: &str = "manager@example.com";

/// Compiles the audit timeline from its three sources, newest first.
#[must_use]
pub fn compile(
    leaves: &[LeaveRecord],
    reports: &[ReconciliationReport],
    exports: &[AuditExportRecord],
) -> Vec<AuditEvent> {
    let mut events = Vec::new();

    for record in leaves {
        events.push(submission_event(record));
        if let Some(event) = decision_event(record) {
            events.push(event);
        }
    }
    for report in reports {
        events.push(report_event(report));
    }
    for export in exports {
        events.push(export_event(export));
    }

    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    events
}

/// Compiles the timeline and keeps only events passing the filter.
#[must_use]
pub fn compile_filtered(
    leaves: &[LeaveRecord],
    reports: &[ReconciliationReport],
    exports: &[AuditExportRecord],
    filter: &AuditFilter,
) -> Vec<AuditEvent> {
    compile(leaves, reports, exports)
        .into_iter()
        .filter(|event| filter.matches(event))
        .collect()
}

fn submission_event(record: &LeaveRecord) -> AuditEvent {
    AuditEvent {
        id: record.id.to_string(),
        timestamp: record.created_at,
        user: record.staff_email.clone(),
        role: Role::ContractStaff.as_str().to_string(),
        action: AuditAction::AppliedLeave,
        description: format!("Applied {} days {}", record.total_days, record.leave_type),
        details: vec![
            ("staffName".to_string(), record.staff_name.clone()),
            ("company".to_string(), record.parent_company.clone()),
            (
                "dates".to_string(),
                format!("{} to {}", record.start_date, record.end_date),
            ),
            ("status".to_string(), record.status.as_str().to_string()),
        ],
    }
}

/// The manager decision event, when the record carries one.
fn decision_event(record: &LeaveRecord) -> Option<AuditEvent> {
    let decided_at = record.manager_decided_at?;
    let action = match record.status {
        LeaveStatus::ApprovedManager | LeaveStatus::ApprovedParent => AuditAction::ApprovedLeave,
        LeaveStatus::Rejected => AuditAction::RejectedLeave,
        LeaveStatus::Pending => return None,
    };

    let verb = if action == AuditAction::ApprovedLeave {
        "Approved"
    } else {
        "Rejected"
    };
    let mut details = vec![
        ("staffName".to_string(), record.staff_name.clone()),
        ("company".to_string(), record.parent_company.clone()),
        (
            "leaveType".to_string(),
            record.leave_type.to_string(),
        ),
    ];
    if let Some(reason) = &record.rejection_reason {
        details.push(("rejectionReason".to_string(), reason.clone()));
    }

    Some(AuditEvent {
        id: format!("{}_manager", record.id),
        timestamp: decided_at,
        user: record
            .manager_email
            .clone()
            .unwrap_or_else(|| UNKNOWN_MANAGER.to_string()),
        role: Role::Manager.as_str().to_string(),
        action,
        description: format!("{verb} leave for {}", record.staff_name),
        details,
    })
}

fn report_event(report: &ReconciliationReport) -> AuditEvent {
    AuditEvent {
        id: report.id.to_string(),
        timestamp: report.generated_at,
        user: report.generated_by_email.clone(),
        role: Role::FinanceOfficer.as_str().to_string(),
        action: AuditAction::GeneratedReport,
        description: format!(
            "Generated reconciliation report for {} - {}",
            report.parent_company, report.month
        ),
        details: vec![
            ("company".to_string(), report.parent_company.clone()),
            ("month".to_string(), report.month.to_string()),
            (
                "totalBilled".to_string(),
                report.total_billed_amount.to_string(),
            ),
            ("variance".to_string(), report.total_variance.to_string()),
        ],
    }
}

fn export_event(export: &AuditExportRecord) -> AuditEvent {
    AuditEvent {
        id: export.id.to_string(),
        timestamp: export.exported_at,
        user: export.exported_by.clone(),
        role: export.exported_by_role.clone(),
        action: AuditAction::ExportedAudit,
        description: format!("Exported audit trail ({} records)", export.record_count),
        details: vec![
            ("filename".to_string(), export.filename.clone()),
            ("filters".to_string(), export.filters.clone()),
        ],
    }
}
