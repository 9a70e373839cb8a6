//! Audit trail data types.

use chrono::{DateTime, Utc};
use leaveledger_shared::types::ExportId;
use serde::{Deserialize, Serialize};

/// The kind of activity an audit event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A staff member submitted a leave request.
    AppliedLeave,
    /// A manager approved a leave request.
    ApprovedLeave,
    /// A manager rejected a leave request.
    RejectedLeave,
    /// A finance officer generated a reconciliation report.
    GeneratedReport,
    /// Someone exported the audit trail.
    ExportedAudit,
}

impl AuditAction {
    /// Returns the lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AppliedLeave => "applied_leave",
            Self::ApprovedLeave => "approved_leave",
            Self::RejectedLeave => "rejected_leave",
            Self::GeneratedReport => "generated_report",
            Self::ExportedAudit => "exported_audit",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AppliedLeave => "Applied Leave",
            Self::ApprovedLeave => "Approved Leave",
            Self::RejectedLeave => "Rejected Leave",
            Self::GeneratedReport => "Generated Report",
            Self::ExportedAudit => "Exported Audit",
        }
    }

    /// Returns the timeline icon for this action.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::AppliedLeave => "📝",
            Self::ApprovedLeave => "✅",
            Self::RejectedLeave => "❌",
            Self::GeneratedReport => "📊",
            Self::ExportedAudit => "📤",
        }
    }

    /// Returns the timeline color for this action.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::AppliedLeave => "#17a2b8",
            Self::ApprovedLeave => "#28a745",
            Self::RejectedLeave => "#dc3545",
            Self::GeneratedReport => "#6f42c1",
            Self::ExportedAudit => "#fd7e14",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry on the audit timeline.
///
/// Events are compiled on demand from the underlying records rather than
/// stored; the id is stable across compilations because it derives from
/// the source record's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Stable identifier derived from the source record.
    pub id: String,
    /// When the activity happened.
    pub timestamp: DateTime<Utc>,
    /// Who did it (email address).
    pub user: String,
    /// The acting role identifier.
    pub role: String,
    /// What kind of activity this is.
    pub action: AuditAction,
    /// One-line human-readable description.
    pub description: String,
    /// Key/value context shown under the description.
    pub details: Vec<(String, String)>,
}

/// Filter criteria applied to the audit timeline.
///
/// All set fields AND-combine. The text search is a case-insensitive
/// substring match over the description, the user, and detail values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFilter {
    /// Free-text search.
    pub search: Option<String>,
    /// Match a single action kind.
    pub action: Option<AuditAction>,
    /// Match a single role identifier.
    pub role: Option<String>,
}

impl AuditFilter {
    /// Returns true if the event passes this filter.
    #[must_use]
    pub fn matches(&self, event: &AuditEvent) -> bool {
        if let Some(action) = self.action
            && event.action != action
        {
            return false;
        }
        if let Some(role) = &self.role
            && !event.role.eq_ignore_ascii_case(role)
        {
            return false;
        }
        if let Some(search) = &self.search
            && !search.is_empty()
        {
            let needle = search.to_lowercase();
            let hit = event.description.to_lowercase().contains(&needle)
                || event.user.to_lowercase().contains(&needle)
                || event
                    .details
                    .iter()
                    .any(|(_, value)| value.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }

    /// One-line summary of the applied criteria, recorded on exports.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(search) = &self.search
            && !search.is_empty()
        {
            parts.push(format!("search={search}"));
        }
        if let Some(action) = self.action {
            parts.push(format!("action={action}"));
        }
        if let Some(role) = &self.role {
            parts.push(format!("role={role}"));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// A persisted record of an audit trail export.
///
/// Exports feed back into the trail: each one becomes an
/// `ExportedAudit` event on the next compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditExportRecord {
    /// Unique identifier.
    pub id: ExportId,
    /// When the export happened.
    pub exported_at: DateTime<Utc>,
    /// Who exported (email address).
    pub exported_by: String,
    /// The exporter's role identifier.
    pub exported_by_role: String,
    /// How many events the export contained.
    pub record_count: usize,
    /// The file name handed to the caller.
    pub filename: String,
    /// Summary of the filter criteria in effect.
    pub filters: String,
}
