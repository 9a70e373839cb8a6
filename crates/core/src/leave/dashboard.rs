//! Approval dashboard read surfaces.
//!
//! Pure functions over the full record set: the dashboard is recomputed
//! from (records, filter criteria) on demand rather than held as mutable
//! cross-cutting state.

use serde::{Deserialize, Serialize};

use crate::leave::types::{LeaveRecord, LeaveStatus, LeaveType};

/// How many processed requests the dashboard shows.
const PROCESSED_LIMIT: usize = 10;

/// Name/category filter applied to the approval dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveFilter {
    /// Case-insensitive substring match on the staff name.
    pub search_name: Option<String>,
    /// Match a single leave category.
    pub leave_type: Option<LeaveType>,
}

impl LeaveFilter {
    /// Returns true if the record passes this filter.
    #[must_use]
    pub fn matches(&self, record: &LeaveRecord) -> bool {
        if let Some(search) = &self.search_name
            && !search.is_empty()
            && !record
                .staff_name
                .to_lowercase()
                .contains(&search.to_lowercase())
        {
            return false;
        }
        if let Some(leave_type) = self.leave_type
            && record.leave_type != leave_type
        {
            return false;
        }
        true
    }
}

/// Status counts shown at the top of the approval dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveStats {
    /// Requests awaiting a manager decision.
    pub pending: usize,
    /// Requests approved at either level.
    pub approved: usize,
    /// Requests approved by the manager, awaiting the parent company.
    pub awaiting_parent: usize,
    /// Rejected requests.
    pub rejected: usize,
}

/// The approval dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Pending requests matching the filter.
    pub pending: Vec<LeaveRecord>,
    /// The most recently processed requests matching the filter,
    /// newest first, capped at ten.
    pub processed: Vec<LeaveRecord>,
    /// Status counts over the unfiltered record set.
    pub stats: LeaveStats,
}

/// Builds the approval dashboard from the full record set.
///
/// Stats count every record; the pending/processed lists honor the filter.
#[must_use]
pub fn build_dashboard(records: &[LeaveRecord], filter: &LeaveFilter) -> DashboardView {
    let mut stats = LeaveStats::default();
    for record in records {
        match record.status {
            LeaveStatus::Pending => stats.pending += 1,
            LeaveStatus::ApprovedManager => {
                stats.approved += 1;
                stats.awaiting_parent += 1;
            }
            LeaveStatus::ApprovedParent => stats.approved += 1,
            LeaveStatus::Rejected => stats.rejected += 1,
        }
    }

    let pending: Vec<LeaveRecord> = records
        .iter()
        .filter(|r| r.status == LeaveStatus::Pending && filter.matches(r))
        .cloned()
        .collect();

    let mut processed: Vec<LeaveRecord> = records
        .iter()
        .filter(|r| r.status != LeaveStatus::Pending && filter.matches(r))
        .cloned()
        .collect();
    processed.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    processed.truncate(PROCESSED_LIMIT);

    DashboardView {
        pending,
        processed,
        stats,
    }
}
