//! Leave domain types for the request lifecycle.
//!
//! This module defines the core types used for managing leave request
//! status transitions and manager decisions.

use chrono::{DateTime, NaiveDate, Utc};
use leaveledger_shared::types::{LeaveRequestId, StaffId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leave request status in the approval workflow.
///
/// Requests progress through these states from submission onward.
/// The valid transitions are:
/// - Pending → ApprovedManager (manager approves)
/// - Pending → Rejected (manager rejects, terminal)
/// - ApprovedManager → ApprovedParent (parent company acknowledges, terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Submitted, awaiting a manager decision.
    Pending,
    /// Approved by the manager, awaiting parent-company acknowledgement.
    ApprovedManager,
    /// Acknowledged by the parent company (terminal).
    ApprovedParent,
    /// Rejected by the manager (terminal).
    Rejected,
}

impl LeaveStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ApprovedManager => "approved_manager",
            Self::ApprovedParent => "approved_parent",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved_manager" => Some(Self::ApprovedManager),
            "approved_parent" => Some(Self::ApprovedParent),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::ApprovedParent | Self::Rejected)
    }

    /// Returns true if the request has been approved at either level.
    ///
    /// Approved records are the ones that qualify for reconciliation.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::ApprovedManager | Self::ApprovedParent)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Leave category with a fixed chargeability flag.
///
/// Chargeable categories bill the parent company at the staff member's
/// daily rate; non-chargeable categories carry zero cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveType {
    /// Annual leave (chargeable).
    #[serde(rename = "Annual Leave")]
    Annual,
    /// Medical leave with a medical certificate (non-chargeable).
    #[serde(rename = "Medical (MC)")]
    MedicalMc,
    /// Medical leave without a medical certificate (non-chargeable).
    #[serde(rename = "Medical (No MC)")]
    MedicalNoMc,
    /// Unpaid leave (non-chargeable).
    #[serde(rename = "Unpaid Leave")]
    Unpaid,
    /// Compassionate leave (chargeable).
    #[serde(rename = "Compassionate Leave")]
    Compassionate,
}

impl LeaveType {
    /// All leave categories, in the order they are presented for selection.
    pub const ALL: [Self; 5] = [
        Self::Annual,
        Self::MedicalMc,
        Self::MedicalNoMc,
        Self::Unpaid,
        Self::Compassionate,
    ];

    /// Returns the display name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "Annual Leave",
            Self::MedicalMc => "Medical (MC)",
            Self::MedicalNoMc => "Medical (No MC)",
            Self::Unpaid => "Unpaid Leave",
            Self::Compassionate => "Compassionate Leave",
        }
    }

    /// Parses a category from its display name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Returns true if leave of this category bills the parent company.
    #[must_use]
    pub const fn is_chargeable(&self) -> bool {
        matches!(self, Self::Annual | Self::Compassionate)
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A staff member's profile, resolved at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    /// Staff identity.
    pub id: StaffId,
    /// Staff email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// The parent company employing this staff member.
    pub parent_company: String,
    /// The daily billing rate at the time of lookup.
    pub daily_rate: Decimal,
}

/// Input for a new leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSubmission {
    /// Leave category.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Parent-company reference for cross-billing (e.g. "ABC-2026-001").
    pub company_ref_id: String,
    /// Free-text reason.
    pub reason: String,
}

/// A persisted leave request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Unique identifier.
    pub id: LeaveRequestId,
    /// Staff identity.
    pub staff_id: StaffId,
    /// Staff email.
    pub staff_email: String,
    /// Staff display name.
    pub staff_name: String,
    /// Employing parent company.
    pub parent_company: String,
    /// Leave category.
    pub leave_type: LeaveType,
    /// Whether this record bills the parent company.
    pub is_chargeable: bool,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Number of calendar days, inclusive of both endpoints.
    pub total_days: i64,
    /// Free-text reason.
    pub reason: String,
    /// Parent-company reference id.
    pub company_ref_id: String,
    /// Daily rate snapshot taken at submission. Immutable thereafter, so
    /// historical cost never changes when pay rates change.
    pub daily_rate: Decimal,
    /// Billed cost: `total_days * daily_rate` when chargeable, else zero.
    pub calculated_cost: Decimal,
    /// Current workflow status.
    pub status: LeaveStatus,
    /// Rejection reason. Present iff status is `Rejected`.
    pub rejection_reason: Option<String>,
    /// Email of the deciding manager, once a decision has been made.
    pub manager_email: Option<String>,
    /// When the manager decision was made.
    pub manager_decided_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A manager decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Approve the request.
    Approve,
    /// Reject the request (requires a reason).
    Reject,
}

impl Decision {
    /// Returns the string representation of the decision.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle action representing a state transition with audit data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveAction {
    /// Manager approved a pending request.
    Approve {
        /// The new status after approval.
        new_status: LeaveStatus,
        /// Email of the deciding manager.
        decided_by: String,
        /// When the decision was made.
        decided_at: DateTime<Utc>,
    },
    /// Manager rejected a pending request.
    Reject {
        /// The new status after rejection.
        new_status: LeaveStatus,
        /// Email of the deciding manager.
        decided_by: String,
        /// When the decision was made.
        decided_at: DateTime<Utc>,
        /// The reason for rejection, stored verbatim.
        rejection_reason: String,
    },
    /// Parent company acknowledged a manager-approved request.
    Acknowledge {
        /// The new status after acknowledgement.
        new_status: LeaveStatus,
        /// When the acknowledgement arrived.
        acknowledged_at: DateTime<Utc>,
    },
}

impl LeaveAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub const fn new_status(&self) -> LeaveStatus {
        match self {
            Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::Acknowledge { new_status, .. } => *new_status,
        }
    }
}
