//! Role capabilities and operation permissions.
//!
//! The core enforces permissions at the operation boundary: every engine
//! entry point takes the acting user and checks their role before touching
//! the store, instead of trusting the caller to have routed the right role
//! to the right screen.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// User role in the leave and billing workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Submits leave requests and views their own.
    ContractStaff,
    /// Decides pending leave requests.
    Manager,
    /// Generates reconciliation reports and works the audit trail.
    FinanceOfficer,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ContractStaff => "contract_staff",
            Self::Manager => "manager",
            Self::FinanceOfficer => "finance_officer",
        }
    }

    /// Parses a role from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "contract_staff" => Some(Self::ContractStaff),
            "manager" => Some(Self::Manager),
            "finance_officer" => Some(Self::FinanceOfficer),
            _ => None,
        }
    }

    /// Returns true if this role may perform the given operation.
    #[must_use]
    pub const fn permits(&self, operation: Operation) -> bool {
        match self {
            Self::ContractStaff => matches!(
                operation,
                Operation::SubmitLeave | Operation::ViewOwnLeave
            ),
            Self::Manager => matches!(
                operation,
                Operation::DecideLeave | Operation::ViewAllLeave
            ),
            Self::FinanceOfficer => matches!(
                operation,
                Operation::GenerateReport
                    | Operation::ViewVariance
                    | Operation::CompileAudit
                    | Operation::ExportAudit
            ),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An operation guarded by a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Submit a new leave request.
    SubmitLeave,
    /// View the caller's own leave requests.
    ViewOwnLeave,
    /// Approve or reject a pending leave request.
    DecideLeave,
    /// View every leave request (approval dashboard).
    ViewAllLeave,
    /// Generate a reconciliation report.
    GenerateReport,
    /// View grouped variance rows.
    ViewVariance,
    /// Compile the audit trail.
    CompileAudit,
    /// Export the audit trail.
    ExportAudit,
}

impl Operation {
    /// Returns the string representation of the operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SubmitLeave => "submit_leave",
            Self::ViewOwnLeave => "view_own_leave",
            Self::DecideLeave => "decide_leave",
            Self::ViewAllLeave => "view_all_leave",
            Self::GenerateReport => "generate_report",
            Self::ViewVariance => "view_variance",
            Self::CompileAudit => "compile_audit",
            Self::ExportAudit => "export_audit",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The acting user on an engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// User identity.
    pub id: Uuid,
    /// User email, used for audit descriptions and profile lookup.
    pub email: String,
    /// The role the caller authenticated as.
    pub role: Role,
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub const fn new(id: Uuid, email: String, role: Role) -> Self {
        Self { id, email, role }
    }

    /// Checks that this actor may perform the given operation.
    pub fn require(&self, operation: Operation) -> Result<(), AccessError> {
        if self.role.permits(operation) {
            Ok(())
        } else {
            Err(AccessError {
                role: self.role,
                operation,
            })
        }
    }
}

/// An operation was attempted by a role that does not permit it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Role {role} is not permitted to {operation}")]
pub struct AccessError {
    /// The acting role.
    pub role: Role,
    /// The attempted operation.
    pub operation: Operation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn actor(role: Role) -> Actor {
        Actor::new(Uuid::new_v4(), "user@example.com".to_string(), role)
    }

    #[test]
    fn test_role_parse_roundtrip() {
        for role in [Role::ContractStaff, Role::Manager, Role::FinanceOfficer] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("MANAGER"), Some(Role::Manager));
        assert_eq!(Role::parse("intern"), None);
    }

    #[rstest]
    #[case(Role::ContractStaff, Operation::SubmitLeave, true)]
    #[case(Role::ContractStaff, Operation::DecideLeave, false)]
    #[case(Role::ContractStaff, Operation::GenerateReport, false)]
    #[case(Role::Manager, Operation::DecideLeave, true)]
    #[case(Role::Manager, Operation::ViewAllLeave, true)]
    #[case(Role::Manager, Operation::SubmitLeave, false)]
    #[case(Role::Manager, Operation::ExportAudit, false)]
    #[case(Role::FinanceOfficer, Operation::GenerateReport, true)]
    #[case(Role::FinanceOfficer, Operation::ExportAudit, true)]
    #[case(Role::FinanceOfficer, Operation::DecideLeave, false)]
    fn test_permissions(#[case] role: Role, #[case] op: Operation, #[case] allowed: bool) {
        assert_eq!(role.permits(op), allowed);
        assert_eq!(actor(role).require(op).is_ok(), allowed);
    }

    #[test]
    fn test_access_error_display() {
        let err = actor(Role::ContractStaff)
            .require(Operation::GenerateReport)
            .expect_err("staff cannot generate reports");
        assert_eq!(
            err.to_string(),
            "Role contract_staff is not permitted to generate_report"
        );
    }
}
