//! Leave lifecycle service: validation, derivation, and state transitions.
//!
//! `LeaveService` is stateless. It validates submissions into fully
//! derived records and validates manager decisions into `LeaveAction`
//! values carrying the audit trail fields; the engine applies them to the
//! store.

use chrono::{DateTime, Utc};
use leaveledger_shared::types::LeaveRequestId;
use rust_decimal::Decimal;

use crate::leave::error::LeaveError;
use crate::leave::types::{
    Decision, LeaveAction, LeaveRecord, LeaveStatus, LeaveSubmission, StaffProfile,
};

/// Stateless service for the leave request lifecycle.
pub struct LeaveService;

impl LeaveService {
    /// Validates a submission and derives the record to persist.
    ///
    /// Derivation rules:
    /// - `total_days` counts both endpoints, so a single-day leave is 1.
    /// - `daily_rate` is snapshotted from the profile.
    /// - `calculated_cost` is `total_days * daily_rate` for chargeable
    ///   categories and exactly zero otherwise.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::Validation` if the end date precedes the start
    /// date, the reason is blank, the company reference is blank, or the
    /// profile carries a negative daily rate.
    pub fn prepare(
        profile: &StaffProfile,
        submission: LeaveSubmission,
        now: DateTime<Utc>,
    ) -> Result<LeaveRecord, LeaveError> {
        if submission.end_date < submission.start_date {
            return Err(LeaveError::Validation {
                field: "end_date",
                message: format!(
                    "end date {} is before start date {}",
                    submission.end_date, submission.start_date
                ),
            });
        }
        if submission.reason.trim().is_empty() {
            return Err(LeaveError::Validation {
                field: "reason",
                message: "reason must not be empty".to_string(),
            });
        }
        if submission.company_ref_id.trim().is_empty() {
            return Err(LeaveError::Validation {
                field: "company_ref_id",
                message: "parent company reference is required".to_string(),
            });
        }
        if profile.daily_rate.is_sign_negative() {
            return Err(LeaveError::Validation {
                field: "daily_rate",
                message: format!("daily rate {} is negative", profile.daily_rate),
            });
        }

        // Inclusive of both endpoints: a one-day leave spans start == end.
        let total_days = (submission.end_date - submission.start_date).num_days() + 1;
        let chargeable = submission.leave_type.is_chargeable();
        let calculated_cost = if chargeable {
            Decimal::from(total_days) * profile.daily_rate
        } else {
            Decimal::ZERO
        };

        Ok(LeaveRecord {
            id: LeaveRequestId::new(),
            staff_id: profile.id,
            staff_email: profile.email.clone(),
            staff_name: profile.name.clone(),
            parent_company: profile.parent_company.clone(),
            leave_type: submission.leave_type,
            is_chargeable: chargeable,
            start_date: submission.start_date,
            end_date: submission.end_date,
            total_days,
            reason: submission.reason,
            company_ref_id: submission.company_ref_id,
            daily_rate: profile.daily_rate,
            calculated_cost,
            status: LeaveStatus::Pending,
            rejection_reason: None,
            manager_email: None,
            manager_decided_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validates a manager decision against the current status.
    ///
    /// Only `Pending` requests can be decided. Rejection requires a
    /// non-empty reason, stored verbatim.
    ///
    /// # Errors
    ///
    /// * `LeaveError::InvalidTransition` if the request is not pending
    /// * `LeaveError::RejectionReasonRequired` if rejecting without a reason
    pub fn decide(
        current_status: LeaveStatus,
        decision: Decision,
        decided_by: String,
        reason: Option<String>,
    ) -> Result<LeaveAction, LeaveError> {
        let target = match decision {
            Decision::Approve => LeaveStatus::ApprovedManager,
            Decision::Reject => LeaveStatus::Rejected,
        };
        if current_status != LeaveStatus::Pending {
            return Err(LeaveError::InvalidTransition {
                from: current_status,
                to: target,
            });
        }

        match decision {
            Decision::Approve => Ok(LeaveAction::Approve {
                new_status: LeaveStatus::ApprovedManager,
                decided_by,
                decided_at: Utc::now(),
            }),
            Decision::Reject => {
                let reason = reason.unwrap_or_default();
                if reason.trim().is_empty() {
                    return Err(LeaveError::RejectionReasonRequired);
                }
                Ok(LeaveAction::Reject {
                    new_status: LeaveStatus::Rejected,
                    decided_by,
                    decided_at: Utc::now(),
                    rejection_reason: reason,
                })
            }
        }
    }

    /// Validates a parent-company acknowledgement.
    ///
    /// The trigger is external to the core; only the transition itself is
    /// enforced here.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidTransition` unless the request is in
    /// `ApprovedManager`.
    pub fn acknowledge(current_status: LeaveStatus) -> Result<LeaveAction, LeaveError> {
        match current_status {
            LeaveStatus::ApprovedManager => Ok(LeaveAction::Acknowledge {
                new_status: LeaveStatus::ApprovedParent,
                acknowledged_at: Utc::now(),
            }),
            _ => Err(LeaveError::InvalidTransition {
                from: current_status,
                to: LeaveStatus::ApprovedParent,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → ApprovedManager (approve)
    /// - Pending → Rejected (reject)
    /// - ApprovedManager → ApprovedParent (parent acknowledgement)
    #[must_use]
    pub fn is_valid_transition(from: LeaveStatus, to: LeaveStatus) -> bool {
        matches!(
            (from, to),
            (
                LeaveStatus::Pending,
                LeaveStatus::ApprovedManager | LeaveStatus::Rejected
            ) | (LeaveStatus::ApprovedManager, LeaveStatus::ApprovedParent)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use leaveledger_shared::types::StaffId;
    use rust_decimal_macros::dec;

    use crate::leave::types::LeaveType;

    fn profile() -> StaffProfile {
        StaffProfile {
            id: StaffId::new(),
            email: "alice@example.com".to_string(),
            name: "Alice Tan".to_string(),
            parent_company: "ABC Staffing".to_string(),
            daily_rate: dec!(400),
        }
    }

    fn submission(leave_type: LeaveType, start: &str, end: &str) -> LeaveSubmission {
        LeaveSubmission {
            leave_type,
            start_date: start.parse::<NaiveDate>().expect("valid date"),
            end_date: end.parse::<NaiveDate>().expect("valid date"),
            company_ref_id: "ABC-2026-001".to_string(),
            reason: "Family holiday".to_string(),
        }
    }

    #[test]
    fn test_prepare_derives_days_and_cost() {
        let record = LeaveService::prepare(
            &profile(),
            submission(LeaveType::Annual, "2026-02-02", "2026-02-06"),
            Utc::now(),
        )
        .expect("valid submission");

        assert_eq!(record.total_days, 5);
        assert_eq!(record.calculated_cost, dec!(2000));
        assert_eq!(record.daily_rate, dec!(400));
        assert_eq!(record.status, LeaveStatus::Pending);
        assert!(record.is_chargeable);
        assert!(record.rejection_reason.is_none());
    }

    #[test]
    fn test_prepare_single_day_is_one() {
        let record = LeaveService::prepare(
            &profile(),
            submission(LeaveType::Annual, "2026-02-02", "2026-02-02"),
            Utc::now(),
        )
        .expect("valid submission");
        assert_eq!(record.total_days, 1);
        assert_eq!(record.calculated_cost, dec!(400));
    }

    #[test]
    fn test_prepare_non_chargeable_costs_zero() {
        for leave_type in [LeaveType::MedicalMc, LeaveType::MedicalNoMc, LeaveType::Unpaid] {
            let record = LeaveService::prepare(
                &profile(),
                submission(leave_type, "2026-02-02", "2026-02-10"),
                Utc::now(),
            )
            .expect("valid submission");
            assert_eq!(record.calculated_cost, Decimal::ZERO, "{leave_type}");
            assert!(!record.is_chargeable);
            // The rate snapshot is still taken.
            assert_eq!(record.daily_rate, dec!(400));
        }
    }

    #[test]
    fn test_prepare_rejects_reversed_dates() {
        let result = LeaveService::prepare(
            &profile(),
            submission(LeaveType::Annual, "2026-02-06", "2026-02-02"),
            Utc::now(),
        );
        assert!(matches!(
            result,
            Err(LeaveError::Validation { field: "end_date", .. })
        ));
    }

    #[test]
    fn test_prepare_rejects_blank_reason() {
        let mut sub = submission(LeaveType::Annual, "2026-02-02", "2026-02-06");
        sub.reason = "   ".to_string();
        let result = LeaveService::prepare(&profile(), sub, Utc::now());
        assert!(matches!(
            result,
            Err(LeaveError::Validation { field: "reason", .. })
        ));
    }

    #[test]
    fn test_prepare_rejects_blank_company_ref() {
        let mut sub = submission(LeaveType::Annual, "2026-02-02", "2026-02-06");
        sub.company_ref_id = String::new();
        let result = LeaveService::prepare(&profile(), sub, Utc::now());
        assert!(matches!(
            result,
            Err(LeaveError::Validation { field: "company_ref_id", .. })
        ));
    }

    #[test]
    fn test_approve_from_pending() {
        let action = LeaveService::decide(
            LeaveStatus::Pending,
            Decision::Approve,
            "manager@example.com".to_string(),
            None,
        )
        .expect("approve is legal from pending");
        assert_eq!(action.new_status(), LeaveStatus::ApprovedManager);
    }

    #[test]
    fn test_reject_from_pending_stores_reason_verbatim() {
        let action = LeaveService::decide(
            LeaveStatus::Pending,
            Decision::Reject,
            "manager@example.com".to_string(),
            Some("  Insufficient coverage during February  ".to_string()),
        )
        .expect("reject with reason is legal from pending");
        match action {
            LeaveAction::Reject { rejection_reason, new_status, .. } => {
                assert_eq!(new_status, LeaveStatus::Rejected);
                // Stored verbatim, whitespace included.
                assert_eq!(rejection_reason, "  Insufficient coverage during February  ");
            }
            other => panic!("expected Reject action, got {other:?}"),
        }
    }

    #[test]
    fn test_reject_without_reason_fails() {
        for reason in [None, Some(String::new()), Some("   ".to_string())] {
            let result = LeaveService::decide(
                LeaveStatus::Pending,
                Decision::Reject,
                "manager@example.com".to_string(),
                reason,
            );
            assert!(matches!(result, Err(LeaveError::RejectionReasonRequired)));
        }
    }

    #[test]
    fn test_decide_from_non_pending_fails() {
        for status in [
            LeaveStatus::ApprovedManager,
            LeaveStatus::ApprovedParent,
            LeaveStatus::Rejected,
        ] {
            for decision in [Decision::Approve, Decision::Reject] {
                let result = LeaveService::decide(
                    status,
                    decision,
                    "manager@example.com".to_string(),
                    Some("reason".to_string()),
                );
                assert!(
                    matches!(result, Err(LeaveError::InvalidTransition { .. })),
                    "{status} + {decision} should be rejected"
                );
            }
        }
    }

    #[test]
    fn test_acknowledge_transitions() {
        let action = LeaveService::acknowledge(LeaveStatus::ApprovedManager)
            .expect("acknowledge is legal from approved_manager");
        assert_eq!(action.new_status(), LeaveStatus::ApprovedParent);

        for status in [
            LeaveStatus::Pending,
            LeaveStatus::ApprovedParent,
            LeaveStatus::Rejected,
        ] {
            assert!(matches!(
                LeaveService::acknowledge(status),
                Err(LeaveError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(LeaveService::is_valid_transition(
            LeaveStatus::Pending,
            LeaveStatus::ApprovedManager
        ));
        assert!(LeaveService::is_valid_transition(
            LeaveStatus::Pending,
            LeaveStatus::Rejected
        ));
        assert!(LeaveService::is_valid_transition(
            LeaveStatus::ApprovedManager,
            LeaveStatus::ApprovedParent
        ));

        assert!(!LeaveService::is_valid_transition(
            LeaveStatus::Pending,
            LeaveStatus::ApprovedParent
        ));
        assert!(!LeaveService::is_valid_transition(
            LeaveStatus::Rejected,
            LeaveStatus::Pending
        ));
        assert!(!LeaveService::is_valid_transition(
            LeaveStatus::ApprovedParent,
            LeaveStatus::ApprovedManager
        ));
    }
}
