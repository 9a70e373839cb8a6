//! Property-based tests for the leave lifecycle.

use chrono::{Duration, NaiveDate, Utc};
use leaveledger_shared::types::StaffId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::leave::error::LeaveError;
use crate::leave::service::LeaveService;
use crate::leave::types::{Decision, LeaveStatus, LeaveSubmission, LeaveType, StaffProfile};

fn arb_status() -> impl Strategy<Value = LeaveStatus> {
    prop_oneof![
        Just(LeaveStatus::Pending),
        Just(LeaveStatus::ApprovedManager),
        Just(LeaveStatus::ApprovedParent),
        Just(LeaveStatus::Rejected),
    ]
}

fn arb_leave_type() -> impl Strategy<Value = LeaveType> {
    prop_oneof![
        Just(LeaveType::Annual),
        Just(LeaveType::MedicalMc),
        Just(LeaveType::MedicalNoMc),
        Just(LeaveType::Unpaid),
        Just(LeaveType::Compassionate),
    ]
}

fn arb_decision() -> impl Strategy<Value = Decision> {
    prop_oneof![Just(Decision::Approve), Just(Decision::Reject)]
}

fn profile(daily_rate: Decimal) -> StaffProfile {
    StaffProfile {
        id: StaffId::new(),
        email: "staff@example.com".to_string(),
        name: "Staff".to_string(),
        parent_company: "ABC Staffing".to_string(),
        daily_rate,
    }
}

fn submission(leave_type: LeaveType, start: NaiveDate, span_days: i64) -> LeaveSubmission {
    LeaveSubmission {
        leave_type,
        start_date: start,
        end_date: start + Duration::days(span_days),
        company_ref_id: "REF-1".to_string(),
        reason: "reason".to_string(),
    }
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // 2020-01-01 .. 2030-12-31 as day offsets.
    (0i64..4018).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date") + Duration::days(offset)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// total_days counts both endpoints and is always at least 1.
    #[test]
    fn prop_total_days_inclusive(
        start in arb_date(),
        span in 0i64..365,
        leave_type in arb_leave_type(),
        rate in 0i64..10_000,
    ) {
        let record = LeaveService::prepare(
            &profile(Decimal::from(rate)),
            submission(leave_type, start, span),
            Utc::now(),
        ).expect("valid submission");

        prop_assert_eq!(record.total_days, span + 1);
        prop_assert!(record.total_days >= 1);
    }

    /// Non-chargeable categories cost exactly zero for any rate and duration;
    /// chargeable categories cost days * rate.
    #[test]
    fn prop_cost_follows_chargeability(
        start in arb_date(),
        span in 0i64..365,
        leave_type in arb_leave_type(),
        rate in 0i64..10_000,
    ) {
        let rate = Decimal::from(rate);
        let record = LeaveService::prepare(
            &profile(rate),
            submission(leave_type, start, span),
            Utc::now(),
        ).expect("valid submission");

        if leave_type.is_chargeable() {
            prop_assert_eq!(record.calculated_cost, Decimal::from(span + 1) * rate);
        } else {
            prop_assert_eq!(record.calculated_cost, Decimal::ZERO);
        }
    }

    /// Reversed date ranges never produce a record.
    #[test]
    fn prop_reversed_dates_rejected(
        start in arb_date(),
        span in 1i64..365,
        leave_type in arb_leave_type(),
    ) {
        let result = LeaveService::prepare(
            &profile(Decimal::from(100)),
            submission(leave_type, start, -span),
            Utc::now(),
        );
        prop_assert!(
            matches!(result, Err(LeaveError::Validation { .. })),
            "expected Validation error, got {:?}",
            result
        );
    }

    /// Deciding a non-pending record fails for every (status, decision) pair.
    #[test]
    fn prop_decide_requires_pending(
        status in arb_status(),
        decision in arb_decision(),
    ) {
        let result = LeaveService::decide(
            status,
            decision,
            "manager@example.com".to_string(),
            Some("reason".to_string()),
        );
        if status == LeaveStatus::Pending {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(
                matches!(result, Err(LeaveError::InvalidTransition { .. })),
                "expected InvalidTransition error, got {:?}",
                result
            );
        }
    }

    /// A decision from pending always lands in the right status.
    #[test]
    fn prop_decision_target_status(decision in arb_decision()) {
        let action = LeaveService::decide(
            LeaveStatus::Pending,
            decision,
            "manager@example.com".to_string(),
            Some("reason".to_string()),
        ).expect("pending is decidable");

        let expected = match decision {
            Decision::Approve => LeaveStatus::ApprovedManager,
            Decision::Reject => LeaveStatus::Rejected,
        };
        prop_assert_eq!(action.new_status(), expected);
    }

    /// Terminal statuses admit no outgoing transition.
    #[test]
    fn prop_terminal_statuses_are_terminal(from in arb_status(), to in arb_status()) {
        if from.is_terminal() {
            prop_assert!(!LeaveService::is_valid_transition(from, to));
        }
    }
}
