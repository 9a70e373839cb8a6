//! Leave engine: lifecycle operations against the persistence store.
//!
//! Follows the load → validate via `LeaveService` → write-back shape.
//! Concurrent decisions on the same record are not locked; the store's
//! last-write-wins semantics apply (an accepted weak-consistency policy,
//! not something the engine papers over).

use chrono::Utc;
use leaveledger_shared::types::LeaveRequestId;
use tracing::{debug, info};

use crate::access::{Actor, Operation};
use crate::leave::dashboard::{DashboardView, LeaveFilter, build_dashboard};
use crate::leave::error::LeaveError;
use crate::leave::service::LeaveService;
use crate::leave::types::{Decision, LeaveAction, LeaveRecord, LeaveSubmission};
use crate::store::{LeaveQuery, LeaveStore, LeaveUpdate, StaffDirectory};

/// Lifecycle engine over a leave store and staff directory.
pub struct LeaveEngine<S> {
    store: S,
}

impl<S> LeaveEngine<S>
where
    S: LeaveStore + StaffDirectory,
{
    /// Creates a new engine over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Submits a new leave request for the acting staff member.
    ///
    /// Resolves the staff profile by the actor's email, derives the record
    /// (duration, chargeability, cost snapshot), and persists it as
    /// `Pending`.
    ///
    /// # Errors
    ///
    /// * `LeaveError::Forbidden` if the role may not submit leave
    /// * `LeaveError::ProfileNotFound` if the actor has no staff profile
    /// * `LeaveError::Validation` for malformed submissions
    /// * `LeaveError::Store` if persistence fails
    pub async fn submit(
        &self,
        actor: &Actor,
        submission: LeaveSubmission,
    ) -> Result<LeaveRecord, LeaveError> {
        actor.require(Operation::SubmitLeave)?;

        let profile = self
            .store
            .lookup_staff(&actor.email)
            .await?
            .ok_or_else(|| LeaveError::ProfileNotFound(actor.email.clone()))?;

        let record = LeaveService::prepare(&profile, submission, Utc::now())?;
        let id = self.store.insert_leave(record.clone()).await?;

        info!(
            leave_id = %id,
            staff = %record.staff_email,
            leave_type = %record.leave_type,
            days = record.total_days,
            cost = %record.calculated_cost,
            "leave request submitted"
        );
        Ok(record)
    }

    /// Applies a manager decision to a pending request.
    ///
    /// # Errors
    ///
    /// * `LeaveError::Forbidden` if the role may not decide leave
    /// * `LeaveError::RecordNotFound` if the id is unknown
    /// * `LeaveError::InvalidTransition` if the request is not pending
    /// * `LeaveError::RejectionReasonRequired` if rejecting without a reason
    /// * `LeaveError::Store` if persistence fails
    pub async fn decide(
        &self,
        actor: &Actor,
        id: LeaveRequestId,
        decision: Decision,
        reason: Option<String>,
    ) -> Result<LeaveRecord, LeaveError> {
        actor.require(Operation::DecideLeave)?;

        let record = self
            .store
            .get_leave(id)
            .await?
            .ok_or(LeaveError::RecordNotFound(id))?;

        let action = LeaveService::decide(record.status, decision, actor.email.clone(), reason)?;
        let updated = apply_action(record, &action);
        self.store
            .update_leave(id, update_from_action(&action, &updated))
            .await?;

        info!(
            leave_id = %id,
            manager = %actor.email,
            decision = %decision,
            new_status = %updated.status,
            "leave request decided"
        );
        Ok(updated)
    }

    /// Records a parent-company acknowledgement of an approved request.
    ///
    /// The trigger arrives from outside the core (the parent company's
    /// systems); no role check is applied here.
    ///
    /// # Errors
    ///
    /// * `LeaveError::RecordNotFound` if the id is unknown
    /// * `LeaveError::InvalidTransition` if the request is not manager-approved
    /// * `LeaveError::Store` if persistence fails
    pub async fn acknowledge_parent(&self, id: LeaveRequestId) -> Result<LeaveRecord, LeaveError> {
        let record = self
            .store
            .get_leave(id)
            .await?
            .ok_or(LeaveError::RecordNotFound(id))?;

        let action = LeaveService::acknowledge(record.status)?;
        let updated = apply_action(record, &action);
        self.store
            .update_leave(id, update_from_action(&action, &updated))
            .await?;

        debug!(leave_id = %id, "parent company acknowledged leave");
        Ok(updated)
    }

    /// Lists the acting staff member's own requests, newest first.
    pub async fn list_own(&self, actor: &Actor) -> Result<Vec<LeaveRecord>, LeaveError> {
        actor.require(Operation::ViewOwnLeave)?;

        let profile = self
            .store
            .lookup_staff(&actor.email)
            .await?
            .ok_or_else(|| LeaveError::ProfileNotFound(actor.email.clone()))?;

        let mut records = self
            .store
            .list_leaves(&LeaveQuery {
                staff_id: Some(profile.id),
                ..LeaveQuery::default()
            })
            .await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Builds the approval dashboard over the full record set.
    pub async fn dashboard(
        &self,
        actor: &Actor,
        filter: &LeaveFilter,
    ) -> Result<DashboardView, LeaveError> {
        actor.require(Operation::ViewAllLeave)?;

        let records = self.store.list_leaves(&LeaveQuery::default()).await?;
        Ok(build_dashboard(&records, filter))
    }
}

/// Applies a validated action to an in-memory copy of the record.
fn apply_action(mut record: LeaveRecord, action: &LeaveAction) -> LeaveRecord {
    record.status = action.new_status();
    match action {
        LeaveAction::Approve {
            decided_by,
            decided_at,
            ..
        } => {
            record.manager_email = Some(decided_by.clone());
            record.manager_decided_at = Some(*decided_at);
            record.updated_at = *decided_at;
        }
        LeaveAction::Reject {
            decided_by,
            decided_at,
            rejection_reason,
            ..
        } => {
            record.manager_email = Some(decided_by.clone());
            record.manager_decided_at = Some(*decided_at);
            record.rejection_reason = Some(rejection_reason.clone());
            record.updated_at = *decided_at;
        }
        LeaveAction::Acknowledge {
            acknowledged_at, ..
        } => {
            record.updated_at = *acknowledged_at;
        }
    }
    record
}

/// Derives the store update for a validated action.
fn update_from_action(action: &LeaveAction, updated: &LeaveRecord) -> LeaveUpdate {
    LeaveUpdate {
        status: action.new_status(),
        rejection_reason: updated.rejection_reason.clone(),
        manager_email: updated.manager_email.clone(),
        manager_decided_at: updated.manager_decided_at,
        updated_at: updated.updated_at,
    }
}
