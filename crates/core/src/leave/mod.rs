//! Leave request lifecycle for LeaveLedger.
//!
//! This module implements the leave request state machine, submission
//! validation and derivation, and the approval dashboard read surfaces.
//!
//! # Modules
//!
//! - `types` - Leave domain types (LeaveStatus, LeaveType, LeaveRecord)
//! - `error` - Lifecycle-specific error types
//! - `service` - Validation, derivation, and state transition logic
//! - `engine` - Store-backed lifecycle operations
//! - `dashboard` - Pure approval-dashboard views

pub mod dashboard;
pub mod engine;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use dashboard::{DashboardView, LeaveFilter, LeaveStats, build_dashboard};
pub use engine::LeaveEngine;
pub use error::LeaveError;
pub use service::LeaveService;
pub use types::{
    Decision, LeaveAction, LeaveRecord, LeaveStatus, LeaveSubmission, LeaveType, StaffProfile,
};
