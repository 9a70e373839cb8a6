//! Monthly billing reconciliation.
//!
//! Queries approved chargeable leave for one billing month and parent
//! company, pairs each record's billed cost with the company-reported
//! actual amount, and persists a report header plus per-record line items
//! with variance figures.
//!
//! # Modules
//!
//! - `types` - Report and line-item data types
//! - `error` - Reconciliation-specific errors
//! - `actuals` - Sources of company-reported actual amounts
//! - `service` - Pure report construction
//! - `engine` - Store-backed query/build/persist flow

pub mod actuals;
pub mod engine;
pub mod error;
pub mod service;
pub mod types;

pub use actuals::{ActualAmountSource, FixedActuals, SeededActuals};
pub use engine::ReconciliationEngine;
pub use error::ReconciliationError;
pub use service::ReconciliationService;
pub use types::{GeneratedReport, ReconciliationReport, ReportLineItem};
