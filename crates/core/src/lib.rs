//! Core business logic for LeaveLedger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `access` - Role capabilities and operation permissions
//! - `leave` - Leave request lifecycle state machine
//! - `reconciliation` - Monthly billed-vs-actual aggregation
//! - `variance` - Variance classification, grouping, and alert content
//! - `audit` - Activity log compilation and export
//! - `store` - Persistence contract consumed by the engines

pub mod access;
pub mod audit;
pub mod leave;
pub mod reconciliation;
pub mod store;
pub mod variance;
