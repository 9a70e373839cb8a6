//! Shared types, errors, and configuration for LeaveLedger.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - The canonical billing-month key (`YYYY-MM`)
//! - Timestamp normalization at the store boundary
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
