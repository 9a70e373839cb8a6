//! Historical audit trail.
//!
//! The timeline is compiled on demand from the leave, report, and export
//! collections rather than stored as its own event log. Exports are
//! themselves recorded, so each one shows up as an event on the next
//! compilation.
//!
//! # Modules
//!
//! - `types` - Event, filter, and export-record types
//! - `compiler` - Pure timeline compilation from source records
//! - `export` - CSV rendering
//! - `error` - Audit-specific errors
//! - `engine` - Store-backed compile and export flow

pub mod compiler;
pub mod engine;
pub mod error;
pub mod export;
pub mod types;

pub use compiler::{compile, compile_filtered};
pub use engine::{AuditEngine, AuditExport};
pub use error::AuditError;
pub use export::audit_csv;
pub use types::{AuditAction, AuditEvent, AuditExportRecord, AuditFilter};
