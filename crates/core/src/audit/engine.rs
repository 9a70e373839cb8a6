//! Audit engine: store-backed timeline compilation and export.

use chrono::Utc;
use leaveledger_shared::types::ExportId;
use tracing::info;

use crate::access::{Actor, Operation};
use crate::audit::compiler::compile_filtered;
use crate::audit::error::AuditError;
use crate::audit::export::audit_csv;
use crate::audit::types::{AuditEvent, AuditExportRecord, AuditFilter};
use crate::store::{AuditExportStore, LeaveQuery, LeaveStore, ReportStore};

/// A rendered export: the CSV payload and its recorded metadata.
#[derive(Debug, Clone)]
pub struct AuditExport {
    /// The CSV payload.
    pub csv: String,
    /// The persisted export record.
    pub record: AuditExportRecord,
}

/// Timeline engine over the leave, report, and export collections.
pub struct AuditEngine<S> {
    store: S,
}

impl<S> AuditEngine<S>
where
    S: LeaveStore + ReportStore + AuditExportStore,
{
    /// Creates a new engine over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Compiles the audit timeline, newest first, honoring the filter.
    ///
    /// # Errors
    ///
    /// * `AuditError::Forbidden` if the role may not view the trail
    /// * `AuditError::Store` if any collection read fails
    pub async fn compile(
        &self,
        actor: &Actor,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditEvent>, AuditError> {
        actor.require(Operation::CompileAudit)?;

        let leaves = self.store.list_leaves(&LeaveQuery::default()).await?;
        let reports = self.store.list_reports().await?;
        let exports = self.store.list_exports().await?;

        Ok(compile_filtered(&leaves, &reports, &exports, filter))
    }

    /// Compiles the filtered timeline, renders it as CSV, and records the
    /// export so it appears as an event on subsequent compilations.
    ///
    /// # Errors
    ///
    /// * `AuditError::Forbidden` if the role may not export the trail
    /// * `AuditError::Store` if reading or recording fails
    pub async fn export_csv(
        &self,
        actor: &Actor,
        filter: &AuditFilter,
    ) -> Result<AuditExport, AuditError> {
        actor.require(Operation::ExportAudit)?;

        let events = self.compile(actor, filter).await?;
        let csv = audit_csv(&events);
        let record = self.record_export(actor, filter, events.len()).await?;
        Ok(AuditExport { csv, record })
    }

    /// Persists the record of an export so it appears on the timeline.
    ///
    /// # Errors
    ///
    /// * `AuditError::Forbidden` if the role may not export the trail
    /// * `AuditError::Store` if the write fails
    pub async fn record_export(
        &self,
        actor: &Actor,
        filter: &AuditFilter,
        record_count: usize,
    ) -> Result<AuditExportRecord, AuditError> {
        actor.require(Operation::ExportAudit)?;

        let exported_at = Utc::now();
        let record = AuditExportRecord {
            id: ExportId::new(),
            exported_at,
            exported_by: actor.email.clone(),
            exported_by_role: actor.role.as_str().to_string(),
            record_count,
            filename: format!("audit-trail-{}.csv", exported_at.format("%Y-%m-%d")),
            filters: filter.summary(),
        };
        self.store.insert_export(record.clone()).await?;

        info!(
            export_id = %record.id,
            exported_by = %record.exported_by,
            records = record.record_count,
            filters = %record.filters,
            "audit trail exported"
        );
        Ok(record)
    }
}
