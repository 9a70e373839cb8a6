//! In-memory document store.
//!
//! One `RwLock`-guarded map per collection. Reads return documents in no
//! particular order, matching the production store's unordered query
//! results; callers sort. Updates are last-write-wins.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use leaveledger_core::audit::types::AuditExportRecord;
use leaveledger_core::leave::types::{LeaveRecord, StaffProfile};
use leaveledger_core::reconciliation::types::{ReconciliationReport, ReportLineItem};
use leaveledger_core::store::{
    AuditExportStore, LeaveQuery, LeaveStore, LeaveUpdate, PersistenceError, ReportStore,
    StaffDirectory,
};
use leaveledger_shared::types::{ExportId, LeaveRequestId, LineItemId, ReportId};

const LEAVE_COLLECTION: &str = "leave_applications";
const REPORT_COLLECTION: &str = "reconciliation_reports";
const EXPORT_COLLECTION: &str = "audit_exports";

#[derive(Default)]
struct Collections {
    staff: HashMap<String, StaffProfile>,
    leaves: HashMap<LeaveRequestId, LeaveRecord>,
    reports: HashMap<ReportId, ReconciliationReport>,
    line_items: HashMap<LineItemId, ReportLineItem>,
    exports: HashMap<ExportId, AuditExportRecord>,
}

/// In-memory store implementing every persistence trait the core needs.
///
/// Cloning is cheap and clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a staff profile, keyed by email.
    pub async fn add_staff_profile(&self, profile: StaffProfile) {
        let mut inner = self.inner.write().await;
        inner.staff.insert(profile.email.clone(), profile);
    }
}

#[async_trait]
impl LeaveStore for MemoryStore {
    async fn insert_leave(&self, record: LeaveRecord) -> Result<LeaveRequestId, PersistenceError> {
        let id = record.id;
        let mut inner = self.inner.write().await;
        inner.leaves.insert(id, record);
        debug!(collection = LEAVE_COLLECTION, %id, "document inserted");
        Ok(id)
    }

    async fn get_leave(
        &self,
        id: LeaveRequestId,
    ) -> Result<Option<LeaveRecord>, PersistenceError> {
        let inner = self.inner.read().await;
        Ok(inner.leaves.get(&id).cloned())
    }

    async fn list_leaves(&self, query: &LeaveQuery) -> Result<Vec<LeaveRecord>, PersistenceError> {
        let inner = self.inner.read().await;
        Ok(inner
            .leaves
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect())
    }

    async fn update_leave(
        &self,
        id: LeaveRequestId,
        update: LeaveUpdate,
    ) -> Result<(), PersistenceError> {
        let mut inner = self.inner.write().await;
        let record = inner
            .leaves
            .get_mut(&id)
            .ok_or_else(|| PersistenceError::NotFound {
                collection: LEAVE_COLLECTION,
                id: id.to_string(),
            })?;
        record.status = update.status;
        record.rejection_reason = update.rejection_reason;
        record.manager_email = update.manager_email;
        record.manager_decided_at = update.manager_decided_at;
        record.updated_at = update.updated_at;
        debug!(collection = LEAVE_COLLECTION, %id, status = %update.status, "document updated");
        Ok(())
    }
}

#[async_trait]
impl StaffDirectory for MemoryStore {
    async fn lookup_staff(&self, email: &str) -> Result<Option<StaffProfile>, PersistenceError> {
        let inner = self.inner.read().await;
        Ok(inner.staff.get(email).cloned())
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn insert_report(
        &self,
        report: ReconciliationReport,
    ) -> Result<ReportId, PersistenceError> {
        let id = report.id;
        let mut inner = self.inner.write().await;
        inner.reports.insert(id, report);
        debug!(collection = REPORT_COLLECTION, %id, "document inserted");
        Ok(id)
    }

    async fn insert_line_item(&self, item: ReportLineItem) -> Result<LineItemId, PersistenceError> {
        let mut inner = self.inner.write().await;
        if !inner.reports.contains_key(&item.report_id) {
            return Err(PersistenceError::NotFound {
                collection: REPORT_COLLECTION,
                id: item.report_id.to_string(),
            });
        }
        let id = item.id;
        inner.line_items.insert(id, item);
        debug!(collection = REPORT_COLLECTION, %id, "line item inserted");
        Ok(id)
    }

    async fn list_reports(&self) -> Result<Vec<ReconciliationReport>, PersistenceError> {
        let inner = self.inner.read().await;
        Ok(inner.reports.values().cloned().collect())
    }

    async fn list_line_items(
        &self,
        report_id: ReportId,
    ) -> Result<Vec<ReportLineItem>, PersistenceError> {
        let inner = self.inner.read().await;
        Ok(inner
            .line_items
            .values()
            .filter(|item| item.report_id == report_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AuditExportStore for MemoryStore {
    async fn insert_export(
        &self,
        record: AuditExportRecord,
    ) -> Result<ExportId, PersistenceError> {
        let id = record.id;
        let mut inner = self.inner.write().await;
        inner.exports.insert(id, record);
        debug!(collection = EXPORT_COLLECTION, %id, "document inserted");
        Ok(id)
    }

    async fn list_exports(&self) -> Result<Vec<AuditExportRecord>, PersistenceError> {
        let inner = self.inner.read().await;
        Ok(inner.exports.values().cloned().collect())
    }
}
