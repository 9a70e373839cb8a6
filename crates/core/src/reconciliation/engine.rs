//! Reconciliation engine: query, build, and persist monthly reports.

use chrono::Utc;
use leaveledger_shared::types::{BillingMonth, ReportId};
use tracing::{info, warn};

use crate::access::{Actor, Operation};
use crate::leave::types::LeaveStatus;
use crate::reconciliation::actuals::ActualAmountSource;
use crate::reconciliation::error::ReconciliationError;
use crate::reconciliation::service::ReconciliationService;
use crate::reconciliation::types::{GeneratedReport, ReconciliationReport, ReportLineItem};
use crate::store::{LeaveQuery, LeaveStore, ReportStore};
use crate::variance::service::ReviewThresholds;

/// Report generation engine over a leave store and report store.
pub struct ReconciliationEngine<S, A> {
    store: S,
    actuals: A,
    thresholds: ReviewThresholds,
}

impl<S, A> ReconciliationEngine<S, A>
where
    S: LeaveStore + ReportStore,
    A: ActualAmountSource,
{
    /// Creates a new engine with the default review thresholds.
    pub fn new(store: S, actuals: A) -> Self {
        Self {
            store,
            actuals,
            thresholds: ReviewThresholds::default(),
        }
    }

    /// Creates a new engine with explicit review thresholds.
    pub const fn with_thresholds(store: S, actuals: A, thresholds: ReviewThresholds) -> Self {
        Self {
            store,
            actuals,
            thresholds,
        }
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Generates and persists a reconciliation report for one month and
    /// parent company.
    ///
    /// Queries approved chargeable leave starting within the month,
    /// builds the report, then persists the header followed by each line
    /// item. A line-item write failure after the header surfaces as
    /// `PartialWrite` naming how far the sequence got.
    ///
    /// # Errors
    ///
    /// * `ReconciliationError::Forbidden` if the role may not generate reports
    /// * `ReconciliationError::NoQualifyingRecords` if nothing matched
    /// * `ReconciliationError::PartialWrite` if line-item persistence failed
    /// * `ReconciliationError::Store` for other backend failures
    pub async fn generate_report(
        &self,
        actor: &Actor,
        month: BillingMonth,
        parent_company: &str,
    ) -> Result<GeneratedReport, ReconciliationError> {
        actor.require(Operation::GenerateReport)?;

        let records = self
            .store
            .list_leaves(&LeaveQuery {
                parent_company: Some(parent_company.to_string()),
                statuses: vec![LeaveStatus::ApprovedManager, LeaveStatus::ApprovedParent],
                is_chargeable: Some(true),
                start_within: Some(month),
                ..LeaveQuery::default()
            })
            .await?;

        let generated = ReconciliationService::build_report(
            &records,
            month,
            parent_company,
            actor.id,
            &actor.email,
            Utc::now(),
            &self.actuals,
            &self.thresholds,
        )?;

        self.persist(&generated).await?;

        info!(
            report_id = %generated.report.id,
            month = %month,
            company = parent_company,
            leaves = generated.report.total_leaves,
            billed = %generated.report.total_billed_amount,
            variance = %generated.report.total_variance,
            needs_review = generated.report.needs_review,
            "reconciliation report generated"
        );
        Ok(generated)
    }

    /// Lists every persisted report header, newest first.
    ///
    /// # Errors
    ///
    /// * `ReconciliationError::Forbidden` if the role may not view variance
    /// * `ReconciliationError::Store` if the backend fails
    pub async fn list_reports(
        &self,
        actor: &Actor,
    ) -> Result<Vec<ReconciliationReport>, ReconciliationError> {
        actor.require(Operation::ViewVariance)?;

        let mut reports = self.store.list_reports().await?;
        reports.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(reports)
    }

    /// Reads a report's line items, ordered by leave start date.
    ///
    /// # Errors
    ///
    /// * `ReconciliationError::Forbidden` if the role may not view variance
    /// * `ReconciliationError::Store` if the backend fails
    pub async fn line_items(
        &self,
        actor: &Actor,
        report_id: ReportId,
    ) -> Result<Vec<ReportLineItem>, ReconciliationError> {
        actor.require(Operation::ViewVariance)?;

        let mut items = self.store.list_line_items(report_id).await?;
        items.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        Ok(items)
    }

    /// Writes the header, then each line item in order.
    async fn persist(&self, generated: &GeneratedReport) -> Result<(), ReconciliationError> {
        let report_id = self.store.insert_report(generated.report.clone()).await?;

        let total = generated.line_items.len();
        for (written, item) in generated.line_items.iter().enumerate() {
            if let Err(source) = self.store.insert_line_item(item.clone()).await {
                warn!(
                    report_id = %report_id,
                    written,
                    total,
                    "report line items partially written"
                );
                return Err(ReconciliationError::PartialWrite {
                    report_id,
                    written,
                    total,
                    source,
                });
            }
        }
        Ok(())
    }
}
