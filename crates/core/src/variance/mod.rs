//! Billing variance analysis.
//!
//! Pure analysis over persisted reconciliation report headers: per-row
//! classification, (month, company) grouping for the dashboard, headline
//! summaries, CSV export, and alert content for rows needing review.
//!
//! # Modules
//!
//! - `types` - Classification and dashboard row types
//! - `service` - Thresholds, classification, grouping, summaries
//! - `export` - CSV rendering of the dashboard
//! - `notify` - Alert content for rows needing review

pub mod export;
pub mod notify;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use export::variance_csv;
pub use notify::{CompanyContact, VarianceAlert, build_variance_alert, build_variance_alerts};
pub use service::{
    ReviewThresholds, classify, classify_with, group_by_period_and_company, summarize,
    variance_percentage,
};
pub use types::{GroupedVarianceRow, VarianceClass, VarianceSummary};
