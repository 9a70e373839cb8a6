//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Persistence store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Reconciliation threshold configuration.
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
}

/// Persistence store configuration.
///
/// Collection names mirror the document store consumed in production.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Collection holding leave applications.
    #[serde(default = "default_leave_collection")]
    pub leave_collection: String,
    /// Collection holding reconciliation reports.
    #[serde(default = "default_report_collection")]
    pub report_collection: String,
    /// Collection holding audit export records.
    #[serde(default = "default_export_collection")]
    pub export_collection: String,
}

fn default_leave_collection() -> String {
    "leave_applications".to_string()
}

fn default_report_collection() -> String {
    "reconciliation_reports".to_string()
}

fn default_export_collection() -> String {
    "audit_exports".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            leave_collection: default_leave_collection(),
            report_collection: default_report_collection(),
            export_collection: default_export_collection(),
        }
    }
}

/// Reconciliation threshold configuration.
///
/// Defaults match the review policy: a report has discrepancies above
/// $100 of absolute variance and needs review above $500 or 5 percent.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationConfig {
    /// Absolute variance above which a report has discrepancies.
    #[serde(default = "default_discrepancy_threshold")]
    pub discrepancy_threshold: Decimal,
    /// Absolute variance above which a report needs review.
    #[serde(default = "default_review_threshold")]
    pub review_threshold: Decimal,
    /// Absolute variance percentage above which a report needs review.
    #[serde(default = "default_percent_threshold")]
    pub percent_threshold: Decimal,
}

fn default_discrepancy_threshold() -> Decimal {
    Decimal::ONE_HUNDRED
}

fn default_review_threshold() -> Decimal {
    Decimal::from(500)
}

fn default_percent_threshold() -> Decimal {
    Decimal::from(5)
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            discrepancy_threshold: default_discrepancy_threshold(),
            review_threshold: default_review_threshold(),
            percent_threshold: default_percent_threshold(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        // Best effort; a missing .env file is fine.
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEAVELEDGER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
