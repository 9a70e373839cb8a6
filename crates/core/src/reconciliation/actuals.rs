//! Sources of company-reported actual billed amounts.
//!
//! Production reconciliation reads actuals from the parent company's
//! billing feed. That feed is an external collaborator, so it sits behind
//! a trait; the bundled implementation synthesizes deterministic actuals
//! within five percent of the calculated cost for demos and tests.

use rust_decimal::Decimal;

use crate::leave::types::LeaveRecord;

/// Provides the company-reported actual amount for a leave record.
pub trait ActualAmountSource: Send + Sync {
    /// Returns the actual billed amount for the record.
    fn actual_for(&self, record: &LeaveRecord) -> Decimal;
}

/// Deterministic synthetic actuals, within ±5% of the calculated cost.
///
/// The offset is derived from the record id, so regenerating a report
/// over the same records reproduces the same actuals.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeededActuals;

impl SeededActuals {
    /// Basis-point offset in `-500..=500` derived from the record id.
    fn offset_bp(record: &LeaveRecord) -> i64 {
        let raw = record.id.into_inner().as_u128();
        // Fold the 128-bit id down and map into the ±500bp band.
        let folded = (raw ^ (raw >> 64)) as u64;
        (folded % 1001) as i64 - 500
    }
}

impl ActualAmountSource for SeededActuals {
    fn actual_for(&self, record: &LeaveRecord) -> Decimal {
        let bp = Decimal::from(10_000 + Self::offset_bp(record));
        (record.calculated_cost * bp / Decimal::from(10_000)).round_dp(2)
    }
}

/// Fixed actuals keyed by leave record id, for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct FixedActuals {
    amounts: std::collections::HashMap<leaveledger_shared::types::LeaveRequestId, Decimal>,
}

impl FixedActuals {
    /// Creates an empty source. Records without an entry fall back to
    /// their calculated cost (zero variance).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the actual amount for a record.
    pub fn set(&mut self, id: leaveledger_shared::types::LeaveRequestId, amount: Decimal) {
        self.amounts.insert(id, amount);
    }
}

impl ActualAmountSource for FixedActuals {
    fn actual_for(&self, record: &LeaveRecord) -> Decimal {
        self.amounts
            .get(&record.id)
            .copied()
            .unwrap_or(record.calculated_cost)
    }
}
