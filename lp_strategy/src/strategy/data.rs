//! Mutable strategy data

use alloy_primitives::U256;

/// Struct containing the bookkeeping a strategy keeps between operations
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyData {
    /// `false` once the strategy is wound down. Harvests stop reinvesting and tend stops deploying.
    pub is_active: bool,
    /// Timestamp of the last successful harvest report.
    /// Denominated in seconds.
    pub last_report: u64,
    /// Total assets committed by the last successful harvest report
    pub last_reported_assets: U256,
}

impl Default for StrategyData {
    fn default() -> Self {
        Self {
            is_active: true,
            last_report: 0,
            last_reported_assets: U256::ZERO,
        }
    }
}

impl StrategyData {
    /// Sets the active flag for the strategy.
    pub fn is_active(&mut self, is_active: bool) -> &mut Self {
        self.is_active = is_active;
        self
    }

    /// Sets the last report timestamp for the strategy.
    pub fn last_report(&mut self, last_report: u64) -> &mut Self {
        self.last_report = last_report;
        self
    }

    /// Sets the total assets of the last report.
    pub fn last_reported_assets(&mut self, last_reported_assets: U256) -> &mut Self {
        self.last_reported_assets = last_reported_assets;
        self
    }
}
