// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mines Outcome Analyzer - Type Definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cells on the standard 5x5 board the bundled samples were collected on.
pub const DEFAULT_BOARD_SIZE: u32 = 25;

/// Unit stake used when the caller does not name one.
pub const DEFAULT_BET_AMOUNT: f64 = 1.0;

// ─── Scenario ───────────────────────────────────────────────────────────────

/// Input to one analysis.
///
/// Built fresh per request and never mutated. Construction does not validate;
/// [`crate::probability::validate_scenario`] does, before any arithmetic runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Total cells on the board.
    pub board_size: u32,
    /// Hidden hazards ("mines") placed on the board.
    pub hazard_count: u32,
    /// Safe cells the player intends to clear before cashing out.
    pub revealed_count: u32,
    /// Stake in the caller's unit currency.
    pub bet_amount: f64,
}

impl Scenario {
    pub fn new(board_size: u32, hazard_count: u32, revealed_count: u32, bet_amount: f64) -> Self {
        Self { board_size, hazard_count, revealed_count, bet_amount }
    }

    /// Scenario on the default 25-cell board with a unit stake.
    pub fn standard(hazard_count: u32, revealed_count: u32) -> Self {
        Self::new(DEFAULT_BOARD_SIZE, hazard_count, revealed_count, DEFAULT_BET_AMOUNT)
    }

    /// Cells that hold no hazard.
    pub fn safe_cells(&self) -> u32 {
        self.board_size.saturating_sub(self.hazard_count)
    }

    /// Cells still covered after the reveals.
    pub fn covered_count(&self) -> u32 {
        self.board_size.saturating_sub(self.revealed_count)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cells / {} hazards / {} revealed / bet {}",
            self.board_size, self.hazard_count, self.revealed_count, self.bet_amount
        )
    }
}

// ─── Sample Data ────────────────────────────────────────────────────────────

/// One offline observation: the multiplier offered after `revealed_cells` safe picks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub revealed_cells: u32,
    pub multiplier: f64,
}

impl SamplePoint {
    pub fn new(revealed_cells: u32, multiplier: f64) -> Self {
        Self { revealed_cells, multiplier }
    }
}

// ─── Results ────────────────────────────────────────────────────────────────

/// Success and failure rates as percentages; they always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuccessRates {
    pub success_rate: f64,
    pub failure_rate: f64,
}

impl SuccessRates {
    pub fn from_probability(p: f64) -> Self {
        let success_rate = p * 100.0;
        Self { success_rate, failure_rate: 100.0 - success_rate }
    }

    pub fn win_probability(&self) -> f64 {
        self.success_rate / 100.0
    }

    pub fn loss_probability(&self) -> f64 {
        self.failure_rate / 100.0
    }
}

/// Output of one analysis. `expected_value` is a return rate relative to the stake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeResult {
    pub success_rate: f64,
    pub failure_rate: f64,
    /// May lie outside the sampled range when the query was extrapolated.
    pub multiplier: f64,
    pub expected_value: f64,
}

impl OutcomeResult {
    /// Whether the bet returns more than it costs on average.
    pub fn is_favorable(&self) -> bool {
        self.expected_value > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_scenario_uses_defaults() {
        let s = Scenario::standard(3, 5);
        assert_eq!(s.board_size, 25);
        assert_eq!(s.bet_amount, 1.0);
        assert_eq!(s.safe_cells(), 22);
        assert_eq!(s.covered_count(), 20);
    }

    #[test]
    fn rates_are_complementary() {
        let rates = SuccessRates::from_probability(0.375);
        assert_eq!(rates.success_rate, 37.5);
        assert_eq!(rates.failure_rate, 62.5);
        assert!((rates.win_probability() + rates.loss_probability() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn only_positive_expectation_is_favorable() {
        let mut r = OutcomeResult { success_rate: 50.0, failure_rate: 50.0, multiplier: 1.98, expected_value: -0.01 };
        assert!(!r.is_favorable());
        r.expected_value = 0.0;
        assert!(!r.is_favorable());
        r.expected_value = 0.2;
        assert!(r.is_favorable());
    }
}
