// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mines Outcome Analyzer - Success/Failure Probability

//! Closed-form hypergeometric survival probability.
//!
//! Drawing `K` cells without replacement from `N`, of which `M` are hazards,
//! clears the board segment with probability
//!
//! ```text
//! P = Π_{i=0}^{K-1} (N - M - i) / (N - i)
//! ```
//!
//! Inputs are validated first so every factor lies in `(0, 1]`.

use crate::error::ScenarioViolation;
use crate::types::{Scenario, SuccessRates};

/// Check every constraint a scenario must satisfy before any arithmetic.
pub fn validate_scenario(scenario: &Scenario) -> Result<(), ScenarioViolation> {
    validate_counts(scenario.board_size, scenario.hazard_count, scenario.revealed_count)?;
    if !(scenario.bet_amount.is_finite() && scenario.bet_amount > 0.0) {
        return Err(ScenarioViolation::BetNotPositive { bet_amount: scenario.bet_amount });
    }
    Ok(())
}

fn validate_counts(board_size: u32, hazard_count: u32, revealed_count: u32) -> Result<(), ScenarioViolation> {
    if board_size == 0 {
        return Err(ScenarioViolation::BoardSizeNotPositive);
    }
    if hazard_count >= board_size {
        return Err(ScenarioViolation::HazardsFillBoard { hazard_count, board_size });
    }
    let safe_cells = board_size - hazard_count;
    if revealed_count > safe_cells {
        return Err(ScenarioViolation::TooManyReveals { revealed_count, safe_cells });
    }
    Ok(())
}

/// Build a scenario from signed inputs (form fields, JS numbers) and validate it.
pub fn scenario_from_signed(
    board_size: i64,
    hazard_count: i64,
    revealed_count: i64,
    bet_amount: f64,
) -> Result<Scenario, ScenarioViolation> {
    if board_size <= 0 {
        return Err(ScenarioViolation::BoardSizeNotPositive);
    }
    let board_size = to_count("board_size", board_size)?;
    let hazard_count = to_count("hazard_count", hazard_count)?;
    let revealed_count = to_count("revealed_count", revealed_count)?;
    let scenario = Scenario::new(board_size, hazard_count, revealed_count, bet_amount);
    validate_scenario(&scenario)?;
    Ok(scenario)
}

fn to_count(field: &'static str, value: i64) -> Result<u32, ScenarioViolation> {
    if value < 0 {
        return Err(ScenarioViolation::NegativeCount { field, value });
    }
    // Anything past u32 cannot satisfy hazard < board anyway; saturate and let
    // the range checks name the real violation.
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}

/// Probability (0..=1) of revealing `revealed_count` cells without touching a hazard.
pub fn survival_probability(
    board_size: u32,
    hazard_count: u32,
    revealed_count: u32,
) -> Result<f64, ScenarioViolation> {
    validate_counts(board_size, hazard_count, revealed_count)?;
    let n = f64::from(board_size);
    let safe = f64::from(board_size - hazard_count);
    Ok((0..revealed_count).fold(1.0_f64, |acc, i| {
        let i = f64::from(i);
        acc * ((safe - i) / (n - i))
    }))
}

/// Success and failure rates (percentages) for a scenario.
pub fn success_rates(scenario: &Scenario) -> Result<SuccessRates, ScenarioViolation> {
    let p = survival_probability(
        scenario.board_size,
        scenario.hazard_count,
        scenario.revealed_count,
    )?;
    Ok(SuccessRates::from_probability(p))
}
