// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mines Outcome Analyzer - Expected Value

use crate::error::ScenarioViolation;
use crate::types::SuccessRates;

/// Expected return per unit staked.
///
/// ```text
/// EV = (p_win * (multiplier - bet) + p_lose * -bet) / bet
/// ```
///
/// The multiplier is compared against the raw bet amount, so the result is
/// not invariant under rescaling the stake.
pub fn expected_value(rates: &SuccessRates, multiplier: f64, bet_amount: f64) -> Result<f64, ScenarioViolation> {
    if !(bet_amount.is_finite() && bet_amount > 0.0) {
        return Err(ScenarioViolation::BetNotPositive { bet_amount });
    }
    let p_win = rates.win_probability();
    let p_lose = rates.loss_probability();
    Ok((p_win * (multiplier - bet_amount) + p_lose * -bet_amount) / bet_amount)
}

/// Multiplier at which a unit bet breaks even for the given rates.
///
/// `None` when success is impossible.
pub fn break_even_multiplier(rates: &SuccessRates) -> Option<f64> {
    let p_win = rates.win_probability();
    (p_win > 0.0).then(|| 1.0 / p_win)
}
