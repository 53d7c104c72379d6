//! Adapter layer: converts between the analyzer's f64 results and Decimal
//! currency amounts for display and bookkeeping.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::OutcomeResult;

/// Currency amounts are shown to the cent.
const CURRENCY_DP: u32 = 2;

/// Convert f64 to Decimal. `None` for NaN, infinities and out-of-range values.
pub fn to_decimal(v: f64) -> Option<Decimal> {
    Decimal::from_f64(v)
}

/// Convert Decimal to f64. `None` when the value has no f64 representation.
pub fn from_decimal(d: Decimal) -> Option<f64> {
    d.to_f64()
}

fn to_cents(v: f64) -> Option<Decimal> {
    to_decimal(v).map(|d| d.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero))
}

/// What a result means in currency for a concrete stake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeProjection {
    pub stake: Decimal,
    /// `stake * multiplier`; `None` when the multiplier is not representable.
    pub payout_on_win: Option<Decimal>,
    pub profit_on_win: Option<Decimal>,
    /// `expected_value * stake`: average gain (negative = loss) per round.
    pub expected_return: Option<Decimal>,
}

/// Project an analysis result onto a stake.
pub fn project_stake(result: &OutcomeResult, stake: Decimal) -> StakeProjection {
    let stake_f = from_decimal(stake);
    let payout_on_win = stake_f.and_then(|s| to_cents(s * result.multiplier));
    StakeProjection {
        stake,
        payout_on_win,
        profit_on_win: payout_on_win.map(|p| p - stake),
        expected_return: stake_f.and_then(|s| to_cents(result.expected_value * s)),
    }
}
