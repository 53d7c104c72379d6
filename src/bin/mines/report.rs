// Sweep Report Types and Text Presentation
// Structured output for the sweep command plus the human-readable analysis view

use mines_engine::adapter::StakeProjection;
use mines_engine::{OutcomeResult, Scenario};
use serde::Serialize;

pub const DISCLAIMER: &str = "This tool is intended for recreational and educational purposes only. \
The calculations and predictions are based on sampled scenarios and should not be considered \
financial or gaming advice.";

// ─── Statistics (per-hazard aggregation) ────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        Self {
            mean,
            std_dev: variance.sqrt(),
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Sweep Rows ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    pub revealed_count: u32,
    pub success_rate: f64,
    pub failure_rate: f64,
    pub multiplier: f64,
    pub expected_value: f64,
    pub break_even_multiplier: Option<f64>,
}

/// All reveal depths for one hazard count.
#[derive(Debug, Clone, Serialize)]
pub struct HazardReport {
    pub hazard_count: u32,
    pub expected_value: Stats,
    /// Reveal depth with the highest expected value.
    pub best_revealed_count: Option<u32>,
    /// Reveal depths where the bet does not lose on average.
    pub break_even_reveals: Vec<u32>,
    pub rows: Vec<SweepRow>,
}

#[derive(Debug, Serialize)]
pub struct SweepReport {
    pub timestamp: String,
    pub version: &'static str,
    pub board_size: u32,
    pub bet_amount: f64,
    pub extrapolation: String,
    pub source: String,
    pub hazards: Vec<HazardReport>,
}

// ─── Text View ──────────────────────────────────────────────────────────────

/// Render one analysis the way the interactive form shows it.
pub fn render_analysis(scenario: &Scenario, result: &OutcomeResult, projection: &StakeProjection) -> String {
    let mut out = String::new();
    out.push_str("\n  Success and Failure Rates\n");
    out.push_str(&format!(
        "    Clearing {} cells with {} hazards succeeds {:.3}% of the time; fails {:.3}%.\n",
        scenario.revealed_count, scenario.hazard_count, result.success_rate, result.failure_rate
    ));
    out.push_str("\n  Expected Payout\n");
    out.push_str(&format!("    Multiplier: {}x\n", result.multiplier));
    out.push_str("\n  Expected Value\n");
    out.push_str(&format!("    {:.4}% of stake per round\n", result.expected_value * 100.0));
    if result.is_favorable() {
        out.push_str("    Positive expectation at this depth (check whether the multiplier was extrapolated)\n");
    }
    out.push_str("\n  Stake Projection\n");
    out.push_str(&format!("    Stake:           {}\n", projection.stake));
    out.push_str(&format!("    Payout on win:   {}\n", fmt_amount(projection.payout_on_win)));
    out.push_str(&format!("    Profit on win:   {}\n", fmt_amount(projection.profit_on_win)));
    out.push_str(&format!("    Expected return: {}\n", fmt_amount(projection.expected_return)));
    out.push_str("\n  Disclaimer\n");
    out.push_str(&format!("    {DISCLAIMER}\n"));
    out
}

fn fmt_amount(amount: Option<rust_decimal::Decimal>) -> String {
    amount.map_or_else(|| "n/a (extrapolated out of range)".to_string(), |d| d.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_known_samples() {
        let s = Stats::from_samples(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.mean, 2.5);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert_eq!(s.n, 4);
        assert!((s.std_dev - (5.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn stats_of_nothing_is_zeroed() {
        let s = Stats::from_samples(&[]);
        assert_eq!(s.n, 0);
        assert_eq!(s.mean, 0.0);
    }
}
