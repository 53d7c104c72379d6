// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mines Outcome Analyzer - Orchestration

//! Runs the three calculation steps in order over a validated scenario:
//! success rates, multiplier prediction, expected value.

use log::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::expected_value::expected_value;
use crate::interpolate::{predict, ExtrapolationPolicy, QueryRange};
use crate::probability::{success_rates, validate_scenario};
use crate::table::PayoutTable;
use crate::types::{OutcomeResult, Scenario};

/// Analyse one scenario against a loaded table with reference (linear) extrapolation.
pub fn analyze(scenario: &Scenario, table: &PayoutTable) -> Result<OutcomeResult, AnalysisError> {
    analyze_with_policy(scenario, table, ExtrapolationPolicy::Linear)
}

/// Analyse one scenario with an explicit extrapolation policy.
pub fn analyze_with_policy(
    scenario: &Scenario,
    table: &PayoutTable,
    policy: ExtrapolationPolicy,
) -> Result<OutcomeResult, AnalysisError> {
    validate_scenario(scenario)?;

    let rates = success_rates(scenario)?;

    let samples = table.samples_for(scenario.hazard_count)?;
    debug!("sample packet for {} hazards: {:?}", scenario.hazard_count, samples);
    if scenario.board_size != table.board_size() {
        warn!(
            "scenario board has {} cells but samples were collected on {}",
            scenario.board_size,
            table.board_size()
        );
    }
    let prediction = predict(samples, f64::from(scenario.revealed_count), policy).ok_or(
        AnalysisError::InsufficientSampleData {
            hazard_count: scenario.hazard_count,
            points: samples.len(),
        },
    )?;
    if prediction.range != QueryRange::Within {
        debug!(
            "{} revealed cells is {:?} the sampled range for {} hazards; multiplier {}",
            scenario.revealed_count, prediction.range, scenario.hazard_count, prediction.multiplier
        );
    }

    let ev = expected_value(&rates, prediction.multiplier, scenario.bet_amount)?;

    Ok(OutcomeResult {
        success_rate: rates.success_rate,
        failure_rate: rates.failure_rate,
        multiplier: prediction.multiplier,
        expected_value: ev,
    })
}

// ---------------------------------------------------------------------------
// OutcomeAnalyzer
// ---------------------------------------------------------------------------

/// Configured analyzer bound to a loaded table.
///
/// Cheap to clone around behind an `Arc`; holds no per-request state.
#[derive(Debug, Clone)]
pub struct OutcomeAnalyzer {
    table: std::sync::Arc<PayoutTable>,
    policy: ExtrapolationPolicy,
    board_size: u32,
    bet_amount: f64,
}

impl OutcomeAnalyzer {
    pub fn new(table: std::sync::Arc<PayoutTable>, config: &AnalyzerConfig) -> Self {
        Self {
            table,
            policy: config.extrapolation,
            board_size: config.board_size,
            bet_amount: config.bet_amount,
        }
    }

    pub fn analyze(&self, scenario: &Scenario) -> Result<OutcomeResult, AnalysisError> {
        analyze_with_policy(scenario, &self.table, self.policy)
    }

    /// Analyse with the configured board size and stake.
    pub fn analyze_default(&self, hazard_count: u32, revealed_count: u32) -> Result<OutcomeResult, AnalysisError> {
        self.analyze(&Scenario::new(self.board_size, hazard_count, revealed_count, self.bet_amount))
    }

    /// Every revealed count from zero to the last safe cell for one hazard count.
    pub fn sweep(&self, hazard_count: u32) -> Result<Vec<(u32, OutcomeResult)>, AnalysisError> {
        let safe = self.board_size.saturating_sub(hazard_count);
        (0..=safe)
            .map(|revealed| Ok((revealed, self.analyze_default(hazard_count, revealed)?)))
            .collect()
    }

    /// Same table and defaults, different extrapolation policy.
    pub fn with_policy(&self, policy: ExtrapolationPolicy) -> Self {
        Self {
            table: std::sync::Arc::clone(&self.table),
            policy,
            board_size: self.board_size,
            bet_amount: self.bet_amount,
        }
    }

    pub fn table(&self) -> &PayoutTable {
        &self.table
    }

    pub fn policy(&self) -> ExtrapolationPolicy {
        self.policy
    }
}
