// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mines Outcome Analyzer

pub mod types;
pub mod error;
pub mod probability;
pub mod table;
pub mod interpolate;
pub mod expected_value;
pub mod analyzer;
pub mod config;
pub mod source;
pub mod sealed;
pub mod registry;
pub mod adapter;

pub use types::*;
pub use error::{AnalysisError, ConfigError, ScenarioViolation, SourceError};
pub use analyzer::{analyze, analyze_with_policy, OutcomeAnalyzer};
pub use config::{AnalyzerConfig, SourceConfig};
pub use interpolate::ExtrapolationPolicy;
pub use source::{EmbeddedSource, JsonFileSource, PayoutSource, SealedFileSource};
pub use table::PayoutTable;

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// Browser-facing handle over the embedded sample table.
#[wasm_bindgen]
pub struct MinesAnalyzer {
    inner: OutcomeAnalyzer,
}

#[wasm_bindgen]
impl MinesAnalyzer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<MinesAnalyzer, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let table = registry::registry()
            .get_or_load(&EmbeddedSource)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner: OutcomeAnalyzer::new(table, &AnalyzerConfig::default()) })
    }

    /// Analyse form inputs. Numbers arrive signed from JS and are validated here.
    pub fn analyze(
        &self,
        board_size: i32,
        hazard_count: i32,
        revealed_count: i32,
        bet_amount: f64,
    ) -> Result<JsValue, JsValue> {
        let result = self
            .evaluate(board_size, hazard_count, revealed_count, bet_amount)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&result).map_err(JsValue::from)
    }

    /// Hazard counts the embedded table can answer for.
    pub fn hazard_counts(&self) -> Vec<u32> {
        self.inner.table().hazard_counts().collect()
    }

    /// Switch between `linear`, `clamp` and `bounded` extrapolation.
    pub fn set_extrapolation(&mut self, mode: &str, min: f64, max: f64) -> Result<(), JsValue> {
        let policy = ExtrapolationPolicy::from_mode(mode, min, max).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner = self.inner.with_policy(policy);
        Ok(())
    }
}

impl MinesAnalyzer {
    fn evaluate(
        &self,
        board_size: i32,
        hazard_count: i32,
        revealed_count: i32,
        bet_amount: f64,
    ) -> Result<OutcomeResult, AnalysisError> {
        let scenario = probability::scenario_from_signed(
            i64::from(board_size),
            i64::from(hazard_count),
            i64::from(revealed_count),
            bet_amount,
        )?;
        self.inner.analyze(&scenario)
    }
}
