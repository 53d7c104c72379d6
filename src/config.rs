// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mines Outcome Analyzer - Configuration

//! Analyzer configuration, read from JSON with every field defaulted.
//!
//! `MINES_CONFIG` names a config file; without it the defaults apply.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::interpolate::ExtrapolationPolicy;
use crate::types::{DEFAULT_BET_AMOUNT, DEFAULT_BOARD_SIZE};

pub const CONFIG_ENV: &str = "MINES_CONFIG";
pub const DEFAULT_PASSPHRASE_ENV: &str = "MINES_TABLE_PASSPHRASE";

/// Where the payout samples come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Dataset compiled into the crate.
    #[default]
    Embedded,
    JsonFile { path: PathBuf },
    /// Sealed container; the passphrase is read from `passphrase_env`.
    SealedFile {
        path: PathBuf,
        #[serde(default = "default_passphrase_env")]
        passphrase_env: String,
    },
}

fn default_passphrase_env() -> String {
    DEFAULT_PASSPHRASE_ENV.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub board_size: u32,
    pub bet_amount: f64,
    pub extrapolation: ExtrapolationPolicy,
    pub source: SourceConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            bet_amount: DEFAULT_BET_AMOUNT,
            extrapolation: ExtrapolationPolicy::Linear,
            source: SourceConfig::Embedded,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Load from `MINES_CONFIG` when set, defaults otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::Invalid("board_size must be positive".into()));
        }
        if !(self.bet_amount.is_finite() && self.bet_amount > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "bet_amount must be positive, got {}",
                self.bet_amount
            )));
        }
        if let ExtrapolationPolicy::Bounded { min, max } = self.extrapolation {
            if !(min.is_finite() && max.is_finite() && min <= max) {
                return Err(ConfigError::Invalid(format!(
                    "extrapolation bounds [{min}, {max}] are not an ordered finite range"
                )));
            }
        }
        Ok(())
    }
}
