// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mines Outcome Analyzer - Error Types

//! Error kinds surfaced by the analyzer and its data collaborators.

use std::path::PathBuf;

use crate::sealed::SealError;

// ---------------------------------------------------------------------------
// Scenario validation
// ---------------------------------------------------------------------------

/// The specific constraint a [`crate::Scenario`] broke.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScenarioViolation {
    #[error("board size must be positive")]
    BoardSizeNotPositive,
    #[error("{field} must not be negative (got {value})")]
    NegativeCount { field: &'static str, value: i64 },
    #[error("hazard count {hazard_count} must be below board size {board_size}")]
    HazardsFillBoard { hazard_count: u32, board_size: u32 },
    #[error("cannot reveal {revealed_count} cells, only {safe_cells} are safe")]
    TooManyReveals { revealed_count: u32, safe_cells: u32 },
    #[error("bet amount must be a positive finite number (got {bet_amount})")]
    BetNotPositive { bet_amount: f64 },
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Errors from a single analysis or from validating the sample table.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid scenario: {0}")]
    InvalidScenario(#[from] ScenarioViolation),
    #[error("no sample data for {hazard_count} hazards")]
    MissingSampleData { hazard_count: u32 },
    #[error("sample data for {hazard_count} hazards has {points} point(s), need at least 2")]
    InsufficientSampleData { hazard_count: u32, points: usize },
    #[error("sample data for {hazard_count} hazards is malformed: {reason}")]
    MalformedSampleData { hazard_count: u32, reason: String },
    #[error("payout data source unavailable: {0}")]
    DataSourceUnavailable(SourceError),
}

impl From<SourceError> for AnalysisError {
    /// Table validation failures keep their own kind when they arrive through a loader.
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Table(inner) => *inner,
            other => Self::DataSourceUnavailable(other),
        }
    }
}

impl AnalysisError {
    /// True for table or source problems; false for errors the caller caused.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InsufficientSampleData { .. }
                | Self::MalformedSampleData { .. }
                | Self::DataSourceUnavailable(_)
        )
    }
}

// ---------------------------------------------------------------------------
// Data sources
// ---------------------------------------------------------------------------

/// Failures while loading a payout table from its provider.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse sample data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sealed sample data rejected: {0}")]
    Sealed(#[from] SealError),
    #[error("passphrase variable {0} is not set")]
    MissingPassphrase(String),
    #[error("sample data failed validation: {0}")]
    Table(#[source] Box<AnalysisError>),
    #[error("payout table lock poisoned")]
    Poisoned,
}

impl From<AnalysisError> for SourceError {
    fn from(err: AnalysisError) -> Self {
        Self::Table(Box::new(err))
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
