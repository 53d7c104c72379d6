// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mines Outcome Analyzer - Payout Data Sources

//! Providers that produce a validated [`PayoutTable`].
//!
//! The analyzer only sees the loaded table; storage format is the provider's
//! business.

use std::path::{Path, PathBuf};

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::sealed;
use crate::table::{PayoutTable, SampleDocument};

/// Sample dataset collected on a 25-cell board, hazard counts 1-24.
pub const EMBEDDED_SAMPLES: &str = include_str!("../data/payout_samples.json");

/// Loader collaborator for the payout table.
pub trait PayoutSource: Send + Sync {
    fn load_payout_table(&self) -> Result<PayoutTable, SourceError>;

    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Parse and validate a JSON sample document.
pub fn parse_samples(raw: &[u8]) -> Result<PayoutTable, SourceError> {
    let doc: SampleDocument = serde_json::from_slice(raw)?;
    Ok(PayoutTable::from_document(doc)?)
}

fn read(path: &Path) -> Result<Vec<u8>, SourceError> {
    std::fs::read(path).map_err(|source| SourceError::Io { path: path.to_path_buf(), source })
}

// ─── Embedded ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl PayoutSource for EmbeddedSource {
    fn load_payout_table(&self) -> Result<PayoutTable, SourceError> {
        parse_samples(EMBEDDED_SAMPLES.as_bytes())
    }

    fn describe(&self) -> String {
        "embedded samples".to_string()
    }
}

// ─── JSON file ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    pub path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PayoutSource for JsonFileSource {
    fn load_payout_table(&self) -> Result<PayoutTable, SourceError> {
        parse_samples(&read(&self.path)?)
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}

// ─── Sealed file ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SealedFileSource {
    pub path: PathBuf,
    passphrase: Vec<u8>,
}

impl SealedFileSource {
    pub fn new(path: impl Into<PathBuf>, passphrase: impl Into<Vec<u8>>) -> Self {
        Self { path: path.into(), passphrase: passphrase.into() }
    }

    /// Read the passphrase from environment variable `var`.
    pub fn from_env(path: impl Into<PathBuf>, var: &str) -> Result<Self, SourceError> {
        let passphrase = std::env::var(var).map_err(|_| SourceError::MissingPassphrase(var.to_string()))?;
        Ok(Self::new(path, passphrase))
    }
}

impl PayoutSource for SealedFileSource {
    fn load_payout_table(&self) -> Result<PayoutTable, SourceError> {
        let sealed_bytes = read(&self.path)?;
        let payload = sealed::open(&sealed_bytes, &self.passphrase)?;
        parse_samples(&payload)
    }

    fn describe(&self) -> String {
        format!("sealed file {}", self.path.display())
    }
}

/// Build the provider a config names.
pub fn from_config(config: &SourceConfig) -> Result<Box<dyn PayoutSource>, SourceError> {
    Ok(match config {
        SourceConfig::Embedded => Box::new(EmbeddedSource),
        SourceConfig::JsonFile { path } => Box::new(JsonFileSource::new(path.clone())),
        SourceConfig::SealedFile { path, passphrase_env } => {
            Box::new(SealedFileSource::from_env(path.clone(), passphrase_env)?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mines-engine-{}-{}", std::process::id(), name))
    }

    #[test]
    fn embedded_samples_cover_every_hazard_count() {
        let table = EmbeddedSource.load_payout_table().expect("test: embedded data is valid");
        assert_eq!(table.board_size(), 25);
        assert_eq!(table.hazard_counts().collect::<Vec<_>>(), (1..=24).collect::<Vec<_>>());
        for hazards in table.hazard_counts() {
            let points = table.samples_for(hazards).expect("test: group present");
            assert!(points.len() >= 2, "{hazards} hazards has {} points", points.len());
            assert_eq!(points[0].revealed_cells, 0);
            assert_eq!(points[0].multiplier, 1.0);
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = JsonFileSource::new("/nonexistent/samples.json")
            .load_payout_table()
            .expect_err("test: file absent");
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn sealed_file_round_trips_embedded_data() {
        let path = temp_path("sealed");
        let costs = sealed::KdfCosts { m_cost: 64, t_cost: 1, p_cost: 1 };
        let bytes = sealed::seal_with_costs(
            EMBEDDED_SAMPLES.as_bytes(),
            b"hunter2",
            costs,
            [3u8; sealed::SALT_LEN],
            [4u8; sealed::NONCE_LEN],
        )
        .expect("test: seal embedded data");
        std::fs::write(&path, bytes).expect("test: write sealed file");

        let table = SealedFileSource::new(&path, "hunter2")
            .load_payout_table()
            .expect("test: open sealed file");
        assert_eq!(table, EmbeddedSource.load_payout_table().expect("test: embedded"));

        let err = SealedFileSource::new(&path, "wrong")
            .load_payout_table()
            .expect_err("test: wrong passphrase");
        assert!(matches!(err, SourceError::Sealed(sealed::SealError::Tampered)));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn invalid_document_is_rejected() {
        let err = parse_samples(br#"{"samples":[{"hazard_count":2,"points":[{"revealed_cells":1,"multiplier":1.03}]}]}"#)
            .expect_err("test: single point group");
        assert!(matches!(
            AnalysisError::from(err),
            AnalysisError::InsufficientSampleData { hazard_count: 2, points: 1 }
        ));
    }

    #[test]
    fn unset_passphrase_variable_is_reported() {
        let config = SourceConfig::SealedFile {
            path: PathBuf::from("samples.sealed"),
            passphrase_env: "MINES_TEST_PASSPHRASE_THAT_IS_NOT_SET".to_string(),
        };
        let err = from_config(&config).err().expect("test: variable unset");
        assert!(matches!(err, SourceError::MissingPassphrase(_)));
    }
}
