// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mines Outcome Analyzer - Payout Sample Table

//! Offline-collected multiplier samples grouped by hazard count.
//!
//! The X axis is always *revealed safe cells*. Groups are sorted by X on
//! construction and validated once; the table is immutable afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AnalysisError;
use crate::types::{SamplePoint, DEFAULT_BOARD_SIZE};

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

/// JSON document shared by every file-backed source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleDocument {
    /// Board the samples were collected on.
    #[serde(default = "default_board_size")]
    pub board_size: u32,
    pub samples: Vec<SampleGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleGroup {
    pub hazard_count: u32,
    pub points: Vec<SamplePoint>,
}

fn default_board_size() -> u32 {
    DEFAULT_BOARD_SIZE
}

// ---------------------------------------------------------------------------
// PayoutTable
// ---------------------------------------------------------------------------

/// Validated mapping from hazard count to X-sorted sample points.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutTable {
    board_size: u32,
    groups: BTreeMap<u32, Vec<SamplePoint>>,
}

impl PayoutTable {
    /// Build and validate a table. Fails on the first malformed group.
    pub fn from_groups<I>(board_size: u32, groups: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = (u32, Vec<SamplePoint>)>,
    {
        let mut table = BTreeMap::new();
        for (hazard_count, mut points) in groups {
            if table.contains_key(&hazard_count) {
                return Err(AnalysisError::MalformedSampleData {
                    hazard_count,
                    reason: "hazard count listed twice".to_string(),
                });
            }
            points.sort_by_key(|p| p.revealed_cells);
            validate_group(hazard_count, &points)?;
            table.insert(hazard_count, points);
        }
        Ok(Self { board_size, groups: table })
    }

    pub fn from_document(doc: SampleDocument) -> Result<Self, AnalysisError> {
        let groups = doc.samples.into_iter().map(|g| (g.hazard_count, g.points));
        Self::from_groups(doc.board_size, groups)
    }

    /// Sample points for `hazard_count`, sorted by revealed cells.
    pub fn samples_for(&self, hazard_count: u32) -> Result<&[SamplePoint], AnalysisError> {
        self.groups
            .get(&hazard_count)
            .map(Vec::as_slice)
            .ok_or(AnalysisError::MissingSampleData { hazard_count })
    }

    pub fn board_size(&self) -> u32 {
        self.board_size
    }

    /// Hazard counts covered by the table, ascending.
    pub fn hazard_counts(&self) -> impl Iterator<Item = u32> + '_ {
        self.groups.keys().copied()
    }

    pub fn contains(&self, hazard_count: u32) -> bool {
        self.groups.contains_key(&hazard_count)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn to_document(&self) -> SampleDocument {
        SampleDocument {
            board_size: self.board_size,
            samples: self
                .groups
                .iter()
                .map(|(&hazard_count, points)| SampleGroup { hazard_count, points: points.clone() })
                .collect(),
        }
    }
}

fn validate_group(hazard_count: u32, points: &[SamplePoint]) -> Result<(), AnalysisError> {
    if points.len() < 2 {
        return Err(AnalysisError::InsufficientSampleData { hazard_count, points: points.len() });
    }
    if let Some(bad) = points.iter().find(|p| !(p.multiplier.is_finite() && p.multiplier > 0.0)) {
        return Err(AnalysisError::MalformedSampleData {
            hazard_count,
            reason: format!(
                "multiplier {} at {} revealed cells is not a positive number",
                bad.multiplier, bad.revealed_cells
            ),
        });
    }
    if let Some(pair) = points.windows(2).find(|w| w[0].revealed_cells == w[1].revealed_cells) {
        return Err(AnalysisError::MalformedSampleData {
            hazard_count,
            reason: format!("duplicate sample at {} revealed cells", pair[0].revealed_cells),
        });
    }
    Ok(())
}
