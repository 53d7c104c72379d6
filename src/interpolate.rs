// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mines Outcome Analyzer - Multiplier Prediction

//! Piecewise-linear multiplier prediction over one hazard count's samples.
//!
//! Queries between two samples land on the connecting line. Queries outside
//! the sampled range follow the configured [`ExtrapolationPolicy`]; the default
//! extends the nearest edge segment, which can produce negative or very large
//! multipliers for extreme inputs.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::SamplePoint;

/// How to treat queries below the first or above the last sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExtrapolationPolicy {
    /// Extend the nearest edge segment's slope.
    #[default]
    Linear,
    /// Hold the nearest edge sample's multiplier.
    ClampToEdge,
    /// Extend linearly, then clamp into `[min, max]`.
    Bounded { min: f64, max: f64 },
}

impl ExtrapolationPolicy {
    /// Policy from a short mode name: `linear`, `clamp` or `bounded`.
    /// `min` and `max` are only read for `bounded`.
    pub fn from_mode(mode: &str, min: f64, max: f64) -> Result<Self, ConfigError> {
        match mode {
            "linear" => Ok(Self::Linear),
            "clamp" => Ok(Self::ClampToEdge),
            "bounded" if min.is_finite() && max.is_finite() && min <= max => Ok(Self::Bounded { min, max }),
            "bounded" => Err(ConfigError::Invalid(format!(
                "bounded extrapolation needs finite min <= max, got [{min}, {max}]"
            ))),
            other => Err(ConfigError::Invalid(format!("unknown extrapolation mode {other:?}"))),
        }
    }
}

/// Where a query fell relative to the sampled range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryRange {
    Below,
    Within,
    Above,
}

/// Predicted multiplier plus where the query sat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub multiplier: f64,
    pub range: QueryRange,
}

/// Interpolate the multiplier at `revealed`.
///
/// `points` must hold at least two samples with strictly increasing
/// `revealed_cells`; [`crate::PayoutTable`] guarantees both. Returns `None`
/// otherwise.
pub fn predict(points: &[SamplePoint], revealed: f64, policy: ExtrapolationPolicy) -> Option<Prediction> {
    if points.len() < 2 {
        return None;
    }
    let first = points[0];
    let last = points[points.len() - 1];
    let range = if revealed < f64::from(first.revealed_cells) {
        QueryRange::Below
    } else if revealed > f64::from(last.revealed_cells) {
        QueryRange::Above
    } else {
        QueryRange::Within
    };

    if let (ExtrapolationPolicy::ClampToEdge, QueryRange::Below) = (policy, range) {
        return Some(Prediction { multiplier: first.multiplier, range });
    }
    if let (ExtrapolationPolicy::ClampToEdge, QueryRange::Above) = (policy, range) {
        return Some(Prediction { multiplier: last.multiplier, range });
    }

    // Index of the first sample at or beyond the query, kept inside [1, n-1]
    // so edge queries reuse the outermost segment.
    let upper = points
        .partition_point(|p| f64::from(p.revealed_cells) < revealed)
        .clamp(1, points.len() - 1);
    let lo = points[upper - 1];
    let hi = points[upper];

    let x0 = f64::from(lo.revealed_cells);
    let x1 = f64::from(hi.revealed_cells);
    let slope = (hi.multiplier - lo.multiplier) / (x1 - x0);
    let mut multiplier = lo.multiplier + slope * (revealed - x0);

    if let (ExtrapolationPolicy::Bounded { min, max }, false) = (policy, range == QueryRange::Within) {
        multiplier = multiplier.max(min).min(max);
    }

    Some(Prediction { multiplier, range })
}
