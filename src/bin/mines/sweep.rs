// Sweep Runner: every reveal depth for every hazard count in the table

use mines_engine::expected_value::break_even_multiplier;
use mines_engine::{AnalysisError, OutcomeAnalyzer, SuccessRates};

use crate::report::{HazardReport, Stats, SweepRow};

/// Analyse one hazard count across all reveal depths.
pub fn run_hazard(analyzer: &OutcomeAnalyzer, hazard_count: u32) -> Result<HazardReport, AnalysisError> {
    let rows: Vec<SweepRow> = analyzer
        .sweep(hazard_count)?
        .into_iter()
        .map(|(revealed_count, r)| SweepRow {
            revealed_count,
            success_rate: r.success_rate,
            failure_rate: r.failure_rate,
            multiplier: r.multiplier,
            expected_value: r.expected_value,
            break_even_multiplier: break_even_multiplier(&SuccessRates {
                success_rate: r.success_rate,
                failure_rate: r.failure_rate,
            }),
        })
        .collect();

    // Zero reveals is a refunded stake, not a bet; leave it out of the aggregate.
    let evs: Vec<f64> = rows
        .iter()
        .filter(|r| r.revealed_count > 0 && r.expected_value.is_finite())
        .map(|r| r.expected_value)
        .collect();

    let best_revealed_count = rows
        .iter()
        .filter(|r| r.revealed_count > 0 && r.expected_value.is_finite())
        .max_by(|a, b| a.expected_value.total_cmp(&b.expected_value))
        .map(|r| r.revealed_count);

    let break_even_reveals = rows
        .iter()
        .filter(|r| r.revealed_count > 0 && r.expected_value >= 0.0)
        .map(|r| r.revealed_count)
        .collect();

    Ok(HazardReport {
        hazard_count,
        expected_value: Stats::from_samples(&evs),
        best_revealed_count,
        break_even_reveals,
        rows,
    })
}

/// Sweep every hazard count the table covers and the board can hold.
pub fn run_all(analyzer: &OutcomeAnalyzer, board_size: u32) -> Result<Vec<HazardReport>, AnalysisError> {
    let hazards: Vec<u32> = analyzer
        .table()
        .hazard_counts()
        .filter(|&h| h < board_size)
        .collect();
    hazards.into_iter().map(|h| run_hazard(analyzer, h)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mines_engine::{AnalyzerConfig, PayoutTable, SamplePoint};
    use std::sync::Arc;

    // Five-cell board, one hazard: success odds 0.8, 0.6, 0.4, 0.2 for 1..=4 reveals.
    fn analyzer() -> OutcomeAnalyzer {
        let table = PayoutTable::from_groups(
            5,
            [
                (1, vec![
                    SamplePoint::new(0, 1.0),
                    SamplePoint::new(1, 1.2),
                    SamplePoint::new(2, 1.5),
                    SamplePoint::new(4, 6.0),
                ]),
                (5, vec![SamplePoint::new(0, 1.0), SamplePoint::new(1, 2.0)]),
            ],
        )
        .expect("test: valid table");
        let config = AnalyzerConfig { board_size: 5, ..AnalyzerConfig::default() };
        OutcomeAnalyzer::new(Arc::new(table), &config)
    }

    #[test]
    fn zero_reveals_row_is_kept_but_not_aggregated() {
        let report = run_hazard(&analyzer(), 1).expect("test: sweep hazard 1");
        assert_eq!(report.rows.len(), 5);
        assert_eq!(report.rows[0].revealed_count, 0);
        assert_eq!(report.rows[0].expected_value, 0.0);
        assert_eq!(report.expected_value.n, 4);
        // EVs: -0.04, -0.1, 0.5, 0.2
        assert!((report.expected_value.min - (-0.1)).abs() < 1e-9);
        assert!((report.expected_value.max - 0.5).abs() < 1e-9);
        assert!((report.expected_value.mean - 0.14).abs() < 1e-9);
    }

    #[test]
    fn best_depth_and_break_even_reveals() {
        let report = run_hazard(&analyzer(), 1).expect("test: sweep hazard 1");
        assert_eq!(report.best_revealed_count, Some(3));
        assert_eq!(report.break_even_reveals, vec![3, 4]);
        let row = &report.rows[3];
        assert!((row.multiplier - 3.75).abs() < 1e-9);
        let break_even = row.break_even_multiplier.expect("test: success possible");
        assert!((break_even - 2.5).abs() < 1e-9);
    }

    #[test]
    fn run_all_skips_hazard_counts_that_fill_the_board() {
        let reports = run_all(&analyzer(), 5).expect("test: sweep table");
        let hazards: Vec<u32> = reports.iter().map(|r| r.hazard_count).collect();
        assert_eq!(hazards, vec![1]);
    }
}
