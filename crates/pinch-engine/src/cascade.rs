//! Problem table algorithm: infeasible and feasible heat cascades.

use pinch_core::{PinchError, PinchResult, Real};
use tracing::debug;

use crate::config::{PinchConfig, PinchRule};
use crate::interval::TemperatureInterval;
use crate::problem_table::ProblemTableRow;

/// One cascade row: the interval's enthalpy change and the running total
/// leaving its cooler boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeatCascadeRow {
    pub delta_h: Real,
    pub exit_h: Real,
}

/// Result of the two-pass cascade.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeatCascade {
    /// Minimum hot utility (kW)
    pub hot_utility: Real,
    /// Minimum cold utility (kW)
    pub cold_utility: Real,
    /// Shifted pinch temperature (degC)
    pub pinch_temperature: Real,
    /// Row at which the infeasible cascade reached its minimum
    pub pinch_interval: usize,
    /// Feasible cascade, starting from `hot_utility`
    pub rows: Vec<HeatCascadeRow>,
    /// Cascade starting from zero; diagnostic only
    pub infeasible: Vec<HeatCascadeRow>,
}

impl HeatCascade {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Feasible exit enthalpies, hottest row first.
    pub fn exit_h(&self) -> Vec<Real> {
        self.rows.iter().map(|r| r.exit_h).collect()
    }

    pub fn delta_h(&self) -> Vec<Real> {
        self.rows.iter().map(|r| r.delta_h).collect()
    }
}

fn accumulate(start: Real, table: &[ProblemTableRow]) -> Vec<HeatCascadeRow> {
    let mut exit_h = start;
    table
        .iter()
        .map(|row| {
            exit_h += row.delta_h;
            HeatCascadeRow {
                delta_h: row.delta_h,
                exit_h,
            }
        })
        .collect()
}

/// Run the infeasible pass, derive the hot utility, then run the feasible pass.
pub fn solve_cascade(
    intervals: &[TemperatureInterval],
    table: &[ProblemTableRow],
    config: &PinchConfig,
) -> PinchResult<HeatCascade> {
    if intervals.is_empty() || table.is_empty() {
        return Err(PinchError::InsufficientData {
            what: "temperature intervals",
            got: intervals.len().min(table.len()),
            need: 1,
        });
    }
    if intervals.len() != table.len() {
        return Err(PinchError::InvalidArg {
            what: "problem table and intervals differ in length",
        });
    }

    let infeasible = accumulate(0.0, table);

    // The implicit zero above the first row is a candidate minimum. The
    // pinch only moves to a later row that is lower by more than `zero_tol`;
    // the hot utility always covers the true minimum.
    let mut lowest: Real = 0.0;
    let mut pinch_h = 0.0;
    let mut pinch_interval = 0;
    let mut went_negative = false;
    for (i, row) in infeasible.iter().enumerate() {
        lowest = lowest.min(row.exit_h);
        if row.exit_h < pinch_h - config.zero_tol {
            pinch_h = row.exit_h;
            pinch_interval = i;
            went_negative = true;
        }
    }
    let hot_utility = if lowest < 0.0 { -lowest } else { 0.0 };

    let rows = accumulate(hot_utility, table);
    let cold_utility = rows.last().map(|r| r.exit_h).unwrap_or(hot_utility);

    let pinch_temperature = match config.pinch_rule {
        PinchRule::FirstRowUpper if pinch_interval == 0 => intervals[0].t1,
        PinchRule::CoolerBoundary if !went_negative => intervals[0].t1,
        _ => intervals[pinch_interval].t2,
    };

    for (i, (inf, feas)) in infeasible.iter().zip(&rows).enumerate() {
        debug!(
            interval = i,
            delta_h = feas.delta_h,
            infeasible_exit_h = inf.exit_h,
            exit_h = feas.exit_h,
            "heat cascade row"
        );
    }
    debug!(
        hot_utility,
        cold_utility, pinch_temperature, pinch_interval, "heat cascade solved"
    );

    Ok(HeatCascade {
        hot_utility,
        cold_utility,
        pinch_temperature,
        pinch_interval,
        rows,
        infeasible,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::build_intervals;
    use crate::problem_table::build_problem_table;
    use crate::stream::StreamSet;

    fn cascade_for(tmin: Real, rows: &[(Real, Real, Real)], config: &PinchConfig) -> HeatCascade {
        let set = StreamSet::from_rows(tmin, rows).unwrap();
        let intervals = build_intervals(&set).unwrap();
        let table = build_problem_table(&set, &intervals);
        solve_cascade(&intervals, &table, config).unwrap()
    }

    #[test]
    fn scenario_has_no_hot_utility() {
        let cascade = cascade_for(
            10.0,
            &[(2.0, 150.0, 50.0), (2.0, 40.0, 120.0)],
            &PinchConfig::default(),
        );
        assert_eq!(cascade.hot_utility, 0.0);
        assert_eq!(cascade.cold_utility, 40.0);
        assert_eq!(cascade.pinch_temperature, 145.0);
        assert_eq!(cascade.pinch_interval, 0);
        assert_eq!(cascade.exit_h(), vec![40.0, 40.0]);
    }

    #[test]
    fn four_stream_targets() {
        let cascade = cascade_for(
            10.0,
            &[
                (2.0, 20.0, 135.0),
                (3.0, 170.0, 60.0),
                (4.0, 80.0, 140.0),
                (1.5, 150.0, 30.0),
            ],
            &PinchConfig::default(),
        );
        assert!((cascade.hot_utility - 20.0).abs() < 1e-9);
        assert!((cascade.cold_utility - 60.0).abs() < 1e-9);
        assert_eq!(cascade.pinch_interval, 2);
        assert_eq!(cascade.pinch_temperature, 85.0);
        let infeasible: Vec<Real> = cascade.infeasible.iter().map(|r| r.exit_h).collect();
        assert_eq!(infeasible, vec![60.0, 62.5, -20.0, 55.0, 40.0]);
    }

    #[test]
    fn first_row_minimum_depends_on_rule() {
        // Cold stream alone in the hottest interval: the first row is already the minimum.
        let rows = [(1.0, 20.0, 100.0), (2.0, 80.0, 0.0)];
        let legacy = cascade_for(0.0, &rows, &PinchConfig::default());
        assert_eq!(legacy.pinch_interval, 0);
        assert_eq!(legacy.pinch_temperature, 100.0);

        let cooler = cascade_for(
            0.0,
            &rows,
            &PinchConfig::default().with_pinch_rule(PinchRule::CoolerBoundary),
        );
        assert_eq!(cooler.pinch_temperature, 80.0);
        assert_eq!(cooler.hot_utility, legacy.hot_utility);
    }

    #[test]
    fn mismatched_inputs_are_rejected() {
        let config = PinchConfig::default();
        assert!(matches!(
            solve_cascade(&[], &[], &config),
            Err(PinchError::InsufficientData { .. })
        ));
    }

    #[test]
    fn near_tie_keeps_earlier_pinch() {
        let bounds = [(100.0, 90.0), (90.0, 80.0), (80.0, 70.0), (70.0, 60.0)];
        let intervals: Vec<TemperatureInterval> = bounds
            .iter()
            .map(|&(t1, t2)| TemperatureInterval {
                t1,
                t2,
                stream_indices: Vec::new(),
            })
            .collect();
        // Running sums 5, -10, 0, -10 - 1e-9.
        let table: Vec<ProblemTableRow> = [5.0, -15.0, 10.0, -10.0 - 1e-9]
            .iter()
            .map(|&delta_h| ProblemTableRow {
                delta_s: 10.0,
                hot_cp: 0.0,
                cold_cp: 0.0,
                delta_cp: delta_h / 10.0,
                delta_h,
            })
            .collect();

        let tolerant = PinchConfig::default().with_zero_tol(1e-6);
        let cascade = solve_cascade(&intervals, &table, &tolerant).unwrap();
        assert_eq!(cascade.pinch_interval, 1);
        assert_eq!(cascade.pinch_temperature, 80.0);
        assert!((cascade.hot_utility - (10.0 + 1e-9)).abs() < 1e-12);
        assert!(cascade.rows.iter().all(|r| r.exit_h >= -1e-12));

        let strict = solve_cascade(&intervals, &table, &PinchConfig::default()).unwrap();
        assert_eq!(strict.pinch_interval, 3);
        assert_eq!(strict.pinch_temperature, 60.0);
    }
}
