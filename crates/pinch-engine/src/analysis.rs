//! End-to-end pinch analysis of one stream set.

use pinch_core::{Power, PinchResult, Real, Temperature, degc, kw, nearly_equal};
use tracing::{info, warn};

use crate::cascade::{HeatCascade, HeatCascadeRow, solve_cascade};
use crate::composite::{
    CompositeDiagram, Curve, actual_composite, grand_composite_curve, shifted_composite,
};
use crate::config::PinchConfig;
use crate::interval::{TemperatureInterval, build_intervals, temperature_ladder};
use crate::pocket::CascadeProfile;
use crate::problem_table::{ProblemTableRow, build_problem_table};
use crate::stream::{StreamKind, StreamSet};

/// Utility targets and duty totals derived from the cascade.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnergyTargets {
    pub hot_utility: Real,
    pub cold_utility: Real,
    /// Shifted pinch temperature
    pub pinch_temperature: Real,
    /// Pinch on the hot-stream scale (`pinch + tmin/2`)
    pub hot_pinch_temperature: Real,
    /// Pinch on the cold-stream scale (`pinch - tmin/2`)
    pub cold_pinch_temperature: Real,
    pub total_hot_duty: Real,
    pub total_cold_duty: Real,
    /// Heat exchanged between process streams at minimum utility
    pub heat_recovery: Real,
}

impl EnergyTargets {
    fn new(streams: &StreamSet, cascade: &HeatCascade) -> Self {
        let half = streams.tmin() / 2.0;
        let total_hot_duty = streams.total_duty(StreamKind::Hot);
        Self {
            hot_utility: cascade.hot_utility,
            cold_utility: cascade.cold_utility,
            pinch_temperature: cascade.pinch_temperature,
            hot_pinch_temperature: cascade.pinch_temperature + half,
            cold_pinch_temperature: cascade.pinch_temperature - half,
            total_hot_duty,
            total_cold_duty: streams.total_duty(StreamKind::Cold),
            heat_recovery: total_hot_duty - cascade.cold_utility,
        }
    }

    pub fn hot_utility_power(&self) -> Power {
        kw(self.hot_utility)
    }

    pub fn cold_utility_power(&self) -> Power {
        kw(self.cold_utility)
    }

    pub fn pinch_temperature_quantity(&self) -> Temperature {
        degc(self.pinch_temperature)
    }
}

/// All results of one analysis run. Immutable once built.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PinchAnalysis {
    config: PinchConfig,
    streams: StreamSet,
    temperatures: Vec<Real>,
    intervals: Vec<TemperatureInterval>,
    problem_table: Vec<ProblemTableRow>,
    cascade: HeatCascade,
    shifted_composite: CompositeDiagram,
    composite: CompositeDiagram,
    grand_composite: Curve,
    targets: EnergyTargets,
}

impl PinchAnalysis {
    /// Run every stage in order. Any failure aborts the whole run.
    pub fn run(streams: StreamSet, config: PinchConfig) -> PinchResult<Self> {
        let temperatures = temperature_ladder(&streams);
        let intervals = build_intervals(&streams)?;
        let problem_table = build_problem_table(&streams, &intervals);
        let cascade = solve_cascade(&intervals, &problem_table, &config)?;
        let shifted_composite =
            shifted_composite(&intervals, &problem_table, &cascade, config.zero_tol);
        let composite = actual_composite(&shifted_composite, streams.tmin());
        let grand_composite = grand_composite_curve(&intervals, &cascade);
        let targets = EnergyTargets::new(&streams, &cascade);

        let supplied = targets.total_hot_duty + targets.hot_utility;
        let absorbed = targets.total_cold_duty + targets.cold_utility;
        if !nearly_equal(supplied, absorbed, config.tolerances) {
            warn!(supplied, absorbed, "energy balance not closed within tolerance");
        }
        info!(
            streams = streams.len(),
            intervals = intervals.len(),
            hot_utility = targets.hot_utility,
            cold_utility = targets.cold_utility,
            pinch_temperature = targets.pinch_temperature,
            "pinch analysis complete"
        );

        Ok(Self {
            config,
            streams,
            temperatures,
            intervals,
            problem_table,
            cascade,
            shifted_composite,
            composite,
            grand_composite,
            targets,
        })
    }

    pub fn config(&self) -> &PinchConfig {
        &self.config
    }

    pub fn streams(&self) -> &StreamSet {
        &self.streams
    }

    /// Distinct shifted temperatures, hottest first.
    pub fn temperatures(&self) -> &[Real] {
        &self.temperatures
    }

    pub fn intervals(&self) -> &[TemperatureInterval] {
        &self.intervals
    }

    pub fn problem_table(&self) -> &[ProblemTableRow] {
        &self.problem_table
    }

    pub fn cascade(&self) -> &HeatCascade {
        &self.cascade
    }

    pub fn heat_cascade(&self) -> &[HeatCascadeRow] {
        &self.cascade.rows
    }

    pub fn unfeasible_heat_cascade(&self) -> &[HeatCascadeRow] {
        &self.cascade.infeasible
    }

    pub fn hot_utility(&self) -> Real {
        self.cascade.hot_utility
    }

    pub fn cold_utility(&self) -> Real {
        self.cascade.cold_utility
    }

    pub fn pinch_temperature(&self) -> Real {
        self.cascade.pinch_temperature
    }

    pub fn shifted_composite(&self) -> &CompositeDiagram {
        &self.shifted_composite
    }

    pub fn composite(&self) -> &CompositeDiagram {
        &self.composite
    }

    pub fn grand_composite(&self) -> &Curve {
        &self.grand_composite
    }

    pub fn targets(&self) -> &EnergyTargets {
        &self.targets
    }

    /// Feasible cascade as a profile, ready for pocket deletion.
    pub fn cascade_profile(&self) -> PinchResult<CascadeProfile> {
        CascadeProfile::from_heat_cascade(&self.cascade, &self.intervals)
    }

    /// Feasible cascade with its temperature pockets removed.
    ///
    /// Works on a fresh copy each call; the analysis itself is not modified.
    pub fn deleted_pocket_cascade(&self) -> PinchResult<CascadeProfile> {
        self.cascade_profile()?.delete_pockets(self.config.zero_tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_targets() {
        let set = StreamSet::from_rows(10.0, &[(2.0, 150.0, 50.0), (2.0, 40.0, 120.0)]).unwrap();
        let analysis = PinchAnalysis::run(set, PinchConfig::default()).unwrap();
        let t = analysis.targets();
        assert_eq!(t.hot_utility, 0.0);
        assert_eq!(t.cold_utility, 40.0);
        assert_eq!(t.pinch_temperature, 145.0);
        assert_eq!(t.hot_pinch_temperature, 150.0);
        assert_eq!(t.cold_pinch_temperature, 140.0);
        assert_eq!(t.total_hot_duty, 200.0);
        assert_eq!(t.total_cold_duty, 160.0);
        assert_eq!(t.heat_recovery, 160.0);
        assert_eq!(analysis.temperatures(), &[145.0, 125.0, 45.0]);
        assert_eq!(analysis.grand_composite().h(), vec![0.0, 40.0, 40.0]);
    }

    #[test]
    fn pocket_deletion_leaves_analysis_untouched() {
        let set = StreamSet::from_rows(
            10.0,
            &[
                (2.0, 20.0, 135.0),
                (3.0, 170.0, 60.0),
                (4.0, 80.0, 140.0),
                (1.5, 150.0, 30.0),
            ],
        )
        .unwrap();
        let analysis = PinchAnalysis::run(set, PinchConfig::default()).unwrap();
        let before = analysis.cascade().clone();
        let first = analysis.deleted_pocket_cascade().unwrap();
        let second = analysis.deleted_pocket_cascade().unwrap();
        assert_eq!(first, second);
        assert_eq!(analysis.cascade(), &before);
        assert_eq!(first.len(), 2);
    }
}
