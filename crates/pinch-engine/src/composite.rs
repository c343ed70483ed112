//! Composite curves and the grand composite curve.

use pinch_core::{Real, is_zero};
use tracing::debug;

use crate::cascade::HeatCascade;
use crate::interval::TemperatureInterval;
use crate::problem_table::ProblemTableRow;

/// A point on an enthalpy/temperature curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CurvePoint {
    /// Enthalpy (kW)
    pub h: Real,
    /// Temperature (degC)
    pub t: Real,
}

/// Piecewise-linear curve in enthalpy/temperature space.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Curve {
    pub points: Vec<CurvePoint>,
}

impl Curve {
    pub fn h(&self) -> Vec<Real> {
        self.points.iter().map(|p| p.h).collect()
    }

    pub fn t(&self) -> Vec<Real> {
        self.points.iter().map(|p| p.t).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&CurvePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&CurvePoint> {
        self.points.last()
    }

    /// Drop flat runs at either end, keeping the innermost point of each run.
    ///
    /// At least two points always remain.
    fn prune_flat_ends(&mut self, zero_tol: Real) {
        while self.points.len() > 2 && is_zero(self.points[1].h - self.points[0].h, zero_tol) {
            self.points.remove(0);
        }
        while self.points.len() > 2 {
            let n = self.points.len();
            if !is_zero(self.points[n - 2].h - self.points[n - 1].h, zero_tol) {
                break;
            }
            self.points.pop();
        }
    }

    fn shifted_by(&self, dt: Real) -> Curve {
        Curve {
            points: self
                .points
                .iter()
                .map(|p| CurvePoint { h: p.h, t: p.t + dt })
                .collect(),
        }
    }
}

/// Hot and cold composite curves, both ordered coldest point first.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompositeDiagram {
    pub hot: Curve,
    pub cold: Curve,
}

/// Composite curves on the shifted temperature scale.
///
/// The hot curve starts at zero enthalpy at the coldest shifted temperature.
/// The cold curve is anchored so that it ends at the cold utility at the
/// coldest shifted temperature.
pub fn shifted_composite(
    intervals: &[TemperatureInterval],
    table: &[ProblemTableRow],
    cascade: &HeatCascade,
    zero_tol: Real,
) -> CompositeDiagram {
    let Some(coldest) = intervals.last() else {
        return CompositeDiagram::default();
    };

    let mut hot = Curve::default();
    let mut h = 0.0;
    hot.points.push(CurvePoint { h, t: coldest.t2 });
    for (interval, row) in intervals.iter().zip(table).rev() {
        h += row.hot_delta_h();
        hot.points.push(CurvePoint { h, t: interval.t1 });
    }

    let cold_total: Real = table.iter().map(|r| r.cold_delta_h()).sum();
    let mut h = cascade.cold_utility + cold_total;
    let mut cold_desc = vec![CurvePoint {
        h,
        t: intervals[0].t1,
    }];
    for (interval, row) in intervals.iter().zip(table) {
        h -= row.cold_delta_h();
        cold_desc.push(CurvePoint { h, t: interval.t2 });
    }
    cold_desc.reverse();
    let mut cold = Curve { points: cold_desc };

    hot.prune_flat_ends(zero_tol);
    cold.prune_flat_ends(zero_tol);
    debug!(
        hot_points = hot.len(),
        cold_points = cold.len(),
        "shifted composite curves"
    );
    CompositeDiagram { hot, cold }
}

/// Undo the temperature shift: hot `+tmin/2`, cold `-tmin/2`.
pub fn actual_composite(shifted: &CompositeDiagram, tmin: Real) -> CompositeDiagram {
    CompositeDiagram {
        hot: shifted.hot.shifted_by(tmin / 2.0),
        cold: shifted.cold.shifted_by(-tmin / 2.0),
    }
}

/// Feasible cascade enthalpy against shifted temperature, hottest point first.
pub fn grand_composite_curve(intervals: &[TemperatureInterval], cascade: &HeatCascade) -> Curve {
    let Some(first) = intervals.first() else {
        return Curve::default();
    };
    let mut points = Vec::with_capacity(intervals.len() + 1);
    points.push(CurvePoint {
        h: cascade.hot_utility,
        t: first.t1,
    });
    points.extend(
        intervals
            .iter()
            .zip(&cascade.rows)
            .map(|(interval, row)| CurvePoint {
                h: row.exit_h,
                t: interval.t2,
            }),
    );
    Curve { points }
}
