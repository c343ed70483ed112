//! Problem table: net heat capacity flow and enthalpy change per interval.

use pinch_core::Real;
use tracing::debug;

use crate::interval::TemperatureInterval;
use crate::stream::{StreamKind, StreamSet};

/// One problem table row, aligned with the interval at the same position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProblemTableRow {
    /// Interval width `t1 - t2` (K)
    pub delta_s: Real,
    /// Sum of hot stream cp in the interval (kW/K)
    pub hot_cp: Real,
    /// Sum of cold stream cp in the interval (kW/K)
    pub cold_cp: Real,
    /// `hot_cp - cold_cp` (kW/K)
    pub delta_cp: Real,
    /// `delta_s * delta_cp`; positive is a surplus (kW)
    pub delta_h: Real,
}

impl ProblemTableRow {
    pub fn hot_delta_h(&self) -> Real {
        self.hot_cp * self.delta_s
    }

    pub fn cold_delta_h(&self) -> Real {
        self.cold_cp * self.delta_s
    }
}

/// One row per interval, same order. Empty intervals give an explicit zero row.
pub fn build_problem_table(
    streams: &StreamSet,
    intervals: &[TemperatureInterval],
) -> Vec<ProblemTableRow> {
    let rows: Vec<ProblemTableRow> = intervals
        .iter()
        .map(|interval| {
            let (mut hot_cp, mut cold_cp) = (0.0, 0.0);
            for s in interval
                .stream_indices
                .iter()
                .filter_map(|&i| streams.get(i))
            {
                match s.stream.kind() {
                    StreamKind::Hot => hot_cp += s.stream.cp(),
                    StreamKind::Cold => cold_cp += s.stream.cp(),
                }
            }
            let delta_s = interval.delta_t();
            let delta_cp = hot_cp - cold_cp;
            ProblemTableRow {
                delta_s,
                hot_cp,
                cold_cp,
                delta_cp,
                delta_h: delta_s * delta_cp,
            }
        })
        .collect();

    for (i, row) in rows.iter().enumerate() {
        debug!(
            interval = i,
            delta_s = row.delta_s,
            delta_cp = row.delta_cp,
            delta_h = row.delta_h,
            "problem table row"
        );
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::build_intervals;

    #[test]
    fn scenario_rows() {
        let set = StreamSet::from_rows(10.0, &[(2.0, 150.0, 50.0), (2.0, 40.0, 120.0)]).unwrap();
        let intervals = build_intervals(&set).unwrap();
        let table = build_problem_table(&set, &intervals);
        let delta_h: Vec<Real> = table.iter().map(|r| r.delta_h).collect();
        assert_eq!(delta_h, vec![40.0, 0.0]);
        assert_eq!(table[1].hot_cp, 2.0);
        assert_eq!(table[1].cold_cp, 2.0);
        assert_eq!(table[1].delta_cp, 0.0);
    }

    #[test]
    fn empty_interval_still_has_a_row() {
        let set = StreamSet::from_rows(10.0, &[(1.0, 100.0, 80.0), (1.0, 20.0, 50.0)]).unwrap();
        let intervals = build_intervals(&set).unwrap();
        let table = build_problem_table(&set, &intervals);
        assert_eq!(table.len(), intervals.len());
        assert_eq!(table[1].delta_cp, 0.0);
        assert_eq!(table[1].delta_h, 0.0);
        assert_eq!(table[1].delta_s, 20.0);
    }
}
