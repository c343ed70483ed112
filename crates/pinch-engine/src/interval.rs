//! Shifted temperature ladder and interval construction.

use pinch_core::{PinchError, PinchResult, Real};
use tracing::debug;

use crate::stream::StreamSet;

/// One band `[t2, t1]` of the shifted temperature ladder.
///
/// Intervals are always handled hottest first; downstream tables are
/// indexed by interval position, not by temperature.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TemperatureInterval {
    pub t1: Real,
    pub t2: Real,
    /// Indices into the stream set, ascending
    pub stream_indices: Vec<usize>,
}

impl TemperatureInterval {
    pub fn delta_t(&self) -> Real {
        self.t1 - self.t2
    }

    pub fn contains(&self, stream_index: usize) -> bool {
        self.stream_indices.binary_search(&stream_index).is_ok()
    }
}

/// Distinct shifted supply/target temperatures, strictly descending.
pub fn temperature_ladder(streams: &StreamSet) -> Vec<Real> {
    let mut temps: Vec<Real> = streams
        .iter()
        .flat_map(|s| [s.shifted_supply, s.shifted_target])
        .collect();
    temps.sort_by(|a, b| b.total_cmp(a));
    temps.dedup();
    temps
}

/// Split the ladder into consecutive intervals and assign stream membership.
pub fn build_intervals(streams: &StreamSet) -> PinchResult<Vec<TemperatureInterval>> {
    let ladder = temperature_ladder(streams);
    if ladder.len() < 2 {
        return Err(PinchError::degenerate(
            "all shifted temperatures coincide; no temperature interval can be formed",
        ));
    }

    let intervals: Vec<TemperatureInterval> = ladder
        .windows(2)
        .map(|pair| {
            let (t1, t2) = (pair[0], pair[1]);
            let stream_indices = streams
                .iter()
                .enumerate()
                .filter(|(_, s)| s.covers(t1, t2))
                .map(|(i, _)| i)
                .collect();
            TemperatureInterval {
                t1,
                t2,
                stream_indices,
            }
        })
        .collect();

    for (i, interval) in intervals.iter().enumerate() {
        debug!(
            interval = i,
            t1 = interval.t1,
            t2 = interval.t2,
            streams = ?interval.stream_indices,
            "temperature interval"
        );
    }
    Ok(intervals)
}
