//! Process streams and the validated stream set.

use pinch_core::{
    PinchError, PinchResult, Real, TempInterval, Temperature, as_degc, as_delta_k, ensure_finite,
};

/// Whether a stream releases (HOT) or absorbs (COLD) heat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum StreamKind {
    Hot,
    Cold,
}

/// A process stream with constant heat capacity flow rate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stream {
    cp: Real,
    supply_temp: Real,
    target_temp: Real,
    kind: StreamKind,
}

impl Stream {
    /// Create a stream from `cp` (kW/K) and supply/target temperatures (degC).
    ///
    /// A stream is HOT exactly when it is supplied hotter than its target.
    pub fn new(cp: Real, supply_temp: Real, target_temp: Real) -> PinchResult<Self> {
        let cp = ensure_finite(cp, "stream cp")?;
        let supply_temp = ensure_finite(supply_temp, "stream supply temperature")?;
        let target_temp = ensure_finite(target_temp, "stream target temperature")?;
        if cp <= 0.0 {
            return Err(PinchError::format(format!(
                "stream cp must be positive, got {cp}"
            )));
        }
        let kind = if supply_temp > target_temp {
            StreamKind::Hot
        } else {
            StreamKind::Cold
        };
        Ok(Self {
            cp,
            supply_temp,
            target_temp,
            kind,
        })
    }

    /// Create a stream from typed temperatures; `cp` stays in kW/K.
    pub fn from_quantities(cp: Real, supply: Temperature, target: Temperature) -> PinchResult<Self> {
        Self::new(cp, as_degc(supply), as_degc(target))
    }

    pub fn cp(&self) -> Real {
        self.cp
    }

    pub fn supply_temp(&self) -> Real {
        self.supply_temp
    }

    pub fn target_temp(&self) -> Real {
        self.target_temp
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    pub fn is_hot(&self) -> bool {
        self.kind == StreamKind::Hot
    }

    /// Heat released or absorbed over the full temperature change (kW).
    pub fn duty(&self) -> Real {
        self.cp * (self.supply_temp - self.target_temp).abs()
    }

    /// Offset applied to both temperatures when shifting by `tmin / 2`.
    fn shift(&self, tmin: Real) -> Real {
        match self.kind {
            StreamKind::Hot => -tmin / 2.0,
            StreamKind::Cold => tmin / 2.0,
        }
    }
}

/// A stream together with its shifted temperatures.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShiftedStream {
    pub stream: Stream,
    pub shifted_supply: Real,
    pub shifted_target: Real,
}

impl ShiftedStream {
    fn new(stream: Stream, tmin: Real) -> Self {
        let offset = stream.shift(tmin);
        Self {
            stream,
            shifted_supply: stream.supply_temp + offset,
            shifted_target: stream.target_temp + offset,
        }
    }

    /// Shifted temperature range as `(low, high)`.
    pub fn shifted_range(&self) -> (Real, Real) {
        match self.stream.kind {
            StreamKind::Hot => (self.shifted_target, self.shifted_supply),
            StreamKind::Cold => (self.shifted_supply, self.shifted_target),
        }
    }

    /// Whether the shifted range spans the whole interval `[t2, t1]`.
    pub fn covers(&self, t1: Real, t2: Real) -> bool {
        match self.stream.kind {
            StreamKind::Hot => self.shifted_supply >= t1 && self.shifted_target <= t2,
            StreamKind::Cold => self.shifted_target >= t1 && self.shifted_supply <= t2,
        }
    }
}

/// Ordered, validated set of streams sharing one minimum approach temperature.
///
/// Built once and read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StreamSet {
    tmin: Real,
    streams: Vec<ShiftedStream>,
}

impl StreamSet {
    /// Minimum number of streams in an analysis.
    pub const MIN_STREAMS: usize = 2;

    pub fn new(tmin: Real, streams: Vec<Stream>) -> PinchResult<Self> {
        let tmin = ensure_finite(tmin, "Tmin")?;
        if tmin < 0.0 {
            return Err(PinchError::format(format!(
                "Tmin must be non-negative, got {tmin}"
            )));
        }
        if streams.len() < Self::MIN_STREAMS {
            return Err(PinchError::InsufficientData {
                what: "streams",
                got: streams.len(),
                need: Self::MIN_STREAMS,
            });
        }
        let streams = streams
            .into_iter()
            .map(|s| ShiftedStream::new(s, tmin))
            .collect();
        Ok(Self { tmin, streams })
    }

    /// Build from raw `(cp, supply, target)` rows.
    pub fn from_rows(tmin: Real, rows: &[(Real, Real, Real)]) -> PinchResult<Self> {
        let streams = rows
            .iter()
            .map(|&(cp, ts, tt)| Stream::new(cp, ts, tt))
            .collect::<PinchResult<Vec<_>>>()?;
        Self::new(tmin, streams)
    }

    pub fn with_min_approach(tmin: TempInterval, streams: Vec<Stream>) -> PinchResult<Self> {
        Self::new(as_delta_k(tmin), streams)
    }

    pub fn tmin(&self) -> Real {
        self.tmin
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ShiftedStream> {
        self.streams.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShiftedStream> {
        self.streams.iter()
    }

    /// Sum of duties over streams of one kind (kW).
    pub fn total_duty(&self, kind: StreamKind) -> Real {
        self.streams
            .iter()
            .filter(|s| s.stream.kind == kind)
            .map(|s| s.stream.duty())
            .sum()
    }
}

impl<'a> IntoIterator for &'a StreamSet {
    type Item = &'a ShiftedStream;
    type IntoIter = std::slice::Iter<'a, ShiftedStream>;

    fn into_iter(self) -> Self::IntoIter {
        self.streams.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinch_core::{degc, delta_k};

    #[test]
    fn classification_follows_supply_and_target() {
        assert_eq!(Stream::new(2.0, 150.0, 50.0).unwrap().kind(), StreamKind::Hot);
        assert_eq!(Stream::new(2.0, 40.0, 120.0).unwrap().kind(), StreamKind::Cold);
        // Equal temperatures are not "supplied hotter", so the stream is COLD.
        assert_eq!(Stream::new(1.0, 80.0, 80.0).unwrap().kind(), StreamKind::Cold);
    }

    #[test]
    fn shifting_moves_hot_down_and_cold_up() {
        let set = StreamSet::from_rows(10.0, &[(2.0, 150.0, 50.0), (2.0, 40.0, 120.0)]).unwrap();
        let hot = set.get(0).unwrap();
        assert_eq!((hot.shifted_supply, hot.shifted_target), (145.0, 45.0));
        assert_eq!(hot.shifted_range(), (45.0, 145.0));
        let cold = set.get(1).unwrap();
        assert_eq!((cold.shifted_supply, cold.shifted_target), (45.0, 125.0));
        assert_eq!(cold.shifted_range(), (45.0, 125.0));
    }

    #[test]
    fn rejects_single_stream() {
        let err = StreamSet::from_rows(10.0, &[(2.0, 150.0, 50.0)]).unwrap_err();
        assert_eq!(
            err,
            PinchError::InsufficientData {
                what: "streams",
                got: 1,
                need: 2
            }
        );
    }

    #[test]
    fn rejects_non_positive_cp_and_negative_tmin() {
        assert!(matches!(
            Stream::new(0.0, 100.0, 50.0),
            Err(PinchError::Format { .. })
        ));
        assert!(matches!(
            StreamSet::from_rows(-1.0, &[(1.0, 100.0, 50.0), (1.0, 20.0, 60.0)]),
            Err(PinchError::Format { .. })
        ));
        assert!(matches!(
            Stream::new(1.0, Real::NAN, 50.0),
            Err(PinchError::NonFinite { .. })
        ));
    }

    #[test]
    fn typed_constructors_agree_with_raw_values() {
        let a = Stream::from_quantities(3.0, degc(170.0), degc(60.0)).unwrap();
        assert!((a.supply_temp() - 170.0).abs() < 1e-9);
        let b = Stream::new(2.0, 20.0, 135.0).unwrap();
        let set = StreamSet::with_min_approach(delta_k(10.0), vec![a, b]).unwrap();
        assert!((set.tmin() - 10.0).abs() < 1e-12);
        assert!((set.total_duty(StreamKind::Hot) - 330.0).abs() < 1e-6);
        assert!((set.total_duty(StreamKind::Cold) - 230.0).abs() < 1e-9);
    }
}
