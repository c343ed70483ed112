//! Temperature pocket deletion.
//!
//! A pocket is a surplus row directly followed by a deficit row (optionally
//! with one flat row between them). Within a pocket the surplus heat can
//! serve the deficit locally, so the pocket is cut off at a constant
//! enthalpy: the smaller side is absorbed into the larger one and the cut
//! temperature is found by linear interpolation along the larger row.
//!
//! The cascade is split at its pinch boundary and each side is swept on its
//! own until no pocket remains. Above the pinch a flat leading row left by a
//! merge at the top is dropped; below the pinch a flat trailing row left by
//! any merge is dropped.
//!
//! Deletion never mutates its input. Callers chaining several runs (for
//! example stitching many site profiles) must still hand each run its own
//! profile; profiles are plain values and are not shared between runs.

use pinch_core::{
    PinchError, PinchResult, Real, ensure_finite, interpolate_temperature, is_negative, is_zero,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cascade::HeatCascade;
use crate::interval::TemperatureInterval;

/// Structural problems with a cascade handed to pocket deletion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PocketError {
    #[error("cascade has no rows")]
    EmptyCascade,

    #[error("cascade arrays differ in length: H={h}, deltaH={delta_h}, T={t}")]
    LengthMismatch { h: usize, delta_h: usize, t: usize },

    #[error("cascade index out of range: {what} (index={index}, len={len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("cascade temperatures rise at boundary {index} ({above} -> {below})")]
    Unordered { index: usize, above: Real, below: Real },
}

impl From<PocketError> for PinchError {
    fn from(e: PocketError) -> Self {
        PinchError::PocketDeletion {
            what: e.to_string(),
        }
    }
}

/// A cascade boundary: temperature and the enthalpy flowing across it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CascadePoint {
    pub temperature: Real,
    pub exit_h: Real,
}

/// A cascade row, described by its enthalpy change and its cooler boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProfileRow {
    pub delta_h: Real,
    pub exit_h: Real,
    /// Temperature of the cooler boundary
    pub temperature: Real,
}

impl ProfileRow {
    fn flat(exit_h: Real, temperature: Real) -> Self {
        Self {
            delta_h: 0.0,
            exit_h,
            temperature,
        }
    }

    fn lower(&self) -> CascadePoint {
        CascadePoint {
            temperature: self.temperature,
            exit_h: self.exit_h,
        }
    }
}

/// How a surplus row and the row after it combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PocketCase {
    /// Surplus and deficit cancel; both collapse into one flat row
    ExactCancel,
    /// Surplus is larger; the cut lands inside the surplus row
    PartialCancelLeft,
    /// Deficit is larger; the cut lands inside the deficit row
    PartialCancelRight,
    /// Next row is flat; look one row further for the deficit
    SkipZero,
}

impl PocketCase {
    fn classify(surplus: Real, next: Real, zero_tol: Real) -> Option<Self> {
        if is_zero(next, zero_tol) {
            return Some(PocketCase::SkipZero);
        }
        if !is_negative(next, zero_tol) {
            return None;
        }
        let net = surplus + next;
        Some(if is_zero(net, zero_tol) {
            PocketCase::ExactCancel
        } else if net > 0.0 {
            PocketCase::PartialCancelLeft
        } else {
            PocketCase::PartialCancelRight
        })
    }
}

#[derive(Clone, Copy, Debug)]
struct Pocket {
    surplus: usize,
    deficit: usize,
    case: PocketCase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    AbovePinch,
    BelowPinch,
}

/// Heat cascade as a top boundary plus rows, hottest first.
///
/// `H[]`/`T[]` views have one more entry than `deltaH[]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CascadeProfile {
    top: CascadePoint,
    rows: Vec<ProfileRow>,
}

impl CascadeProfile {
    /// Feasible cascade paired with the interval boundaries it was built on.
    pub fn from_heat_cascade(
        cascade: &HeatCascade,
        intervals: &[TemperatureInterval],
    ) -> PinchResult<Self> {
        let first = intervals.first().ok_or(PocketError::EmptyCascade)?;
        if cascade.rows.len() != intervals.len() {
            return Err(PocketError::LengthMismatch {
                h: cascade.rows.len() + 1,
                delta_h: cascade.rows.len(),
                t: intervals.len() + 1,
            }
            .into());
        }
        let rows = cascade
            .rows
            .iter()
            .zip(intervals)
            .map(|(row, interval)| ProfileRow {
                delta_h: row.delta_h,
                exit_h: row.exit_h,
                temperature: interval.t2,
            })
            .collect();
        Ok(Self {
            top: CascadePoint {
                temperature: first.t1,
                exit_h: cascade.hot_utility,
            },
            rows,
        })
    }

    /// Rebuild from raw `(H[], deltaH[], T[])` arrays, validating their shape.
    pub fn from_parts(h: &[Real], delta_h: &[Real], t: &[Real]) -> PinchResult<Self> {
        if delta_h.is_empty() {
            return Err(PocketError::EmptyCascade.into());
        }
        if h.len() != delta_h.len() + 1 || t.len() != h.len() {
            return Err(PocketError::LengthMismatch {
                h: h.len(),
                delta_h: delta_h.len(),
                t: t.len(),
            }
            .into());
        }
        for (&hv, &tv) in h.iter().zip(t) {
            ensure_finite(hv, "cascade enthalpy")?;
            ensure_finite(tv, "cascade temperature")?;
        }
        for (i, pair) in t.windows(2).enumerate() {
            if pair[1] > pair[0] {
                return Err(PocketError::Unordered {
                    index: i + 1,
                    above: pair[0],
                    below: pair[1],
                }
                .into());
            }
        }
        let rows = delta_h
            .iter()
            .enumerate()
            .map(|(i, &dh)| {
                Ok(ProfileRow {
                    delta_h: ensure_finite(dh, "cascade deltaH")?,
                    exit_h: h[i + 1],
                    temperature: t[i + 1],
                })
            })
            .collect::<PinchResult<Vec<_>>>()?;
        Ok(Self {
            top: CascadePoint {
                temperature: t[0],
                exit_h: h[0],
            },
            rows,
        })
    }

    pub fn top(&self) -> CascadePoint {
        self.top
    }

    pub fn rows(&self) -> &[ProfileRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `H[]`: top enthalpy followed by every row's exit enthalpy.
    pub fn enthalpies(&self) -> Vec<Real> {
        std::iter::once(self.top.exit_h)
            .chain(self.rows.iter().map(|r| r.exit_h))
            .collect()
    }

    pub fn delta_h(&self) -> Vec<Real> {
        self.rows.iter().map(|r| r.delta_h).collect()
    }

    /// `T[]`: top temperature followed by every row's cooler boundary.
    pub fn temperatures(&self) -> Vec<Real> {
        std::iter::once(self.top.temperature)
            .chain(self.rows.iter().map(|r| r.temperature))
            .collect()
    }

    /// Boundary `index`; boundary 0 is the top, boundary `i` closes row `i - 1`.
    pub fn boundary(&self, index: usize) -> Result<CascadePoint, PocketError> {
        if index == 0 {
            return Ok(self.top);
        }
        self.rows
            .get(index - 1)
            .map(ProfileRow::lower)
            .ok_or(PocketError::IndexOutOfRange {
                what: "boundary",
                index,
                len: self.rows.len() + 1,
            })
    }

    fn row(&self, index: usize) -> Result<ProfileRow, PocketError> {
        self.rows
            .get(index)
            .copied()
            .ok_or(PocketError::IndexOutOfRange {
                what: "row",
                index,
                len: self.rows.len(),
            })
    }

    /// First boundary whose enthalpy has dropped to zero.
    ///
    /// Falls back to the boundary of minimum enthalpy when rounding kept
    /// every boundary above the zero threshold.
    pub fn pinch_boundary(&self, zero_tol: Real) -> usize {
        let h = self.enthalpies();
        if let Some(i) = h.iter().position(|&v| v <= zero_tol) {
            return i;
        }
        let (i, min) = h
            .iter()
            .enumerate()
            .fold((0, Real::INFINITY), |(bi, bv), (i, &v)| {
                if v < bv { (i, v) } else { (bi, bv) }
            });
        warn!(
            boundary = i,
            exit_h = min,
            zero_tol, "no cascade boundary within the zero threshold; using the minimum"
        );
        i
    }

    /// Remove temperature pockets and return the reduced cascade.
    pub fn delete_pockets(&self, zero_tol: Real) -> PinchResult<CascadeProfile> {
        if self.rows.is_empty() {
            return Err(PocketError::EmptyCascade.into());
        }
        let pinch = self.pinch_boundary(zero_tol);
        let (mut above, mut below) = self.split_at(pinch)?;

        let below_merges = below.sweep(Side::BelowPinch, zero_tol)?;
        let above_merges = above.sweep(Side::AbovePinch, zero_tol)?;

        let mut reduced = Self::join(above, below);
        // A cut ending at the pinch can leave flat rows on both sides of it.
        reduced.collapse_flat_runs(zero_tol);
        debug!(
            pinch_boundary = pinch,
            above_merges,
            below_merges,
            rows_in = self.rows.len(),
            rows_out = reduced.rows.len(),
            "temperature pockets deleted"
        );
        Ok(reduced)
    }

    fn split_at(&self, boundary: usize) -> Result<(CascadeProfile, CascadeProfile), PocketError> {
        let pinch = self.boundary(boundary)?;
        let above = CascadeProfile {
            top: self.top,
            rows: self.rows[..boundary].to_vec(),
        };
        let below = CascadeProfile {
            top: pinch,
            rows: self.rows[boundary..].to_vec(),
        };
        Ok((above, below))
    }

    fn join(above: CascadeProfile, below: CascadeProfile) -> CascadeProfile {
        let top = if above.rows.is_empty() {
            below.top
        } else {
            above.top
        };
        let mut rows = above.rows;
        rows.extend(below.rows);
        CascadeProfile { top, rows }
    }

    fn sweep(&mut self, side: Side, zero_tol: Real) -> PinchResult<usize> {
        self.collapse_flat_runs(zero_tol);
        let mut merges = 0;
        let mut i = 0;
        while i + 1 < self.rows.len() {
            let Some(pocket) = self.find_pocket(i, zero_tol)? else {
                i += 1;
                continue;
            };
            self.merge(pocket)?;
            merges += 1;
            match side {
                Side::AbovePinch if pocket.surplus == 0 => self.trim_leading_flat(zero_tol),
                Side::AbovePinch => {}
                Side::BelowPinch => self.trim_trailing_flat(zero_tol),
            }
            self.collapse_flat_runs(zero_tol);
            i = 0;
        }
        Ok(merges)
    }

    fn find_pocket(&self, i: usize, zero_tol: Real) -> Result<Option<Pocket>, PocketError> {
        let surplus = self.row(i)?.delta_h;
        if surplus <= zero_tol {
            return Ok(None);
        }
        let mut deficit = i + 1;
        let mut case = PocketCase::classify(surplus, self.row(deficit)?.delta_h, zero_tol);
        if case == Some(PocketCase::SkipZero) {
            deficit += 1;
            case = match self.rows.get(deficit) {
                Some(row) => PocketCase::classify(surplus, row.delta_h, zero_tol),
                None => None,
            };
        }
        Ok(match case {
            None | Some(PocketCase::SkipZero) => None,
            Some(case) => Some(Pocket {
                surplus: i,
                deficit,
                case,
            }),
        })
    }

    fn merge(&mut self, pocket: Pocket) -> PinchResult<()> {
        let Pocket {
            surplus: i,
            deficit: m,
            case,
        } = pocket;
        let upper = self.boundary(i)?;
        let surplus = self.row(i)?;
        let deficit_upper = self.boundary(m)?;
        let deficit = self.row(m)?;
        check_span(upper, surplus.lower())?;
        check_span(deficit_upper, deficit.lower())?;

        let replacement = match case {
            PocketCase::ExactCancel => {
                vec![ProfileRow::flat(upper.exit_h, deficit.temperature)]
            }
            PocketCase::PartialCancelLeft => {
                let h_cut = deficit.exit_h;
                let t_cut = interpolate_temperature(
                    (surplus.exit_h, surplus.temperature),
                    (upper.exit_h, upper.temperature),
                    h_cut,
                )?;
                vec![
                    ProfileRow {
                        delta_h: h_cut - upper.exit_h,
                        exit_h: h_cut,
                        temperature: t_cut,
                    },
                    ProfileRow::flat(h_cut, deficit.temperature),
                ]
            }
            PocketCase::PartialCancelRight => {
                let h_cut = upper.exit_h;
                let t_cut = interpolate_temperature(
                    (deficit.exit_h, deficit.temperature),
                    (deficit_upper.exit_h, deficit_upper.temperature),
                    h_cut,
                )?;
                vec![
                    ProfileRow::flat(h_cut, t_cut),
                    ProfileRow {
                        delta_h: deficit.exit_h - h_cut,
                        exit_h: deficit.exit_h,
                        temperature: deficit.temperature,
                    },
                ]
            }
            PocketCase::SkipZero => {
                return Err(PocketError::IndexOutOfRange {
                    what: "deficit row after flat row",
                    index: m,
                    len: self.rows.len(),
                }
                .into());
            }
        };
        debug!(
            ?case,
            surplus_row = i,
            deficit_row = m,
            surplus = surplus.delta_h,
            deficit = deficit.delta_h,
            "merging temperature pocket"
        );
        self.rows.splice(i..=m, replacement);
        Ok(())
    }

    /// Merge each run of consecutive flat rows into one row.
    fn collapse_flat_runs(&mut self, zero_tol: Real) {
        let mut i = 0;
        while i + 1 < self.rows.len() {
            if is_zero(self.rows[i].delta_h, zero_tol) && is_zero(self.rows[i + 1].delta_h, zero_tol)
            {
                self.rows[i].temperature = self.rows[i + 1].temperature;
                self.rows.remove(i + 1);
            } else {
                i += 1;
            }
        }
    }

    /// Edge trims never remove the last row of a side.
    fn trim_leading_flat(&mut self, zero_tol: Real) {
        if self.rows.len() > 1 && is_zero(self.rows[0].delta_h, zero_tol) {
            self.top.temperature = self.rows[0].temperature;
            self.rows.remove(0);
        }
    }

    fn trim_trailing_flat(&mut self, zero_tol: Real) {
        if self.rows.len() > 1 && self.rows.last().is_some_and(|r| is_zero(r.delta_h, zero_tol)) {
            self.rows.pop();
        }
    }
}

fn check_span(upper: CascadePoint, lower: CascadePoint) -> PinchResult<()> {
    if upper.temperature == lower.temperature && upper.exit_h != lower.exit_h {
        return Err(PinchError::degenerate(format!(
            "boundaries at {} degC differ in enthalpy ({} vs {})",
            upper.temperature, upper.exit_h, lower.exit_h
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: Real = 1e-22;

    fn close(a: &[Real], b: &[Real]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn four_stream_cascade_pockets() {
        let profile = CascadeProfile::from_parts(
            &[20.0, 80.0, 82.5, 0.0, 75.0, 60.0],
            &[60.0, 2.5, -82.5, 75.0, -15.0],
            &[165.0, 145.0, 140.0, 85.0, 55.0, 25.0],
        )
        .unwrap();
        assert_eq!(profile.pinch_boundary(TOL), 3);

        let reduced = profile.delete_pockets(TOL).unwrap();
        let t_hot = 85.0 + (85.0 + 55.0 * 80.0 / 82.5 - 85.0) * 20.0 / 80.0;
        assert!(close(&reduced.temperatures(), &[t_hot, 85.0, 61.0]));
        assert!(close(&reduced.enthalpies(), &[20.0, 0.0, 60.0]));
        assert!(close(&reduced.delta_h(), &[-20.0, 60.0]));
    }

    #[test]
    fn exact_cancellation_collapses_pair() {
        // Pinch at the top; surplus 30 then deficit 30 below it.
        let profile = CascadeProfile::from_parts(
            &[0.0, 30.0, 0.0, 10.0],
            &[30.0, -30.0, 10.0],
            &[100.0, 90.0, 80.0, 70.0],
        )
        .unwrap();
        let reduced = profile.delete_pockets(TOL).unwrap();
        assert_eq!(reduced.delta_h(), vec![0.0, 10.0]);
        assert_eq!(reduced.temperatures(), vec![100.0, 80.0, 70.0]);
        assert_eq!(reduced.enthalpies(), vec![0.0, 0.0, 10.0]);
    }

    #[test]
    fn zero_row_between_surplus_and_deficit_is_skipped() {
        // Above the pinch: +10, flat, -40 with the pinch at the bottom.
        let profile = CascadeProfile::from_parts(
            &[30.0, 40.0, 40.0, 0.0],
            &[10.0, 0.0, -40.0],
            &[200.0, 190.0, 170.0, 150.0],
        )
        .unwrap();
        let reduced = profile.delete_pockets(TOL).unwrap();
        // Cut the deficit row at 30 kW: 150 + 20 * 30/40 = 165.
        // The merge started at the top, so the leading flat row is dropped.
        assert!(close(&reduced.temperatures(), &[165.0, 150.0]));
        assert!(close(&reduced.enthalpies(), &[30.0, 0.0]));
        assert!(close(&reduced.delta_h(), &[-30.0]));
    }

    #[test]
    fn surplus_larger_than_deficit_below_pinch() {
        let profile =
            CascadeProfile::from_parts(&[0.0, 75.0, 60.0], &[75.0, -15.0], &[85.0, 55.0, 25.0])
                .unwrap();
        let reduced = profile.delete_pockets(TOL).unwrap();
        // Trailing flat row removed after the merge.
        assert!(close(&reduced.temperatures(), &[85.0, 61.0]));
        assert!(close(&reduced.enthalpies(), &[0.0, 60.0]));
    }

    #[test]
    fn monotonic_cascade_is_untouched() {
        let profile = CascadeProfile::from_parts(
            &[50.0, 20.0, 0.0, 15.0, 40.0],
            &[-30.0, -20.0, 15.0, 25.0],
            &[150.0, 120.0, 100.0, 80.0, 40.0],
        )
        .unwrap();
        assert_eq!(profile.delete_pockets(TOL).unwrap(), profile);
    }

    #[test]
    fn deleting_twice_changes_nothing() {
        let profile = CascadeProfile::from_parts(
            &[20.0, 80.0, 82.5, 0.0, 75.0, 60.0],
            &[60.0, 2.5, -82.5, 75.0, -15.0],
            &[165.0, 145.0, 140.0, 85.0, 55.0, 25.0],
        )
        .unwrap();
        let once = profile.delete_pockets(TOL).unwrap();
        let twice = once.delete_pockets(TOL).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn double_flat_rows_are_merged() {
        let profile = CascadeProfile::from_parts(
            &[10.0, 0.0, 0.0, 0.0, 5.0],
            &[-10.0, 0.0, 0.0, 5.0],
            &[100.0, 90.0, 80.0, 70.0, 60.0],
        )
        .unwrap();
        let reduced = profile.delete_pockets(TOL).unwrap();
        assert_eq!(reduced.delta_h(), vec![-10.0, 0.0, 5.0]);
        assert_eq!(reduced.temperatures(), vec![100.0, 90.0, 70.0, 60.0]);
    }

    #[test]
    fn malformed_parts_are_rejected() {
        assert!(matches!(
            CascadeProfile::from_parts(&[0.0], &[], &[100.0]),
            Err(PinchError::PocketDeletion { .. })
        ));
        assert!(matches!(
            CascadeProfile::from_parts(&[0.0, 1.0], &[1.0], &[100.0]),
            Err(PinchError::PocketDeletion { .. })
        ));
        assert!(matches!(
            CascadeProfile::from_parts(&[0.0, 1.0], &[1.0], &[100.0, 110.0]),
            Err(PinchError::PocketDeletion { .. })
        ));
    }

    #[test]
    fn boundary_lookup_is_checked() {
        let profile =
            CascadeProfile::from_parts(&[0.0, 5.0], &[5.0], &[100.0, 90.0]).unwrap();
        assert_eq!(profile.boundary(1).unwrap().exit_h, 5.0);
        assert_eq!(
            profile.boundary(2),
            Err(PocketError::IndexOutOfRange {
                what: "boundary",
                index: 2,
                len: 2
            })
        );
    }

    #[test]
    fn zero_width_row_with_enthalpy_gap_is_degenerate() {
        let profile = CascadeProfile::from_parts(
            &[0.0, 10.0, 5.0],
            &[10.0, -5.0],
            &[100.0, 100.0, 90.0],
        )
        .unwrap();
        assert!(matches!(
            profile.delete_pockets(TOL),
            Err(PinchError::NumericDegeneracy { .. })
        ));
    }

    #[test]
    fn whole_side_cancelling_keeps_one_flat_row() {
        let profile =
            CascadeProfile::from_parts(&[0.0, 30.0, 0.0], &[30.0, -30.0], &[100.0, 90.0, 80.0])
                .unwrap();
        let reduced = profile.delete_pockets(TOL).unwrap();
        assert_eq!(reduced.enthalpies(), vec![0.0, 0.0]);
        assert_eq!(reduced.delta_h(), vec![0.0]);
        assert_eq!(reduced.temperatures(), vec![100.0, 80.0]);

        let rebuilt = CascadeProfile::from_parts(
            &reduced.enthalpies(),
            &reduced.delta_h(),
            &reduced.temperatures(),
        )
        .unwrap();
        assert_eq!(rebuilt.delete_pockets(TOL).unwrap(), reduced);
    }

    #[test]
    fn empty_profile_is_rejected() {
        let empty = CascadeProfile {
            top: CascadePoint {
                temperature: 100.0,
                exit_h: 0.0,
            },
            rows: Vec::new(),
        };
        assert!(matches!(
            empty.delete_pockets(TOL),
            Err(PinchError::PocketDeletion { .. })
        ));
    }

    #[test]
    fn exact_cancel_at_first_row_moves_top() {
        // Above the pinch: +30 and -30 cancel at the top, then -10 down to the pinch.
        let profile = CascadeProfile::from_parts(
            &[10.0, 40.0, 10.0, 0.0],
            &[30.0, -30.0, -10.0],
            &[100.0, 90.0, 80.0, 70.0],
        )
        .unwrap();
        let reduced = profile.delete_pockets(TOL).unwrap();
        assert_eq!(reduced.enthalpies(), vec![10.0, 0.0]);
        assert_eq!(reduced.delta_h(), vec![-10.0]);
        assert_eq!(reduced.temperatures(), vec![80.0, 70.0]);
    }

    #[test]
    fn exact_cancel_across_flat_row() {
        let profile = CascadeProfile::from_parts(
            &[10.0, 40.0, 40.0, 10.0, 0.0],
            &[30.0, 0.0, -30.0, -10.0],
            &[100.0, 90.0, 85.0, 80.0, 70.0],
        )
        .unwrap();
        let reduced = profile.delete_pockets(TOL).unwrap();
        assert_eq!(reduced.enthalpies(), vec![10.0, 0.0]);
        assert_eq!(reduced.delta_h(), vec![-10.0]);
        assert_eq!(reduced.temperatures(), vec![80.0, 70.0]);
    }

    #[test]
    fn larger_surplus_above_pinch_is_cut_inside_surplus_row() {
        // +40 then -20: cut the surplus row at 30 kW (95 degC), leaving a flat
        // row to 80 degC. That flat row then sits between +20 and -30, and the
        // second merge cuts the -30 row at 10 kW: 70 + 10 * 10/30.
        let profile = CascadeProfile::from_parts(
            &[10.0, 50.0, 30.0, 0.0],
            &[40.0, -20.0, -30.0],
            &[100.0, 90.0, 80.0, 70.0],
        )
        .unwrap();
        assert_eq!(
            PocketCase::classify(40.0, -20.0, TOL),
            Some(PocketCase::PartialCancelLeft)
        );
        let reduced = profile.delete_pockets(TOL).unwrap();
        assert!(close(&reduced.temperatures(), &[70.0 + 10.0 / 3.0, 70.0]));
        assert!(close(&reduced.enthalpies(), &[10.0, 0.0]));
        assert!(close(&reduced.delta_h(), &[-10.0]));
    }
}
