use crate::PinchError;

/// Floating point type used throughout system
pub type Real = f64;

/// Magnitude at or below which a cascade enthalpy is treated as exactly zero.
pub const ZERO_TOL: Real = 1e-22;

/// Tolerances for comparing derived quantities (energy balances, curve ends).
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// `true` when `v` lies inside the zero band `[-zero_tol, zero_tol]`.
#[inline]
pub fn is_zero(v: Real, zero_tol: Real) -> bool {
    v.abs() <= zero_tol
}

#[inline]
pub fn is_positive(v: Real, zero_tol: Real) -> bool {
    v > zero_tol
}

#[inline]
pub fn is_negative(v: Real, zero_tol: Real) -> bool {
    v < -zero_tol
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PinchError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PinchError::NonFinite { what, value: v })
    }
}

/// Linear interpolation of temperature along a straight cascade segment.
///
/// The segment runs from `(h_far, t_far)` to `(h_near, t_near)`; the result
/// is the temperature at which the segment reaches `h_target`.
pub fn interpolate_temperature(
    (h_far, t_far): (Real, Real),
    (h_near, t_near): (Real, Real),
    h_target: Real,
) -> Result<Real, PinchError> {
    let dh = h_near - h_far;
    if dh == 0.0 {
        return Err(PinchError::degenerate(format!(
            "cannot interpolate between boundaries at {t_far} and {t_near}: zero enthalpy difference"
        )));
    }
    let t = t_far + (t_near - t_far) * (h_target - h_far) / dh;
    ensure_finite(t, "interpolated temperature")
}
