//! Analysis configuration.

use std::fmt;
use std::str::FromStr;

use pinch_core::{Real, Tolerances, ZERO_TOL};

/// How the pinch temperature is read off the infeasible cascade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum PinchRule {
    /// Minimum in the first row reports that row's upper boundary `t1`;
    /// any later minimum reports the cooler boundary `t2` of its row.
    #[default]
    FirstRowUpper,
    /// Upper boundary of the first row only when no running sum went
    /// negative; otherwise always the cooler boundary of the minimising row.
    CoolerBoundary,
}

impl fmt::Display for PinchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinchRule::FirstRowUpper => write!(f, "first-row-upper"),
            PinchRule::CoolerBoundary => write!(f, "cooler-boundary"),
        }
    }
}

impl FromStr for PinchRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first-row-upper" => Ok(PinchRule::FirstRowUpper),
            "cooler-boundary" => Ok(PinchRule::CoolerBoundary),
            other => Err(format!(
                "unknown pinch rule '{other}' (expected first-row-upper or cooler-boundary)"
            )),
        }
    }
}

/// Pinch analysis configuration.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinchConfig {
    /// Enthalpies with magnitude at or below this are exactly zero
    pub zero_tol: Real,
    /// Pinch temperature tie-break
    pub pinch_rule: PinchRule,
    /// Tolerances for energy-balance checks on the finished analysis
    pub tolerances: Tolerances,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            zero_tol: ZERO_TOL,
            pinch_rule: PinchRule::default(),
            tolerances: Tolerances::default(),
        }
    }
}

impl PinchConfig {
    pub fn with_zero_tol(mut self, zero_tol: Real) -> Self {
        self.zero_tol = zero_tol;
        self
    }

    pub fn with_pinch_rule(mut self, pinch_rule: PinchRule) -> Self {
        self.pinch_rule = pinch_rule;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = PinchConfig::default();
        assert_eq!(config.zero_tol, 1e-22);
        assert_eq!(config.pinch_rule, PinchRule::FirstRowUpper);
    }

    #[test]
    fn pinch_rule_parses_its_display_form() {
        for rule in [PinchRule::FirstRowUpper, PinchRule::CoolerBoundary] {
            assert_eq!(rule.to_string().parse::<PinchRule>().unwrap(), rule);
        }
        assert!("middle".parse::<PinchRule>().is_err());
    }
}
