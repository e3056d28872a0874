//! Combined relative/absolute tolerance for numeric leaves.

use serde::{Deserialize, Serialize};

use crate::error::DeepEqualError;

pub const DEFAULT_REL_TOL: f64 = 1e-9;
pub const DEFAULT_ABS_TOL: f64 = 1e-9;

/// Tolerance applied to every numeric leaf of a comparison.
///
/// Two finite numbers `a` and `b` are close when
/// `|a - b| <= max(rel_tol * max(|a|, |b|), abs_tol)`.
///
/// Deserializing validates the fields the same way [`Tolerance::new`] does;
/// missing fields take their defaults.
///
/// ```
/// use bcb_deep_equal::Tolerance;
///
/// let tol = Tolerance::default();
/// assert!(tol.is_close(0.1 + 0.2, 0.3));
/// assert!(!Tolerance::exact().is_close(0.1 + 0.2, 0.3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ToleranceConfig")]
pub struct Tolerance {
    rel_tol: f64,
    abs_tol: f64,
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ToleranceConfig {
    rel_tol: f64,
    abs_tol: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            rel_tol: DEFAULT_REL_TOL,
            abs_tol: DEFAULT_ABS_TOL,
        }
    }
}

impl TryFrom<ToleranceConfig> for Tolerance {
    type Error = DeepEqualError;

    fn try_from(config: ToleranceConfig) -> Result<Self, Self::Error> {
        Tolerance::new(config.rel_tol, config.abs_tol)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rel_tol: DEFAULT_REL_TOL,
            abs_tol: DEFAULT_ABS_TOL,
        }
    }
}

impl Tolerance {
    /// Validated constructor. Negative or NaN tolerances are rejected.
    pub fn new(rel_tol: f64, abs_tol: f64) -> Result<Self, DeepEqualError> {
        if rel_tol.is_nan() || abs_tol.is_nan() || rel_tol < 0.0 || abs_tol < 0.0 {
            return Err(DeepEqualError::InvalidTolerance { rel_tol, abs_tol });
        }
        Ok(Self { rel_tol, abs_tol })
    }

    /// Unvalidated constructor used by the plain-`f64` entry points.
    ///
    /// An unusable tolerance degrades to exact equality because
    /// [`Tolerance::is_close`] short-circuits on `a == b`.
    pub(crate) fn from_raw(rel_tol: f64, abs_tol: f64) -> Self {
        Self { rel_tol, abs_tol }
    }

    /// Zero tolerance: numbers must be equal, NaN still matches NaN.
    pub fn exact() -> Self {
        Self {
            rel_tol: 0.0,
            abs_tol: 0.0,
        }
    }

    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    /// Parses and validates a JSON tolerance config such as
    /// `{"rel_tol": 1e-6}`.
    pub fn from_json_str(s: &str) -> Result<Self, DeepEqualError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Float leaf rule.
    ///
    /// Both NaN compare equal. An infinite operand only equals an infinity
    /// of the same sign.
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return a.is_nan() && b.is_nan();
        }
        if a == b {
            return true;
        }
        if a.is_infinite() || b.is_infinite() {
            return false;
        }
        let diff = (a - b).abs();
        diff <= self.bound(a.abs().max(b.abs()))
    }

    /// Integer leaf rule. The difference is taken in `i128` so it cannot
    /// overflow.
    pub fn is_close_int(&self, a: i64, b: i64) -> bool {
        if a == b {
            return true;
        }
        let diff = (i128::from(a) - i128::from(b)).unsigned_abs() as f64;
        let magnitude = a.unsigned_abs().max(b.unsigned_abs()) as f64;
        diff <= self.bound(magnitude)
    }

    fn bound(&self, magnitude: f64) -> f64 {
        (self.rel_tol * magnitude).max(self.abs_tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tolerance_absorbs_rounding() {
        let tol = Tolerance::default();
        assert!(tol.is_close(0.1 + 0.2, 0.3));
        assert!(tol.is_close(1.0 / 3.0 * 3.0, 1.0));
        assert!(tol.is_close((0..10).map(|_| 0.1).sum(), 1.0));
        assert!(!tol.is_close(1.0, 1.0001));
    }

    #[test]
    fn abs_tol_dominates_near_zero() {
        let tol = Tolerance::new(1e-9, 1e-6).unwrap();
        assert!(tol.is_close(0.0, 5e-7));
        assert!(!tol.is_close(0.0, 5e-6));
    }

    #[test]
    fn rel_tol_scales_with_magnitude() {
        let tol = Tolerance::new(1e-6, 0.0).unwrap();
        assert!(tol.is_close(1e12, 1e12 + 1e5));
        assert!(!tol.is_close(1e12, 1e12 + 1e7));
    }

    #[test]
    fn nan_and_infinity() {
        let tol = Tolerance::new(1.0, 1.0).unwrap();
        assert!(tol.is_close(f64::NAN, f64::NAN));
        assert!(!tol.is_close(f64::NAN, 0.0));
        assert!(!tol.is_close(0.0, f64::NAN));
        assert!(tol.is_close(f64::INFINITY, f64::INFINITY));
        assert!(!tol.is_close(f64::INFINITY, f64::NEG_INFINITY));
        assert!(!tol.is_close(f64::INFINITY, f64::MAX));
    }

    #[test]
    fn int_rule_does_not_overflow() {
        let tol = Tolerance::default();
        assert!(!tol.is_close_int(i64::MIN, i64::MAX));
        assert!(tol.is_close_int(i64::MAX, i64::MAX - 1));
        assert!(!tol.is_close_int(0, 1));
    }

    #[test]
    fn exact_still_matches_equal_values() {
        let tol = Tolerance::exact();
        assert!(tol.is_close(2.5, 2.5));
        assert!(tol.is_close_int(3, 3));
        assert!(!tol.is_close(2.5, 2.5000000001));
    }

    #[test]
    fn new_rejects_negative_and_nan() {
        assert!(matches!(
            Tolerance::new(-1.0, 0.0),
            Err(DeepEqualError::InvalidTolerance { .. })
        ));
        assert!(Tolerance::new(0.0, f64::NAN).is_err());
        assert!(Tolerance::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn negative_raw_tolerance_degrades_to_exact() {
        let tol = Tolerance::from_raw(-1.0, -1.0);
        assert!(tol.is_close(1.0, 1.0));
        assert!(!tol.is_close(1.0, 1.0 + f64::EPSILON));
    }
}
