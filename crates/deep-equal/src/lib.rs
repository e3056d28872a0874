//! bcb-deep-equal - Tolerance-aware deep equality.
//!
//! Drop-in replacement for `actual == expected` in harnesses that compare
//! the outputs of two implementations of the same function. Floating-point
//! results that differ only by rounding compare equal; everything else keeps
//! strict structural and type checks.
//!
//! ```
//! use bcb_deep_equal::{deep_equal, Value};
//!
//! assert_ne!(0.1 + 0.2, 0.3);
//! assert!(deep_equal(&Value::from(0.1 + 0.2), &Value::from(0.3), 1e-9, 1e-9));
//!
//! let nan = Value::from(f64::NAN);
//! assert!(deep_equal(&nan, &nan, 1e-9, 1e-9));
//!
//! let inf = Value::from(f64::INFINITY);
//! assert!(!deep_equal(&inf, &Value::from(f64::NEG_INFINITY), 1e-9, 1e-9));
//! ```
//!
//! # Rules
//!
//! Applied to each pair of nodes in order:
//!
//! 1. Two NaNs are equal.
//! 2. Two numbers (`Int` or `Float`, either order) are equal when
//!    `|a - b| <= max(rel_tol * max(|a|, |b|), abs_tol)`. Infinities only
//!    equal infinities of the same sign.
//! 3. Booleans compare exactly and never as numbers.
//! 4. Lists need equal length and pairwise equal elements.
//! 5. Maps need identical key sets and equal values per key. Keys are
//!    matched exactly, so `1` and `"1"` are different keys.
//! 6. Sets need equal size and a one-to-one pairing of equal elements.
//! 7. Numeric arrays (`ndarray` feature, [`deep_equal`] only) need equal
//!    shapes and elementwise closeness, NaN matching NaN.
//! 8. Any other pair of different kinds is unequal.
//! 9. Strings, bytes and `None` compare exactly.
//!
//! # Features
//!
//! `ndarray` (default) adds [`Value::Array`]. Without it the crate has no
//! numeric-array dependency and [`deep_equal`] behaves like
//! [`deep_equal_simple`].

#[cfg(feature = "ndarray")]
mod array;
mod compare;
mod error;
mod json;
mod macros;
mod tolerance;
mod value;

pub use compare::{Comparator, Mode};
pub use error::DeepEqualError;
pub use json::deep_equal_json;
pub use tolerance::{Tolerance, DEFAULT_ABS_TOL, DEFAULT_REL_TOL};
pub use value::{Key, Kind, Value};

#[cfg(feature = "ndarray")]
pub use ndarray;

/// Tolerance-aware recursive equality.
///
/// Never panics. A mismatch of any kind is `false`.
pub fn deep_equal(a: &Value, b: &Value, rel_tol: f64, abs_tol: f64) -> bool {
    Comparator::new(Tolerance::from_raw(rel_tol, abs_tol)).equal(a, b)
}

/// Same as [`deep_equal`] without the numeric-array rule.
///
/// Arrays, when the `ndarray` feature put them in the value, are walked as
/// sequences of sub-arrays along their outer axis.
pub fn deep_equal_simple(a: &Value, b: &Value, rel_tol: f64, abs_tol: f64) -> bool {
    Comparator::restricted(Tolerance::from_raw(rel_tol, abs_tol)).equal(a, b)
}

/// [`deep_equal`] with a prepared [`Tolerance`].
pub fn deep_equal_with(a: &Value, b: &Value, tolerance: &Tolerance) -> bool {
    Comparator::new(*tolerance).equal(a, b)
}
