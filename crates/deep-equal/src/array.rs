//! Numeric-array leaves.

use ndarray::{ArrayViewD, Axis, Zip};
use tracing::{debug, trace};

use crate::error::DeepEqualError;
use crate::tolerance::Tolerance;

/// Full-mode rule: shapes must match, then every element pair must be
/// close. NaN positions match NaN positions.
pub(crate) fn all_close(
    a: ArrayViewD<'_, f64>,
    b: ArrayViewD<'_, f64>,
    tolerance: &Tolerance,
) -> bool {
    if a.shape() != b.shape() {
        trace!(left = ?a.shape(), right = ?b.shape(), "array shapes differ");
        return false;
    }
    let equal = Zip::from(a).and(b).all(|&x, &y| tolerance.is_close(x, y));
    if !equal {
        trace!("array elements differ");
    }
    equal
}

/// Restricted-mode rule: an array is a sequence of its sub-arrays along
/// axis 0, down to 0-dimensional scalars.
pub(crate) fn walk_rows(
    a: ArrayViewD<'_, f64>,
    b: ArrayViewD<'_, f64>,
    tolerance: &Tolerance,
    depth: usize,
    limit: Option<usize>,
) -> Result<bool, DeepEqualError> {
    if let Some(limit) = limit {
        if depth > limit {
            debug!(limit, "comparison exceeded depth limit");
            return Err(DeepEqualError::DepthExceeded { limit });
        }
    }
    match (a.ndim(), b.ndim()) {
        (0, 0) => {
            let equal = match (a.iter().next(), b.iter().next()) {
                (Some(&x), Some(&y)) => tolerance.is_close(x, y),
                _ => false,
            };
            Ok(equal)
        }
        (0, _) | (_, 0) => {
            trace!("scalar array compared against a sequence");
            Ok(false)
        }
        _ => {
            let rows = a.len_of(Axis(0));
            if rows != b.len_of(Axis(0)) {
                trace!(left = rows, right = b.len_of(Axis(0)), "array lengths differ");
                return Ok(false);
            }
            for (x, y) in a.outer_iter().zip(b.outer_iter()) {
                if !walk_rows(x, y, tolerance, depth + 1, limit)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, ArrayD, IxDyn};

    #[test]
    fn zero_dim_arrays_compare_as_scalars() {
        let a = ArrayD::from_elem(IxDyn(&[]), 0.1 + 0.2);
        let b = ArrayD::from_elem(IxDyn(&[]), 0.3);
        let tol = Tolerance::default();
        assert!(all_close(a.view(), b.view(), &tol));
        assert!(walk_rows(a.view(), b.view(), &tol, 0, None).unwrap());
    }

    #[test]
    fn restricted_rows_reject_mismatched_nesting() {
        let a = array![[1.0], [2.0]].into_dyn();
        let b = array![1.0, 2.0].into_dyn();
        let tol = Tolerance::default();
        assert!(!walk_rows(a.view(), b.view(), &tol, 0, None).unwrap());
    }

    #[test]
    fn restricted_rows_honor_depth_limit() {
        let a = array![[1.0]].into_dyn();
        let tol = Tolerance::default();
        assert!(matches!(
            walk_rows(a.view(), a.view(), &tol, 0, Some(1)),
            Err(DeepEqualError::DepthExceeded { limit: 1 })
        ));
    }
}
