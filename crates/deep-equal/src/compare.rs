//! Recursive tolerance-aware comparison.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::DeepEqualError;
use crate::tolerance::Tolerance;
use crate::value::{Key, Value};

/// Which comparator variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Numeric arrays compare elementwise under tolerance, by shape.
    #[default]
    Full,
    /// No array rule: arrays are walked as sequences along their outer axis.
    Restricted,
}

/// Configured comparator.
///
/// ```
/// use bcb_deep_equal::{Comparator, Tolerance, Value};
///
/// let cmp = Comparator::new(Tolerance::default()).with_max_depth(8);
/// let a = Value::list([0.1 + 0.2, 0.3 + 0.4]);
/// let b = Value::list([0.3, 0.7]);
/// assert!(cmp.try_equal(&a, &b).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Comparator {
    tolerance: Tolerance,
    mode: Mode,
    max_depth: Option<usize>,
}

impl Comparator {
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            mode: Mode::Full,
            max_depth: None,
        }
    }

    pub fn restricted(tolerance: Tolerance) -> Self {
        Self::new(tolerance).with_mode(Mode::Restricted)
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Limits nesting depth for [`Comparator::try_equal`]. The top-level
    /// pair is depth 0.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Compares without a depth limit. `max_depth` is not consulted.
    pub fn equal(&self, a: &Value, b: &Value) -> bool {
        matches!(self.walk(a, b, 0, None), Ok(true))
    }

    /// Compares honoring `max_depth`, failing with
    /// [`DeepEqualError::DepthExceeded`] rather than giving a verdict on
    /// input nested past the limit.
    pub fn try_equal(&self, a: &Value, b: &Value) -> Result<bool, DeepEqualError> {
        self.walk(a, b, 0, self.max_depth)
    }

    fn walk(
        &self,
        a: &Value,
        b: &Value,
        depth: usize,
        limit: Option<usize>,
    ) -> Result<bool, DeepEqualError> {
        if let Some(limit) = limit {
            if depth > limit {
                debug!(limit, "comparison exceeded depth limit");
                return Err(DeepEqualError::DepthExceeded { limit });
            }
        }
        let tol = &self.tolerance;
        let equal = match (a, b) {
            _ if a.is_nan() && b.is_nan() => true,
            (Value::Float(x), Value::Float(y)) => tol.is_close(*x, *y),
            (Value::Int(x), Value::Int(y)) => tol.is_close_int(*x, *y),
            (Value::Int(x), Value::Float(y)) => tol.is_close(*x as f64, *y),
            (Value::Float(x), Value::Int(y)) => tol.is_close(*x, *y as f64),
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::List(xs), Value::List(ys)) => {
                return self.sequence(xs, ys, depth, limit);
            }
            (Value::Map(xs), Value::Map(ys)) => {
                return self.mapping(xs, ys, depth, limit);
            }
            (Value::Set(xs), Value::Set(ys)) => {
                return self.set(xs, ys, depth, limit);
            }
            #[cfg(feature = "ndarray")]
            (Value::Array(x), Value::Array(y)) => {
                return match self.mode {
                    Mode::Full => Ok(crate::array::all_close(x.view(), y.view(), tol)),
                    Mode::Restricted => {
                        crate::array::walk_rows(x.view(), y.view(), tol, depth, limit)
                    }
                };
            }
            (Value::None, Value::None) => true,
            (Value::Str(x), Value::Str(y)) => x == y,
            (Value::Bytes(x), Value::Bytes(y)) => x == y,
            _ => {
                trace!(left = %a.kind(), right = %b.kind(), "value kinds differ");
                return Ok(false);
            }
        };
        if !equal {
            if a.is_numeric() && b.is_numeric() {
                trace!(left = ?a, right = ?b, "numbers outside tolerance");
            } else {
                trace!(kind = %a.kind(), "leaf values differ");
            }
        }
        Ok(equal)
    }

    fn sequence(
        &self,
        xs: &[Value],
        ys: &[Value],
        depth: usize,
        limit: Option<usize>,
    ) -> Result<bool, DeepEqualError> {
        if xs.len() != ys.len() {
            trace!(left = xs.len(), right = ys.len(), "sequence lengths differ");
            return Ok(false);
        }
        for (x, y) in xs.iter().zip(ys) {
            if !self.walk(x, y, depth + 1, limit)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn mapping(
        &self,
        xs: &IndexMap<Key, Value>,
        ys: &IndexMap<Key, Value>,
        depth: usize,
        limit: Option<usize>,
    ) -> Result<bool, DeepEqualError> {
        if xs.len() != ys.len() {
            trace!(left = xs.len(), right = ys.len(), "mapping sizes differ");
            return Ok(false);
        }
        for (key, x) in xs {
            match ys.get(key) {
                Some(y) => {
                    if !self.walk(x, y, depth + 1, limit)? {
                        return Ok(false);
                    }
                }
                None => {
                    trace!(key = ?key, "mapping key missing on one side");
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Sets are equal when their elements pair up one-to-one under the
    /// recursive rule.
    fn set(
        &self,
        xs: &[Value],
        ys: &[Value],
        depth: usize,
        limit: Option<usize>,
    ) -> Result<bool, DeepEqualError> {
        if xs.len() != ys.len() {
            trace!(left = xs.len(), right = ys.len(), "set sizes differ");
            return Ok(false);
        }
        let mut adjacency = Vec::with_capacity(xs.len());
        for x in xs {
            let mut row = Vec::with_capacity(ys.len());
            for y in ys {
                row.push(self.walk(x, y, depth + 1, limit)?);
            }
            if !row.contains(&true) {
                trace!("set element has no counterpart");
                return Ok(false);
            }
            adjacency.push(row);
        }
        let matched = has_perfect_matching(&adjacency);
        if !matched {
            trace!("set elements cannot be paired one-to-one");
        }
        Ok(matched)
    }
}

/// Kuhn's augmenting-path matching over a square adjacency matrix.
fn has_perfect_matching(adjacency: &[Vec<bool>]) -> bool {
    let n = adjacency.len();
    let mut owner: Vec<Option<usize>> = vec![None; n];
    for left in 0..n {
        let mut seen = vec![false; n];
        if !augment(adjacency, left, &mut seen, &mut owner) {
            return false;
        }
    }
    true
}

fn augment(
    adjacency: &[Vec<bool>],
    left: usize,
    seen: &mut [bool],
    owner: &mut [Option<usize>],
) -> bool {
    for right in 0..adjacency.len() {
        if !adjacency[left][right] || seen[right] {
            continue;
        }
        seen[right] = true;
        let free = match owner[right] {
            None => true,
            Some(other) => augment(adjacency, other, seen, owner),
        };
        if free {
            owner[right] = Some(left);
            return true;
        }
    }
    false
}
