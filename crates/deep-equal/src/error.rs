//! Error type for the fallible corners of the crate.
//!
//! A mismatch between two values is never an error; it is a `false` result.

use thiserror::Error;

use crate::value::Key;

#[derive(Debug, Error)]
pub enum DeepEqualError {
    #[error("invalid tolerance rel_tol={rel_tol}, abs_tol={abs_tol}: must be non-negative and not NaN")]
    InvalidTolerance { rel_tol: f64, abs_tol: f64 },
    #[error("comparison exceeded maximum nesting depth of {limit}")]
    DepthExceeded { limit: usize },
    #[error("non-finite float {0} has no JSON representation")]
    NonFiniteFloat(f64),
    #[error("map key {0:?} has no JSON representation")]
    UnsupportedKey(Key),
    #[error("invalid tolerance config: {0}")]
    Config(#[from] serde_json::Error),
}
