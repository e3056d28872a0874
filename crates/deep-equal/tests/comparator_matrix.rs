//! Comparator configuration: modes, depth limits and tolerance config.

use bcb_deep_equal::{Comparator, DeepEqualError, Mode, Tolerance, Value};

fn nested(depth: usize) -> Value {
    let mut v = Value::from(0.1 + 0.2);
    for _ in 0..depth {
        v = Value::list([v]);
    }
    v
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[test]
fn default_comparator() {
    let cmp = Comparator::default();
    assert_eq!(cmp.mode(), Mode::Full);
    assert_eq!(cmp.max_depth(), None);
    assert_eq!(cmp.tolerance(), Tolerance::default());
}

#[test]
fn restricted_constructor() {
    let cmp = Comparator::restricted(Tolerance::exact());
    assert_eq!(cmp.mode(), Mode::Restricted);
    assert_eq!(cmp.tolerance().rel_tol(), 0.0);
    assert_eq!(cmp.with_mode(Mode::Full).mode(), Mode::Full);
}

// ---------------------------------------------------------------------------
// Depth limits
// ---------------------------------------------------------------------------

#[test]
fn within_depth_limit() {
    let cmp = Comparator::default().with_max_depth(10);
    assert!(cmp.try_equal(&nested(10), &nested(10)).unwrap());
}

#[test]
fn past_depth_limit_is_an_error() {
    let cmp = Comparator::default().with_max_depth(10);
    let err = cmp.try_equal(&nested(11), &nested(11)).unwrap_err();
    assert!(matches!(err, DeepEqualError::DepthExceeded { limit: 10 }));
    assert_eq!(
        err.to_string(),
        "comparison exceeded maximum nesting depth of 10"
    );
}

#[test]
fn depth_limit_inside_sets_and_maps() {
    let cmp = Comparator::default().with_max_depth(1);
    let set = Value::set([Value::list([1])]);
    let map = Value::map([("a", Value::list([1]))]);
    assert!(cmp.try_equal(&set, &set).is_err());
    assert!(cmp.try_equal(&map, &map).is_err());
}

#[test]
fn equal_ignores_depth_limit() {
    let cmp = Comparator::default().with_max_depth(2);
    let a = nested(200);
    let b = nested(200);
    assert!(cmp.equal(&a, &b));
}

// ---------------------------------------------------------------------------
// Tolerance config
// ---------------------------------------------------------------------------

#[test]
fn tolerance_from_json_with_defaults() {
    let tol = Tolerance::from_json_str(r#"{"rel_tol": 1e-6}"#).unwrap();
    assert_eq!(tol.rel_tol(), 1e-6);
    assert_eq!(tol.abs_tol(), 1e-9);
    assert_eq!(Tolerance::from_json_str("{}").unwrap(), Tolerance::default());
}

#[test]
fn tolerance_from_json_rejects_negative() {
    let err = Tolerance::from_json_str(r#"{"abs_tol": -1.0}"#).unwrap_err();
    assert!(matches!(err, DeepEqualError::Config(_)));
    assert!(err.to_string().contains("must be non-negative"));
}

#[test]
fn tolerance_from_json_rejects_unknown_fields() {
    assert!(Tolerance::from_json_str(r#"{"tol": 1.0}"#).is_err());
}

#[derive(serde::Deserialize)]
struct HarnessConfig {
    tolerance: Tolerance,
}

#[test]
fn tolerance_inside_toml_config() {
    let config: HarnessConfig = toml::from_str(
        r#"
        [tolerance]
        rel_tol = 1e-7
        abs_tol = 1e-12
        "#,
    )
    .unwrap();
    assert_eq!(config.tolerance, Tolerance::new(1e-7, 1e-12).unwrap());
}

#[test]
fn tolerance_serializes_field_names() {
    let json = serde_json::to_value(Tolerance::default()).unwrap();
    assert_eq!(json, serde_json::json!({"rel_tol": 1e-9, "abs_tol": 1e-9}));
}

#[test]
fn invalid_tolerance_message() {
    let err = Tolerance::new(-0.5, 0.0).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid tolerance rel_tol=-0.5, abs_tol=0: must be non-negative and not NaN"
    );
}

#[test]
fn nan_tolerance_message() {
    let err = Tolerance::new(0.0, f64::NAN).unwrap_err();
    assert!(matches!(err, DeepEqualError::InvalidTolerance { .. }));
    assert_eq!(
        err.to_string(),
        "invalid tolerance rel_tol=0, abs_tol=NaN: must be non-negative and not NaN"
    );
}
