/// Asserts that two values are [`deep_equal`](crate::deep_equal).
///
/// Both operands are converted with `Into<Value>`, so they are taken by
/// value. Tolerances default to [`DEFAULT_REL_TOL`](crate::DEFAULT_REL_TOL)
/// and [`DEFAULT_ABS_TOL`](crate::DEFAULT_ABS_TOL).
///
/// ```
/// use bcb_deep_equal::assert_deep_equal;
///
/// assert_deep_equal!(vec![0.1 + 0.2, 1.0], vec![0.3, 1.0]);
/// assert_deep_equal!(100.0, 101.0, rel_tol = 0.02, abs_tol = 0.0);
/// ```
#[macro_export]
macro_rules! assert_deep_equal {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_deep_equal!(
            $left,
            $right,
            rel_tol = $crate::DEFAULT_REL_TOL,
            abs_tol = $crate::DEFAULT_ABS_TOL
        )
    };
    ($left:expr, $right:expr, rel_tol = $rel:expr, abs_tol = $abs:expr $(,)?) => {{
        let left: $crate::Value = ::core::convert::Into::into($left);
        let right: $crate::Value = ::core::convert::Into::into($right);
        if !$crate::deep_equal(&left, &right, $rel, $abs) {
            ::core::panic!(
                "assertion `left ~= right` failed\n  left: {:?}\n right: {:?}",
                left,
                right
            );
        }
    }};
}
