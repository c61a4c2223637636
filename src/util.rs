/// Asserts that an integer value lies in the half-open range `[a,b)` and panics
/// with a helpful message if not
///
/// ### Example
/// ```ignore
/// let row = 7;
/// assert_domain!(row, 0, 5);
/// ```
/// This will panic with the message "Value 7 for \`row\` is out of domain. Must be in the range \[0, 5)."
#[macro_export]
macro_rules! assert_domain {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            ($a..$b).contains(&$var),
            "Value {} for `{}` is out of domain. Must be in the range [{}, {}).",
            $var,
            stringify!($var),
            $a,
            $b,
        );
    };
}
