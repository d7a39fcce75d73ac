//! Result normalization for display.

/// Fractional digits kept for non-integer results
pub const MAX_FRACTION_DIGITS: usize = 8;

/// Render a finite result for the display.
///
/// Integers render without a fractional part. Anything else is rounded to
/// [`MAX_FRACTION_DIGITS`] and trailing zeros (and a dangling `.`) are removed.
///
/// ```rust
/// use calc_core::expression::format::format_result;
///
/// assert_eq!(format_result(2.0), "2");
/// assert_eq!(format_result(1.0 / 3.0), "0.33333333");
/// assert_eq!(format_result(0.1 + 0.2), "0.3");
/// ```
pub fn format_result(value: f64) -> String {
    if value.fract() == 0.0 {
        // Folds -0 into 0
        let value = if value == 0.0 { 0.0 } else { value };
        return format!("{value}");
    }

    let rounded = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
