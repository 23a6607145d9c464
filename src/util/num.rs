/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `f64` to `u64` if it is a non-negative whole number
/// that fits without loss.
///
/// ## Errors
/// Returns `Err(error)` for NaN, infinities, negative values, values with a
/// fractional part, and values above `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use abapi::util::num::f64_to_u64_checked;
///
/// assert_eq!(f64_to_u64_checked(3.0, "bad"), Ok(3));
/// assert!(f64_to_u64_checked(-1.0, "bad").is_err());
/// assert!(f64_to_u64_checked(2.5, "bad").is_err());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn f64_to_u64_checked<E>(value: f64, error: E) -> Result<u64, E> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(error);
    }
    if value > MAX_SAFE_U64_INT as f64 {
        return Err(error);
    }
    Ok(value as u64)
}

/// Renders a number as canonical decimal text.
///
/// Whole numbers print without a fractional part, `-0` prints as `0`, and the
/// IEEE special values print as `Infinity`, `-Infinity` and `NaN`.
///
/// ## Example
/// ```
/// use abapi::util::num::format_number;
///
/// assert_eq!(format_number(8.0), "8");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(f64::INFINITY), "Infinity");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Rounds half away from zero to the given number of decimal places.
///
/// Large decimal counts leave the value unchanged rather than overflowing the
/// scale factor.
#[must_use]
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let Ok(exponent) = i32::try_from(decimals) else {
        return value;
    };
    let scale = 10f64.powi(exponent);
    if !scale.is_finite() {
        return value;
    }
    let rounded = (value * scale).round() / scale;
    if rounded.is_finite() { rounded } else { value }
}

/// Truncates toward zero and folds `-0` into `0`.
#[must_use]
pub fn truncate(value: f64) -> f64 {
    value.trunc() + 0.0
}
