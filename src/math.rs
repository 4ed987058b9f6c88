//! Scalar helpers shared by the color and animation modules.

use rand::Rng;

/// Returns a uniformly distributed integer in `[min, max]` (inclusive).
///
/// Reversed bounds are swapped instead of panicking.
pub fn rand(min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rand::rng().random_range(lo..=hi)
}

/// Arithmetic mean of `numbers`. An empty slice yields `NaN`.
pub fn avg(numbers: &[f64]) -> f64 {
    numbers.iter().sum::<f64>() / numbers.len() as f64
}

/// Caps `value` to the range `[min, max]`.
///
/// ```
/// use gilded::math::clamp;
/// assert_eq!(clamp(0.0, -5.0, 10.0), 0.0);
/// assert_eq!(clamp(0.0, 15.0, 10.0), 10.0);
/// ```
pub fn clamp(min: f64, value: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation from `from` to `to` at `t`.
/// `t` outside [0, 1] extrapolates.
pub fn slide(t: f64, from: f64, to: f64) -> f64 {
    from + (to - from) * t
}
