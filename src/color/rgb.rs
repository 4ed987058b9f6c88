use std::sync::LazyLock;

use regex::Regex;

use super::{ColorError, Result, Rgba};
use crate::animation::Animatable;

static RGB_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(rgba?)\s*\(\s*([^,\s()]+)\s*,\s*([^,\s()]+)\s*,\s*([^,\s()]+)\s*(?:,\s*([^,\s()]+)\s*)?\)\s*$",
    )
    .expect("rgb function pattern")
});

/// Convert an `rgb(...)` / `rgba(...)` function to `#rrggbb` or
/// `#rrggbbaa`. Alpha maps to `round(a * 255)`.
///
/// ```
/// use gilded::color::rgb_to_hex;
/// assert_eq!(rgb_to_hex("rgb(76, 221, 202)").unwrap(), "#4cddca");
/// assert_eq!(rgb_to_hex("rgba(76,221,202,0.5)").unwrap(), "#4cddca80");
/// ```
pub fn rgb_to_hex(s: &str) -> Result<String> {
    Ok(parse(s)?.0.to_hex())
}

/// Interpolate between two `rgb(...)` / `rgba(...)` functions at `t`.
///
/// The output is `rgba(...)` when either endpoint is written as `rgba` or
/// carries an alpha component; a missing alpha counts as 1.
pub fn rgb_transform(t: f64, from: &str, to: &str) -> Result<String> {
    let (from, from_rgba) = parse(from)?;
    let (to, to_rgba) = parse(to)?;
    Ok(Rgba::lerp(&from, &to, t).to_css(from_rgba || to_rgba))
}

/// Returns the color and whether the function was spelled `rgba`.
pub(super) fn parse(s: &str) -> Result<(Rgba, bool)> {
    let caps = RGB_FN
        .captures(s)
        .ok_or_else(|| ColorError::InvalidRgb(s.to_string()))?;

    let number = |i: usize| -> Result<f64> {
        caps[i]
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| ColorError::InvalidRgb(s.to_string()))
    };
    let channel = |i: usize, name: &'static str| -> Result<f64> {
        let value = number(i)?;
        if !(0.0..=255.0).contains(&value) {
            Err(ColorError::ChannelOutOfRange {
                channel: name,
                value,
            })
        } else if value.fract() != 0.0 {
            Err(ColorError::InvalidRgb(s.to_string()))
        } else {
            Ok(value)
        }
    };

    let a = match caps.get(5) {
        Some(_) => {
            let value = number(5)?;
            if !(0.0..=1.0).contains(&value) {
                return Err(ColorError::ChannelOutOfRange {
                    channel: "alpha",
                    value,
                });
            }
            Some(value)
        }
        None => None,
    };
    let color = Rgba {
        r: channel(2, "red")?,
        g: channel(3, "green")?,
        b: channel(4, "blue")?,
        a,
    };
    Ok((color, caps[1].eq_ignore_ascii_case("rgba")))
}
