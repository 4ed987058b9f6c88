use std::sync::LazyLock;

use regex::Regex;

use super::{ColorError, Result, Rgba};
use crate::animation::Animatable;

static SHORT_HEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#?)([0-9a-fA-F])([0-9a-fA-F])([0-9a-fA-F])([0-9a-fA-F])?$")
        .expect("short hex pattern")
});

/// Two lowercase hex digits for a byte.
pub fn to_hex(value: u8) -> String {
    format!("{:02x}", value)
}

/// Expand `#rgb` / `#rgba` to `#rrggbbaa` by doubling each digit, with `ff`
/// as the alpha when none is given. Any other input is returned unchanged.
///
/// ```
/// use gilded::color::to_long_hex;
/// assert_eq!(to_long_hex("#abc"), "#aabbccff");
/// assert_eq!(to_long_hex("#4cddca"), "#4cddca");
/// ```
pub fn to_long_hex(hex: &str) -> String {
    let Some(caps) = SHORT_HEX.captures(hex) else {
        return hex.to_string();
    };
    let alpha = caps.get(5).map_or("f", |m| m.as_str());
    let mut out = caps[1].to_string();
    for digit in [&caps[2], &caps[3], &caps[4], alpha] {
        out.push_str(digit);
        out.push_str(digit);
    }
    out
}

/// Convert a long-form hex color (6 or 8 digits) to an `rgb(...)` or
/// `rgba(...)` function. Alpha is the last byte over 255, rounded to three
/// decimals.
///
/// ```
/// use gilded::color::hex_to_rgb;
/// assert_eq!(hex_to_rgb("#4cddca").unwrap(), "rgb(76, 221, 202)");
/// assert_eq!(hex_to_rgb("4cddca80").unwrap(), "rgba(76, 221, 202, 0.502)");
/// ```
pub fn hex_to_rgb(hex: &str) -> Result<String> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 && digits.len() != 8 {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }
    Ok(parse(hex)?.to_css(false))
}

/// Interpolate between two hex colors at `t`.
///
/// Either endpoint may be short or long form. The result is `#rrggbbaa`
/// when either endpoint has an alpha digit pair, otherwise `#rrggbb`.
pub fn hex_transform(t: f64, from: &str, to: &str) -> Result<String> {
    let from = parse(from)?;
    let to = parse(to)?;
    Ok(Rgba::lerp(&from, &to, t).to_hex())
}

pub(super) fn parse(hex: &str) -> Result<Rgba> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let invalid = || ColorError::InvalidHex(hex.to_string());

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let has_alpha = match digits.len() {
        3 | 6 => false,
        4 | 8 => true,
        _ => return Err(invalid()),
    };

    let long = to_long_hex(digits);
    let byte = |i: usize| -> Result<f64> {
        u8::from_str_radix(&long[i * 2..i * 2 + 2], 16)
            .map(f64::from)
            .map_err(|_| invalid())
    };

    Ok(Rgba {
        r: byte(0)?,
        g: byte(1)?,
        b: byte(2)?,
        a: if has_alpha {
            Some(byte(3)? / 255.0)
        } else {
            None
        },
    })
}
