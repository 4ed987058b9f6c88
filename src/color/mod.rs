//! Color codecs and interpolation for CSS color strings.
//!
//! Two text encodings are understood:
//!
//! - hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (the `#` is optional)
//! - functional: `rgb(r, g, b)` and `rgba(r, g, b, a)`
//!
//! Both parse into [`Rgba`]. Parse failures are reported as [`ColorError`].

mod hex;
mod rgb;

pub use hex::{hex_to_rgb, hex_transform, to_hex, to_long_hex};
pub use rgb::{rgb_to_hex, rgb_transform};

use thiserror::Error;

use crate::math::clamp;

pub type Result<T> = std::result::Result<T, ColorError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
    #[error("invalid rgb color: {0:?}")]
    InvalidRgb(String),
    #[error("{channel} channel out of range: {value}")]
    ChannelOutOfRange { channel: &'static str, value: f64 },
}

/// A parsed color.
///
/// `r`, `g` and `b` are in 0..=255, `a` in 0..=1. `a` is `None` when the
/// source text had no alpha component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: Option<f64>,
}

impl Rgba {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: Some(a),
        }
    }

    /// Parse a short or long hex color, with or without `#`.
    pub fn from_hex(s: &str) -> Result<Self> {
        hex::parse(s)
    }

    /// Parse an `rgb(...)` or `rgba(...)` function.
    pub fn from_css(s: &str) -> Result<Self> {
        rgb::parse(s).map(|(color, _)| color)
    }

    /// `#rrggbb`, or `#rrggbbaa` when the color has alpha.
    pub fn to_hex(&self) -> String {
        let mut out = format!(
            "#{}{}{}",
            to_hex(channel_byte(self.r)),
            to_hex(channel_byte(self.g)),
            to_hex(channel_byte(self.b))
        );
        if let Some(a) = self.a {
            out.push_str(&to_hex(alpha_byte(a)));
        }
        out
    }

    /// `rgb(r, g, b)`, or `rgba(r, g, b, a)` when the color has alpha or
    /// `force_alpha` is set. Missing alpha prints as `1`.
    pub fn to_css(&self, force_alpha: bool) -> String {
        let (r, g, b) = (
            channel_byte(self.r),
            channel_byte(self.g),
            channel_byte(self.b),
        );
        match (self.a, force_alpha) {
            (None, false) => format!("rgb({}, {}, {})", r, g, b),
            (a, _) => format!(
                "rgba({}, {}, {}, {})",
                r,
                g,
                b,
                format_alpha(a.unwrap_or(1.0))
            ),
        }
    }
}

/// Round and clamp a 0..=255 channel.
fn channel_byte(value: f64) -> u8 {
    clamp(0.0, value.round(), 255.0) as u8
}

fn alpha_byte(alpha: f64) -> u8 {
    channel_byte(alpha * 255.0)
}

/// Alpha rounded to three decimals, without trailing zeros.
fn format_alpha(alpha: f64) -> String {
    let rounded = (clamp(0.0, alpha, 1.0) * 1000.0).round() / 1000.0;
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_output() {
        assert_eq!(Rgba::rgb(76.0, 221.0, 202.0).to_hex(), "#4cddca");
        assert_eq!(Rgba::rgba(0.0, 0.0, 0.0, 0.5).to_hex(), "#00000080");
        // Out-of-range channels clamp
        assert_eq!(Rgba::rgb(-20.0, 300.0, 127.5).to_hex(), "#00ff80");
    }

    #[test]
    fn test_to_css_output() {
        let color = Rgba::rgb(1.0, 2.0, 3.0);
        assert_eq!(color.to_css(false), "rgb(1, 2, 3)");
        assert_eq!(color.to_css(true), "rgba(1, 2, 3, 1)");
        assert_eq!(
            Rgba::rgba(1.0, 2.0, 3.0, 0.25).to_css(false),
            "rgba(1, 2, 3, 0.25)"
        );
    }

    #[test]
    fn test_format_alpha() {
        assert_eq!(format_alpha(128.0 / 255.0), "0.502");
        assert_eq!(format_alpha(1.0), "1");
        assert_eq!(format_alpha(0.0), "0");
        assert_eq!(format_alpha(0.75), "0.75");
    }

    #[test]
    fn test_error_messages() {
        let err = ColorError::ChannelOutOfRange {
            channel: "red",
            value: 300.0,
        };
        assert_eq!(err.to_string(), "red channel out of range: 300");
        assert_eq!(
            ColorError::InvalidHex("#zz".into()).to_string(),
            "invalid hex color: \"#zz\""
        );
    }
}
