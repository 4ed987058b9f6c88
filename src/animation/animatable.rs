use crate::color::Rgba;
use crate::math::slide;

/// Values a frame callback can blend between: plain numbers and [`Rgba`]
/// colors.
pub trait Animatable: Clone + PartialEq + 'static {
    /// Blend `from` toward `to` by an eased progress value.
    ///
    /// `t` comes straight from an [`Easing`](super::Easing), so back and
    /// elastic curves hand in values below 0 or above 1 and the result
    /// extrapolates past the endpoints.
    fn lerp(from: &Self, to: &Self, t: f64) -> Self;
}

impl Animatable for f64 {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        slide(t, *from, *to)
    }
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        slide(t, *from as f64, *to as f64) as f32
    }
}

impl Animatable for Rgba {
    /// Channel-wise interpolation. If either endpoint carries alpha the
    /// result does too, with the alpha-less endpoint counted as opaque.
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        let a = match (from.a, to.a) {
            (None, None) => None,
            (a0, a1) => Some(slide(t, a0.unwrap_or(1.0), a1.unwrap_or(1.0))),
        };
        Rgba {
            r: slide(t, from.r, to.r),
            g: slide(t, from.g, to.g),
            b: slide(t, from.b, to.b),
            a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_lerp() {
        assert_eq!(f64::lerp(&0.0, &10.0, 0.0), 0.0);
        assert_eq!(f64::lerp(&0.0, &10.0, 0.5), 5.0);
        assert_eq!(f64::lerp(&0.0, &10.0, 1.0), 10.0);
        // Overshoot
        assert_eq!(f64::lerp(&0.0, &10.0, 1.5), 15.0);
    }

    #[test]
    fn test_f32_lerp() {
        assert_eq!(f32::lerp(&20.0, &70.0, 0.5), 45.0);
    }

    #[test]
    fn test_rgba_lerp() {
        let black = Rgba::rgb(0.0, 0.0, 0.0);
        let white = Rgba::rgb(255.0, 255.0, 255.0);
        let mid = Rgba::lerp(&black, &white, 0.5);
        assert_eq!(mid.r, 127.5);
        assert_eq!(mid.g, 127.5);
        assert_eq!(mid.b, 127.5);
        assert_eq!(mid.a, None);
    }

    #[test]
    fn test_rgba_lerp_upgrades_alpha() {
        let opaque = Rgba::rgb(0.0, 0.0, 0.0);
        let faded = Rgba::rgba(0.0, 0.0, 0.0, 0.5);
        assert_eq!(Rgba::lerp(&opaque, &faded, 0.5).a, Some(0.75));
        assert_eq!(Rgba::lerp(&faded, &opaque, 1.0).a, Some(1.0));
    }
}
