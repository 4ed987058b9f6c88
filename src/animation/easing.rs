//! Easing curves for transitions.
//!
//! Every curve maps a normalized progress value `t` in [0, 1] to an eased
//! value. Most curves satisfy `f(0) == 0` and `f(1) == 1`; the exponential
//! and elastic curves reach those boundaries through explicit overrides.
//! [`ease_out_elastic`] overshoots past 1 before settling.
//!
//! ## Example
//!
//! ```
//! use gilded::animation::Easing;
//!
//! let eased = Easing::OutQuad.evaluate(0.5);
//! assert_eq!(eased, 0.75);
//!
//! let bounce: Easing = "easeOutBounce".parse().unwrap();
//! assert_eq!(bounce.evaluate(1.0), 1.0);
//! ```

use std::f64::consts::PI;
use std::rc::Rc;
use std::str::FromStr;

use thiserror::Error;

// ease_out_elastic
const C4: f64 = (2.0 * PI) / 3.0;
// ease_out_bounce
const N1: f64 = 7.5625;
const D1: f64 = 2.75;

pub fn ease_in_quad(t: f64) -> f64 {
    t * t
}

pub fn ease_in_cubic(t: f64) -> f64 {
    t * t * t
}

pub fn ease_in_quart(t: f64) -> f64 {
    t * t * t * t
}

pub fn ease_in_quint(t: f64) -> f64 {
    t * t * t * t * t
}

pub fn ease_in_circ(t: f64) -> f64 {
    1.0 - (1.0 - t.powi(2)).sqrt()
}

pub fn ease_in_expo(t: f64) -> f64 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        2f64.powf(10.0 * t - 10.0)
    }
}

pub fn ease_out_quad(t: f64) -> f64 {
    t * (2.0 - t)
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let u = t - 1.0;
    u * u * u + 1.0
}

pub fn ease_out_quart(t: f64) -> f64 {
    let u = t - 1.0;
    1.0 - u * u * u * u
}

pub fn ease_out_quint(t: f64) -> f64 {
    let u = t - 1.0;
    1.0 + u * u * u * u * u
}

pub fn ease_out_circ(t: f64) -> f64 {
    (1.0 - (t - 1.0).powi(2)).sqrt()
}

pub fn ease_out_expo(t: f64) -> f64 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}

pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
    }
}

pub fn ease_in_out_quart(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        let u = t - 1.0;
        1.0 - 8.0 * u * u * u * u
    }
}

pub fn ease_in_out_quint(t: f64) -> f64 {
    if t < 0.5 {
        16.0 * t * t * t * t * t
    } else {
        let u = t - 1.0;
        1.0 + 16.0 * u * u * u * u * u
    }
}

pub fn ease_in_out_circ(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
    }
}

pub fn ease_in_out_expo(t: f64) -> f64 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else if t < 0.5 {
        2f64.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
    }
}

/// Damped sine that overshoots 1 before settling.
pub fn ease_out_elastic(t: f64) -> f64 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
    }
}

/// Four parabolic segments, each bounce smaller than the last.
pub fn ease_out_bounce(t: f64) -> f64 {
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let u = t - 1.5 / D1;
        N1 * u * u + 0.75
    } else if t < 2.5 / D1 {
        let u = t - 2.25 / D1;
        N1 * u * u + 0.9375
    } else {
        let u = t - 2.625 / D1;
        N1 * u * u + 0.984375
    }
}

/// Returned when an easing name does not match any built-in curve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown easing function: {0}")]
pub struct UnknownEasing(pub String);

/// Easing curve applied to a transition's progress
#[derive(Clone, Default)]
pub enum Easing {
    /// Identity, `t -> t`
    #[default]
    Linear,
    InQuad,
    InCubic,
    InQuart,
    InQuint,
    InCirc,
    InExpo,
    OutQuad,
    OutCubic,
    OutQuart,
    OutQuint,
    OutCirc,
    OutExpo,
    InOutQuad,
    InOutCubic,
    InOutQuart,
    InOutQuint,
    InOutCirc,
    InOutExpo,
    OutElastic,
    OutBounce,
    /// User-defined curve
    Custom(Rc<dyn Fn(f64) -> f64>),
}

impl Easing {
    /// The 20 named curves, in table order.
    pub const NAMED: [Easing; 20] = [
        Easing::InQuad,
        Easing::InCubic,
        Easing::InQuart,
        Easing::InQuint,
        Easing::InCirc,
        Easing::InExpo,
        Easing::OutQuad,
        Easing::OutCubic,
        Easing::OutQuart,
        Easing::OutQuint,
        Easing::OutCirc,
        Easing::OutExpo,
        Easing::InOutQuad,
        Easing::InOutCubic,
        Easing::InOutQuart,
        Easing::InOutQuint,
        Easing::InOutCirc,
        Easing::InOutExpo,
        Easing::OutElastic,
        Easing::OutBounce,
    ];

    /// Evaluate the curve at progress `t`.
    /// The result can leave [0, 1] for overshooting curves.
    pub fn evaluate(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::InQuad => ease_in_quad(t),
            Easing::InCubic => ease_in_cubic(t),
            Easing::InQuart => ease_in_quart(t),
            Easing::InQuint => ease_in_quint(t),
            Easing::InCirc => ease_in_circ(t),
            Easing::InExpo => ease_in_expo(t),
            Easing::OutQuad => ease_out_quad(t),
            Easing::OutCubic => ease_out_cubic(t),
            Easing::OutQuart => ease_out_quart(t),
            Easing::OutQuint => ease_out_quint(t),
            Easing::OutCirc => ease_out_circ(t),
            Easing::OutExpo => ease_out_expo(t),
            Easing::InOutQuad => ease_in_out_quad(t),
            Easing::InOutCubic => ease_in_out_cubic(t),
            Easing::InOutQuart => ease_in_out_quart(t),
            Easing::InOutQuint => ease_in_out_quint(t),
            Easing::InOutCirc => ease_in_out_circ(t),
            Easing::InOutExpo => ease_in_out_expo(t),
            Easing::OutElastic => ease_out_elastic(t),
            Easing::OutBounce => ease_out_bounce(t),
            Easing::Custom(f) => f(t),
        }
    }

    /// Create a custom easing from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + 'static,
    {
        Easing::Custom(Rc::new(f))
    }

    /// The camelCase name of the curve, e.g. `"easeInOutCubic"`.
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::InQuad => "easeInQuad",
            Easing::InCubic => "easeInCubic",
            Easing::InQuart => "easeInQuart",
            Easing::InQuint => "easeInQuint",
            Easing::InCirc => "easeInCirc",
            Easing::InExpo => "easeInExpo",
            Easing::OutQuad => "easeOutQuad",
            Easing::OutCubic => "easeOutCubic",
            Easing::OutQuart => "easeOutQuart",
            Easing::OutQuint => "easeOutQuint",
            Easing::OutCirc => "easeOutCirc",
            Easing::OutExpo => "easeOutExpo",
            Easing::InOutQuad => "easeInOutQuad",
            Easing::InOutCubic => "easeInOutCubic",
            Easing::InOutQuart => "easeInOutQuart",
            Easing::InOutQuint => "easeInOutQuint",
            Easing::InOutCirc => "easeInOutCirc",
            Easing::InOutExpo => "easeInOutExpo",
            Easing::OutElastic => "easeOutElastic",
            Easing::OutBounce => "easeOutBounce",
            Easing::Custom(_) => "custom",
        }
    }
}

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "linear" {
            return Ok(Easing::Linear);
        }
        Easing::NAMED
            .iter()
            .find(|easing| easing.name() == s)
            .cloned()
            .ok_or_else(|| UnknownEasing(s.to_string()))
    }
}

impl std::fmt::Debug for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Easing::Custom(_) => write!(f, "Custom"),
            named => write!(f, "{}", named.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_boundaries() {
        for easing in Easing::NAMED.iter() {
            assert!(
                approx(easing.evaluate(0.0), 0.0),
                "{} at 0 was {}",
                easing.name(),
                easing.evaluate(0.0)
            );
            assert!(
                approx(easing.evaluate(1.0), 1.0),
                "{} at 1 was {}",
                easing.name(),
                easing.evaluate(1.0)
            );
        }
    }

    #[test]
    fn test_expo_and_elastic_boundaries_are_exact() {
        for f in [ease_in_expo, ease_out_expo, ease_in_out_expo, ease_out_elastic] {
            assert_eq!(f(0.0), 0.0);
            assert_eq!(f(1.0), 1.0);
        }
    }

    #[test]
    fn test_midpoints() {
        assert_eq!(ease_in_quad(0.5), 0.25);
        assert_eq!(ease_in_cubic(0.5), 0.125);
        assert_eq!(ease_in_quart(0.5), 0.0625);
        assert_eq!(ease_in_quint(0.5), 0.03125);
        assert_eq!(ease_out_quad(0.5), 0.75);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_quart(0.5), 0.9375);
        assert_eq!(ease_out_quint(0.5), 0.96875);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_quart(0.5), 0.5);
        assert_eq!(ease_in_out_quint(0.5), 0.5);
        assert!(approx(ease_in_out_circ(0.5), 0.5));
        assert!(approx(ease_in_out_expo(0.5), 0.5));
        assert!(approx(ease_in_expo(0.5), 2f64.powi(-5)));
        assert!(approx(ease_out_expo(0.5), 1.0 - 2f64.powi(-5)));
    }

    #[test]
    fn test_circ() {
        assert!(approx(ease_in_circ(0.5), 1.0 - 0.75f64.sqrt()));
        assert!(approx(ease_out_circ(0.5), 0.75f64.sqrt()));
    }

    #[test]
    fn test_elastic_overshoots() {
        let max = (1..100)
            .map(|i| ease_out_elastic(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(max > 1.0, "elastic should overshoot, max was {}", max);
    }

    #[test]
    fn test_bounce_segments_are_continuous() {
        for boundary in [1.0 / D1, 2.0 / D1, 2.5 / D1] {
            let before = ease_out_bounce(boundary - 1e-9);
            let at = ease_out_bounce(boundary);
            assert!(
                (before - at).abs() < 1e-6,
                "discontinuity at {}: {} vs {}",
                boundary,
                before,
                at
            );
        }
    }

    #[test]
    fn test_bounce_segment_values() {
        assert!(approx(ease_out_bounce(1.0 / D1), 1.0));
        assert!(approx(ease_out_bounce(1.5 / D1), 0.75));
        assert!(approx(ease_out_bounce(2.25 / D1), 0.9375));
        assert!(approx(ease_out_bounce(2.625 / D1), 0.984375));
    }

    #[test]
    fn test_linear_is_identity() {
        assert_eq!(Easing::Linear.evaluate(0.3), 0.3);
        assert_eq!(Easing::default().evaluate(0.7), 0.7);
    }

    #[test]
    fn test_custom() {
        let easing = Easing::custom(|t| 1.0 - t);
        assert_eq!(easing.evaluate(0.25), 0.75);
        assert_eq!(format!("{:?}", easing), "Custom");
    }

    #[test]
    fn test_name_round_trip() {
        for easing in Easing::NAMED.iter() {
            let parsed: Easing = easing.name().parse().unwrap();
            assert_eq!(parsed.name(), easing.name());
        }
        assert_eq!("linear".parse::<Easing>().unwrap().name(), "linear");
    }

    #[test]
    fn test_unknown_name() {
        let err = "easeSideways".parse::<Easing>().unwrap_err();
        assert_eq!(err, UnknownEasing("easeSideways".into()));
    }
}
