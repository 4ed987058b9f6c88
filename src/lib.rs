//! Easing curves, color math and frame-driven transitions.
//!
//! The centerpiece is [`animation::Transition`]: a run driven by an injected
//! [`animation::FrameScheduler`] that reports eased progress every frame and
//! resolves a [`animation::Completion`] either at the end or, with an
//! overlap, early enough for the next transition to start while this one
//! finishes.

pub mod animation;
pub mod color;
pub mod css;
pub mod math;

pub mod prelude {
    pub use crate::animation::{
        transition, Animatable, Completion, Easing, FrameQueue, FrameScheduler, Transition,
        TransitionArg, TransitionError,
    };
    pub use crate::color::{
        hex_to_rgb, hex_transform, rgb_to_hex, rgb_transform, ColorError, Rgba,
    };
    pub use crate::css::{set_transform, TransformFunction};
    pub use crate::math::{avg, clamp, rand, slide};
}
