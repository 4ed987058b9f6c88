//! Easing curves, frame pacing and transitions.

mod animatable;
pub mod easing;
mod frame;
mod transition;

pub use animatable::Animatable;
pub use easing::{Easing, UnknownEasing};
pub use frame::{FrameCallback, FrameQueue, FrameScheduler};
pub use transition::{
    transition, Completion, FrameFn, Transition, TransitionArg, TransitionError,
};
