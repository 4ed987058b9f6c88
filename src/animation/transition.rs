//! Frame-driven transitions with optional early completion.
//!
//! A [`Transition`] describes one run: its duration, an optional overlap and
//! an easing curve. [`Transition::run`] hands back a [`Completion`] right away
//! and does all of its work inside frame callbacks from a [`FrameScheduler`].
//!
//! Each frame the run computes `progress = min(elapsed / duration, 1)` and
//! calls the frame callback with `easing(progress)`. The completion fires
//! once: at the first frame whose elapsed time reaches `overlap` when an
//! overlap is set, otherwise at the frame where progress reaches 1. Starting
//! the next transition from an early completion lets the two overlap on
//! screen while the first one's tail plays out.
//!
//! ## Example
//!
//! ```
//! use gilded::animation::{Easing, FrameQueue, Transition};
//!
//! let frames = FrameQueue::new();
//! let completion = Transition::new(100.0)
//!     .overlap(50.0)
//!     .easing(Easing::OutCubic)
//!     .run(&frames, |t| println!("opacity {t}"))
//!     .unwrap();
//!
//! frames.tick(0.0);
//! frames.tick(60.0);
//! assert!(completion.is_resolved());
//! ```

use std::cell::RefCell;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use thiserror::Error;

use super::easing::Easing;
use super::frame::FrameScheduler;
use crate::math::clamp;

/// Per-frame callback receiving the eased progress.
pub type FrameFn = Box<dyn FnMut(f64)>;

pub type Result<T> = std::result::Result<T, TransitionError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    #[error("invalid transition arguments: {0}")]
    InvalidArgument(String),
    #[error("transition was cancelled")]
    Cancelled,
    #[error("transition frame panicked: {0}")]
    FramePanicked(String),
}

/// Configuration for a single transition run
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the run in milliseconds
    pub duration_ms: f64,
    /// Elapsed time in milliseconds at which the completion fires early.
    /// 0 disables early completion.
    pub overlap_ms: f64,
    /// Curve applied to the raw progress before it reaches the callback
    pub easing: Easing,
}

impl Transition {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            overlap_ms: 0.0,
            easing: Easing::Linear,
        }
    }

    pub fn duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn overlap(mut self, overlap_ms: f64) -> Self {
        self.overlap_ms = overlap_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Normalize a positional argument list.
    ///
    /// Numbers: the first is the duration, an optional second is the
    /// overlap. Functions: a single one is the frame callback (linear
    /// easing); with two, the first is the easing and the second the
    /// callback. Numbers and functions may be interleaved.
    pub fn from_args<I>(args: I) -> Result<(Transition, FrameFn)>
    where
        I: IntoIterator<Item = TransitionArg>,
    {
        let mut numbers = Vec::new();
        let mut functions = Vec::new();
        for arg in args {
            match arg {
                TransitionArg::Number(n) => numbers.push(n),
                TransitionArg::Function(f) => functions.push(f),
            }
        }

        let (duration_ms, overlap_ms) = match numbers[..] {
            [duration] => (duration, 0.0),
            [duration, overlap] => (duration, overlap),
            _ => {
                return Err(TransitionError::InvalidArgument(format!(
                    "expected a duration and an optional overlap, got {} numbers",
                    numbers.len()
                )))
            }
        };

        let mut functions = functions.into_iter();
        let (easing, callback) = match (functions.next(), functions.next(), functions.next()) {
            (Some(callback), None, None) => (Easing::Linear, callback),
            (Some(easing), Some(callback), None) => (Easing::Custom(easing), callback),
            (None, _, _) => {
                return Err(TransitionError::InvalidArgument(
                    "missing frame callback".to_string(),
                ))
            }
            _ => {
                return Err(TransitionError::InvalidArgument(
                    "expected an optional easing and a frame callback, got more than two functions"
                        .to_string(),
                ))
            }
        };

        let transition = Transition {
            duration_ms,
            overlap_ms,
            easing,
        };
        transition.validate()?;

        let callback: FrameFn = Box::new(move |t| {
            callback(t);
        });
        Ok((transition, callback))
    }

    /// Check that duration and overlap are finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(TransitionError::InvalidArgument(format!(
                "duration must be a non-negative number of milliseconds, got {}",
                self.duration_ms
            )));
        }
        if !self.overlap_ms.is_finite() || self.overlap_ms < 0.0 {
            return Err(TransitionError::InvalidArgument(format!(
                "overlap must be a non-negative number of milliseconds, got {}",
                self.overlap_ms
            )));
        }
        Ok(())
    }

    /// Start the run. Nothing happens until the scheduler's next frame.
    pub fn run<S, F>(&self, frames: &S, callback: F) -> Result<Completion>
    where
        S: FrameScheduler + Clone + 'static,
        F: FnMut(f64) + 'static,
    {
        self.run_boxed(frames, Box::new(callback))
    }

    fn run_boxed<S>(&self, frames: &S, callback: FrameFn) -> Result<Completion>
    where
        S: FrameScheduler + Clone + 'static,
    {
        self.validate()?;
        log::debug!(
            "starting transition: {}ms, overlap {}ms, {:?}",
            self.duration_ms,
            self.overlap_ms,
            self.easing
        );

        let completion = Completion::new();
        Run {
            transition: self.clone(),
            callback,
            start_time: None,
            completion: completion.clone(),
            frames: frames.clone(),
        }
        .schedule();
        Ok(completion)
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(300.0)
    }
}

/// One positional argument of [`transition`].
///
/// Easings and callbacks share the `Function` variant, so a positional
/// callback must be `Fn`. Keep its state in a `Cell` or `RefCell`, or use
/// [`Transition::run`], which takes an `FnMut`.
#[derive(Clone)]
pub enum TransitionArg {
    Number(f64),
    Function(Rc<dyn Fn(f64) -> f64>),
}

impl TransitionArg {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + 'static,
    {
        TransitionArg::Function(Rc::new(f))
    }

    /// Wraps a callback that returns nothing. See the type docs for why it
    /// is `Fn` rather than `FnMut`.
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(f64) + 'static,
    {
        TransitionArg::Function(Rc::new(move |t| {
            f(t);
            t
        }))
    }
}

impl From<f64> for TransitionArg {
    fn from(n: f64) -> Self {
        TransitionArg::Number(n)
    }
}

impl From<u32> for TransitionArg {
    fn from(n: u32) -> Self {
        TransitionArg::Number(n as f64)
    }
}

impl From<Easing> for TransitionArg {
    fn from(easing: Easing) -> Self {
        TransitionArg::Function(Rc::new(move |t| easing.evaluate(t)))
    }
}

impl std::fmt::Debug for TransitionArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionArg::Number(n) => write!(f, "Number({})", n),
            TransitionArg::Function(_) => write!(f, "Function"),
        }
    }
}

/// Normalize `args` with [`Transition::from_args`] and start the run.
///
/// ```
/// use gilded::animation::{transition, FrameQueue, TransitionArg};
///
/// let frames = FrameQueue::new();
/// let done = transition(
///     &frames,
///     [TransitionArg::from(200u32), TransitionArg::callback(|_| {})],
/// )
/// .unwrap();
/// assert!(!done.is_resolved());
/// ```
pub fn transition<S, I>(frames: &S, args: I) -> Result<Completion>
where
    S: FrameScheduler + Clone + 'static,
    I: IntoIterator<Item = TransitionArg>,
{
    let (transition, callback) = Transition::from_args(args)?;
    transition.run_boxed(frames, callback)
}

struct CompletionState {
    outcome: Option<Result<()>>,
    cancelled: bool,
    waker: Option<Waker>,
}

/// One-shot completion signal of a transition run.
///
/// Resolves exactly once. Clones observe the same signal. Awaiting it yields
/// the run's outcome.
#[derive(Clone)]
pub struct Completion {
    state: Rc<RefCell<CompletionState>>,
}

impl Completion {
    fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(CompletionState {
                outcome: None,
                cancelled: false,
                waker: None,
            })),
        }
    }

    /// Store the outcome unless one is already set. Returns whether this
    /// call resolved the signal.
    fn resolve(&self, outcome: Result<()>) -> bool {
        let waker = {
            let mut state = self.state.borrow_mut();
            if state.outcome.is_some() {
                return false;
            }
            state.outcome = Some(outcome);
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.state.borrow().outcome.is_some()
    }

    /// The outcome, once resolved
    pub fn outcome(&self) -> Option<Result<()>> {
        self.state.borrow().outcome.clone()
    }

    /// Stop the run at its next frame. A still-pending signal then resolves
    /// with [`TransitionError::Cancelled`].
    pub fn cancel(&self) {
        self.state.borrow_mut().cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.borrow().cancelled
    }
}

impl Future for Completion {
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.borrow_mut();
        if let Some(outcome) = &state.outcome {
            return Poll::Ready(outcome.clone());
        }
        state.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Completion")
            .field("outcome", &state.outcome)
            .field("cancelled", &state.cancelled)
            .finish()
    }
}

/// State of one run, moved from frame callback to frame callback.
struct Run<S> {
    transition: Transition,
    callback: FrameFn,
    start_time: Option<f64>,
    completion: Completion,
    frames: S,
}

impl<S: FrameScheduler + Clone + 'static> Run<S> {
    fn schedule(self) {
        let frames = self.frames.clone();
        frames.request_frame(Box::new(move |now| self.step(now)));
    }

    fn step(mut self, now: f64) {
        let start = *self.start_time.get_or_insert(now);
        let elapsed = now - start;

        if self.completion.is_cancelled() {
            if self.completion.resolve(Err(TransitionError::Cancelled)) {
                log::debug!("transition cancelled at {:.1}ms", elapsed);
            }
            return;
        }

        let progress = if self.transition.duration_ms > 0.0 {
            clamp(0.0, elapsed / self.transition.duration_ms, 1.0)
        } else {
            1.0
        };
        log::trace!("transition frame: elapsed {:.1}ms, progress {:.3}", elapsed, progress);

        let easing = &self.transition.easing;
        let callback = &mut self.callback;
        let stepped = panic::catch_unwind(AssertUnwindSafe(|| {
            callback(easing.evaluate(progress));
        }));
        if let Err(payload) = stepped {
            let message = panic_message(&*payload);
            log::error!("transition frame panicked: {}", message);
            self.completion
                .resolve(Err(TransitionError::FramePanicked(message)));
            return;
        }

        let overlap = self.transition.overlap_ms;
        if overlap > 0.0 && elapsed >= overlap && self.completion.resolve(Ok(())) {
            log::debug!("transition resolved early at {:.1}ms", elapsed);
        }

        if progress < 1.0 {
            self.schedule();
        } else if self.completion.resolve(Ok(())) {
            log::debug!("transition finished after {:.1}ms", elapsed);
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
