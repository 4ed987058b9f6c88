//! Frame pacing.
//!
//! Transitions never read a clock on their own. They ask a [`FrameScheduler`]
//! for the next frame and receive that frame's timestamp in milliseconds.
//! A request yields at most one callback; a run that wants another frame
//! has to ask again.
//!
//! [`FrameQueue`] is the bundled scheduler. A host event loop calls
//! [`FrameQueue::tick_now`] once per rendered frame; tests call
//! [`FrameQueue::tick`] with hand-picked timestamps.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

/// Callback invoked with the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Source of per-frame callbacks.
pub trait FrameScheduler {
    /// Arrange for `callback` to run on the next frame.
    fn request_frame(&self, callback: FrameCallback);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn request_frame(&self, callback: FrameCallback) {
        (**self).request_frame(callback)
    }
}

/// Steppable, single-threaded frame scheduler.
///
/// Clones share the same queue, so a clone can be handed to a transition
/// while the original drives the frames.
#[derive(Clone)]
pub struct FrameQueue {
    pending: Rc<RefCell<VecDeque<FrameCallback>>>,
    origin: Instant,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self {
            pending: Rc::new(RefCell::new(VecDeque::new())),
            origin: Instant::now(),
        }
    }

    /// Run every callback registered before this call, in registration
    /// order, passing `timestamp_ms`. Callbacks registered while ticking
    /// wait for the next tick. Returns the number of callbacks run.
    pub fn tick(&self, timestamp_ms: f64) -> usize {
        let batch = std::mem::take(&mut *self.pending.borrow_mut());
        let count = batch.len();
        for callback in batch {
            callback(timestamp_ms);
        }
        if count > 0 {
            log::trace!("frame at {:.3}ms ran {} callbacks", timestamp_ms, count);
        }
        count
    }

    /// [`tick`](Self::tick) with the milliseconds elapsed since this queue
    /// was created.
    pub fn tick_now(&self) -> usize {
        let now = self.origin.elapsed().as_secs_f64() * 1000.0;
        self.tick(now)
    }

    /// Number of callbacks waiting for the next tick
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl Default for FrameQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push_back(callback);
    }
}

impl std::fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_tick_runs_in_registration_order() {
        let frames = FrameQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = log.clone();
            frames.request_frame(Box::new(move |ts| log.borrow_mut().push((i, ts))));
        }
        assert_eq!(frames.pending(), 3);
        assert_eq!(frames.tick(16.0), 3);
        assert_eq!(*log.borrow(), vec![(0, 16.0), (1, 16.0), (2, 16.0)]);
        assert!(frames.is_idle());
    }

    #[test]
    fn test_rearm_waits_for_next_tick() {
        let frames = FrameQueue::new();
        let hits = Rc::new(Cell::new(0));

        let inner_frames = frames.clone();
        let inner_hits = hits.clone();
        frames.request_frame(Box::new(move |_| {
            inner_hits.set(inner_hits.get() + 1);
            let hits = inner_hits.clone();
            inner_frames.request_frame(Box::new(move |_| hits.set(hits.get() + 1)));
        }));

        assert_eq!(frames.tick(0.0), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(frames.pending(), 1);
        assert_eq!(frames.tick(16.0), 1);
        assert_eq!(hits.get(), 2);
        assert_eq!(frames.tick(32.0), 0);
    }

    #[test]
    fn test_tick_now_is_monotonic() {
        let frames = FrameQueue::new();
        let stamps = Rc::new(RefCell::new(Vec::new()));
        for _ in 0..2 {
            let stamps = stamps.clone();
            frames.request_frame(Box::new(move |ts| stamps.borrow_mut().push(ts)));
            frames.tick_now();
        }
        let stamps = stamps.borrow();
        assert_eq!(stamps.len(), 2);
        assert!(stamps[0] >= 0.0);
        assert!(stamps[1] >= stamps[0]);
    }
}
