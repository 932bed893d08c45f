//! Frame Scheduler - Cancelable per-frame callbacks
//!
//! A single-threaded callback queue pumped by the host event loop.
//! Each request yields a handle; canceling an inactive handle is a no-op,
//! so callers never track whether their frame already ran.
//!
//! # API
//!
//! - `FrameScheduler::request` - Queue a callback for the next frame
//! - `FrameScheduler::cancel` - Drop a queued callback by handle
//! - `FrameScheduler::run_frame` - Execute all callbacks due this frame
//! - `FrameScheduler::clear` - Drop everything queued
//!
//! # Example
//!
//! ```ignore
//! use pointer_fx::frame::FrameScheduler;
//!
//! let scheduler = FrameScheduler::new();
//! let handle = scheduler.request(Box::new(|| println!("frame!")));
//! scheduler.cancel(handle); // callback never runs
//! scheduler.run_frame();
//! ```

use std::cell::{Cell, RefCell};

use tracing::trace;

// =============================================================================
// FRAME HANDLE
// =============================================================================

/// Identifies one queued callback. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(u64);

// =============================================================================
// FRAME SCHEDULER
// =============================================================================

/// Single-threaded frame callback queue.
///
/// Callbacks queued while a frame is running execute on the next frame,
/// so a self-rescheduling callback runs once per frame, not in a loop.
pub struct FrameScheduler {
    queue: RefCell<Vec<(u64, Box<dyn FnOnce()>)>>,
    next_id: Cell<u64>,
}

impl FrameScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self {
            queue: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Queue a callback for the next frame.
    pub fn request(&self, callback: Box<dyn FnOnce()>) -> FrameHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.queue.borrow_mut().push((id, callback));
        FrameHandle(id)
    }

    /// Cancel a queued callback.
    ///
    /// No-op when the handle already ran or was canceled before.
    pub fn cancel(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(id, _)| *id != handle.0);
    }

    /// Run every callback queued before this call.
    ///
    /// The queue is taken first, so callbacks scheduled during the frame
    /// land on the next one.
    pub fn run_frame(&self) {
        let due = self.queue.take();
        if !due.is_empty() {
            trace!(count = due.len(), "running frame callbacks");
        }
        for (_, callback) in due {
            callback();
        }
    }

    /// Number of callbacks currently queued.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Drop all queued callbacks without running them.
    pub fn clear(&self) {
        let dropped = self.queue.take();
        if !dropped.is_empty() {
            trace!(count = dropped.len(), "cleared frame queue");
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_request_and_run() {
        let scheduler = FrameScheduler::new();
        let ran = Rc::new(Cell::new(false));

        let flag = ran.clone();
        scheduler.request(Box::new(move || flag.set(true)));

        assert_eq!(scheduler.pending(), 1);
        scheduler.run_frame();
        assert!(ran.get());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_cancel_prevents_execution() {
        let scheduler = FrameScheduler::new();
        let ran = Rc::new(Cell::new(false));

        let flag = ran.clone();
        let handle = scheduler.request(Box::new(move || flag.set(true)));
        scheduler.cancel(handle);
        scheduler.run_frame();

        assert!(!ran.get());
    }

    #[test]
    fn test_cancel_stale_handle_is_noop() {
        let scheduler = FrameScheduler::new();
        let handle = scheduler.request(Box::new(|| {}));
        scheduler.run_frame();

        // Already executed; canceling must not disturb anything.
        scheduler.cancel(handle);
        scheduler.cancel(handle);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_cancel_one_of_many() {
        let scheduler = FrameScheduler::new();
        let count = Rc::new(Cell::new(0));

        let c1 = count.clone();
        let _keep = scheduler.request(Box::new(move || c1.set(c1.get() + 1)));
        let c2 = count.clone();
        let drop_me = scheduler.request(Box::new(move || c2.set(c2.get() + 1)));
        let c3 = count.clone();
        let _keep2 = scheduler.request(Box::new(move || c3.set(c3.get() + 1)));

        scheduler.cancel(drop_me);
        scheduler.run_frame();

        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_reschedule_during_frame_runs_next_frame() {
        let scheduler = Rc::new(FrameScheduler::new());
        let count = Rc::new(Cell::new(0));

        let s = scheduler.clone();
        let c = count.clone();
        scheduler.request(Box::new(move || {
            c.set(c.get() + 1);
            let c2 = c.clone();
            s.request(Box::new(move || c2.set(c2.get() + 1)));
        }));

        scheduler.run_frame();
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending(), 1);

        scheduler.run_frame();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_clear_drops_everything() {
        let scheduler = FrameScheduler::new();
        let ran = Rc::new(Cell::new(false));

        let flag = ran.clone();
        scheduler.request(Box::new(move || flag.set(true)));
        scheduler.request(Box::new(|| {}));

        scheduler.clear();
        assert_eq!(scheduler.pending(), 0);

        scheduler.run_frame();
        assert!(!ran.get());
    }

    #[test]
    fn test_handles_are_unique() {
        let scheduler = FrameScheduler::new();
        let a = scheduler.request(Box::new(|| {}));
        scheduler.run_frame();
        let b = scheduler.request(Box::new(|| {}));

        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_frame_is_fine() {
        let scheduler = FrameScheduler::new();
        scheduler.run_frame();
        scheduler.run_frame();
        assert_eq!(scheduler.pending(), 0);
    }
}
