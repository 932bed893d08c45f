//! Smoothing Animator - Trailing positions chasing the pointer
//!
//! Runs a self-rescheduling frame loop that moves two animated positions
//! toward the live pointer sample with exponential smoothing. The ring
//! chases fast, the follower lags behind, which is what produces the
//! layered trail.
//!
//! # Pattern
//!
//! - One queued frame at a time; each tick reschedules the next
//! - Explicit lifecycle state checked at the top of every tick, so a
//!   frame that was already queued when teardown began does nothing
//! - The sample is read at tick time, never cached across frames
//!
//! # Example
//!
//! ```ignore
//! use pointer_fx::animator::SmoothingAnimator;
//!
//! let animator = SmoothingAnimator::new(scheduler, sample, &config);
//! animator.start();
//! // host pumps scheduler.run_frame() ...
//! let ring = animator.ring();
//! animator.stop();
//! ```

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::frame::{FrameHandle, FrameScheduler};
use crate::types::{EffectsConfig, Vec2};

// =============================================================================
// LOOP STATE
// =============================================================================

/// Lifecycle of the animation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    /// Not running; no frames queued.
    Inactive,
    /// Ticking; exactly one frame queued at a time.
    Active,
    /// Stop requested; queued frames must not touch positions.
    TearingDown,
}

// =============================================================================
// ANIMATED POSITION
// =============================================================================

/// One smoothed position with its own smoothing factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedPosition {
    pub pos: Vec2,
    pub alpha: f32,
}

impl AnimatedPosition {
    /// Create a position at `pos`.
    pub const fn new(pos: Vec2, alpha: f32) -> Self {
        Self { pos, alpha }
    }

    /// One smoothing step toward `target`.
    pub fn step(&mut self, target: Vec2) {
        self.pos = self.pos.toward(target, self.alpha);
    }
}

// =============================================================================
// SMOOTHING ANIMATOR
// =============================================================================

struct Inner {
    scheduler: Rc<FrameScheduler>,
    sample: Rc<Cell<Vec2>>,
    state: Cell<LoopState>,
    ring: Cell<AnimatedPosition>,
    follower: Cell<AnimatedPosition>,
    pending: Cell<Option<FrameHandle>>,
}

/// Drives the ring and follower positions.
///
/// The queued tick holds a weak reference to the shared state, so a
/// dropped animator leaves only an inert callback behind.
pub struct SmoothingAnimator {
    inner: Rc<Inner>,
}

impl SmoothingAnimator {
    /// Create an inactive animator reading from `sample`.
    pub fn new(
        scheduler: Rc<FrameScheduler>,
        sample: Rc<Cell<Vec2>>,
        config: &EffectsConfig,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                scheduler,
                sample,
                state: Cell::new(LoopState::Inactive),
                ring: Cell::new(AnimatedPosition::new(Vec2::ZERO, config.ring_alpha)),
                follower: Cell::new(AnimatedPosition::new(Vec2::ZERO, config.follower_alpha)),
                pending: Cell::new(None),
            }),
        }
    }

    /// Start the loop.
    ///
    /// Positions snap to the current sample so the trail begins at the
    /// pointer instead of streaking in from the origin. Starting an
    /// already active animator is a no-op.
    pub fn start(&self) {
        if self.inner.state.get() == LoopState::Active {
            return;
        }
        let sample = self.inner.sample.get();
        let mut ring = self.inner.ring.get();
        ring.pos = sample;
        self.inner.ring.set(ring);
        let mut follower = self.inner.follower.get();
        follower.pos = sample;
        self.inner.follower.set(follower);

        self.inner.state.set(LoopState::Active);
        schedule_tick(&self.inner);
        debug!("animator started");
    }

    /// Stop the loop and cancel the queued frame.
    ///
    /// Idempotent. Any frame still queued elsewhere checks the state
    /// before acting, so nothing moves after this returns.
    pub fn stop(&self) {
        if self.inner.state.get() == LoopState::Inactive {
            return;
        }
        self.inner.state.set(LoopState::TearingDown);
        if let Some(handle) = self.inner.pending.take() {
            self.inner.scheduler.cancel(handle);
        }
        self.inner.state.set(LoopState::Inactive);
        debug!("animator stopped");
    }

    /// Current ring position.
    pub fn ring(&self) -> Vec2 {
        self.inner.ring.get().pos
    }

    /// Current follower position.
    pub fn follower(&self) -> Vec2 {
        self.inner.follower.get().pos
    }

    /// Whether the loop is running.
    pub fn is_active(&self) -> bool {
        self.inner.state.get() == LoopState::Active
    }
}

/// Queue the next tick.
///
/// The closure re-checks the lifecycle state first; a tick that was
/// queued before teardown must be inert.
fn schedule_tick(inner: &Rc<Inner>) {
    let weak = Rc::downgrade(inner);
    let handle = inner.scheduler.request(Box::new(move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if inner.state.get() != LoopState::Active {
            return;
        }
        inner.pending.set(None);

        let target = inner.sample.get();
        let mut ring = inner.ring.get();
        ring.step(target);
        inner.ring.set(ring);
        let mut follower = inner.follower.get();
        follower.step(target);
        inner.follower.set(follower);

        schedule_tick(&inner);
    }));
    inner.pending.set(Some(handle));
}

// =============================================================================
// TESTS
// =============================================================================
