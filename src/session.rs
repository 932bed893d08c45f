//! Effects Session - Lifecycle and event routing
//!
//! The one object a hosting view owns. Started on mount, stopped on
//! unmount, with every subsystem wired through it: capability detection,
//! pointer capture, the smoothing loop, magnetic targets and the
//! compositor. All state lives inside the session, so two views can run
//! two sessions without sharing anything.
//!
//! # Example
//!
//! ```ignore
//! use pointer_fx::session::EffectsSession;
//! use pointer_fx::capability::Environment;
//! use pointer_fx::input::poll_event;
//! use pointer_fx::EffectsConfig;
//! use std::time::Duration;
//!
//! let session = EffectsSession::start(
//!     Environment::capture(),
//!     &targets,
//!     EffectsConfig::default(),
//! )?;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         session.handle_event(&event)?;
//!     }
//!     session.advance_frame();
//!     if let Some(frame) = session.compose() {
//!         // draw it
//!     }
//! }
//!
//! session.stop();
//! ```

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

use tracing::debug;

use crate::animator::SmoothingAnimator;
use crate::capability::{detect, CapabilityState, Environment};
use crate::compositor::{compose, EffectFrame};
use crate::frame::FrameScheduler;
use crate::input::InputEvent;
use crate::magnetic::MagneticRegistry;
use crate::tracker::PointerTracker;
use crate::types::{EffectsConfig, MagneticTarget, Vec2};

// =============================================================================
// EFFECTS SESSION
// =============================================================================

/// One pointer-effects session, owned by the hosting view.
pub struct EffectsSession {
    config: EffectsConfig,
    env: RefCell<Environment>,
    caps: Cell<CapabilityState>,
    scheduler: Rc<FrameScheduler>,
    tracker: PointerTracker,
    animator: SmoothingAnimator,
    magnetic: Rc<MagneticRegistry>,
    targets: Vec<MagneticTarget>,
    active: Cell<bool>,
    stopped: Cell<bool>,
}

impl EffectsSession {
    /// Start a session against the given environment snapshot.
    ///
    /// Detection runs once here; if it gates effects off the session
    /// still exists (and keeps re-detecting on resize), it just owns no
    /// resources. The target slice is the full snapshot of magnetic
    /// regions for the session's lifetime.
    pub fn start(
        env: Environment,
        targets: &[MagneticTarget],
        config: EffectsConfig,
    ) -> io::Result<Self> {
        let scheduler = Rc::new(FrameScheduler::new());
        let tracker = PointerTracker::new();
        let animator = SmoothingAnimator::new(scheduler.clone(), tracker.sample_cell(), &config);
        let magnetic = Rc::new(MagneticRegistry::new(
            scheduler.clone(),
            config.magnetic_scale,
        ));

        let caps = detect(&env, &config);
        let session = Self {
            config,
            env: RefCell::new(env),
            caps: Cell::new(caps),
            scheduler,
            tracker,
            animator,
            magnetic,
            targets: targets.to_vec(),
            active: Cell::new(false),
            stopped: Cell::new(false),
        };

        if caps.effects_enabled() {
            session.activate()?;
        } else {
            debug!(?caps, "session started inert");
        }
        Ok(session)
    }

    /// Acquire resources: targets, capture, animation loop.
    fn activate(&self) -> io::Result<()> {
        self.magnetic.register_targets(&self.targets);

        let magnetic = self.magnetic.clone();
        self.tracker
            .start(self.caps.get(), Box::new(move |p| magnetic.handle_move(p)))?;

        self.animator.start();
        self.active.set(true);
        debug!("session activated");
        Ok(())
    }

    /// Release everything. Safe when nothing was ever acquired.
    fn deactivate(&self) {
        self.animator.stop();
        self.magnetic.teardown();
        self.tracker.stop();
        self.scheduler.clear();
        self.active.set(false);
        debug!("session deactivated");
    }

    /// Route one translated terminal event into the session.
    ///
    /// Pointer motion feeds the tracker; resizes update the environment
    /// snapshot and re-run detection.
    pub fn handle_event(&self, event: &InputEvent) -> io::Result<()> {
        match *event {
            InputEvent::Pointer { x, y } => {
                if self.active.get() {
                    self.tracker.record(x, y);
                }
                Ok(())
            }
            InputEvent::Resize(columns, rows) => {
                self.env.borrow_mut().set_size(columns, rows);
                self.redetect()
            }
            InputEvent::None => Ok(()),
        }
    }

    /// Replace the environment snapshot and re-run detection.
    ///
    /// The analogue of a media-query change notification: hosts that
    /// learn about a reduced-motion flip mid-session push the new
    /// snapshot through here.
    pub fn refresh_environment(&self, env: Environment) -> io::Result<()> {
        *self.env.borrow_mut() = env;
        self.redetect()
    }

    /// Re-run detection against the current snapshot.
    ///
    /// Unchanged results short-circuit. A flip to disabled tears the
    /// whole engine down before any queued frame can run; a flip back
    /// to enabled re-activates through the same start path.
    fn redetect(&self) -> io::Result<()> {
        let caps = detect(&self.env.borrow(), &self.config);
        if caps == self.caps.get() {
            return Ok(());
        }
        debug!(old = ?self.caps.get(), new = ?caps, "capability state changed");
        self.caps.set(caps);

        if self.stopped.get() {
            return Ok(());
        }
        if self.active.get() && !caps.effects_enabled() {
            self.deactivate();
        } else if !self.active.get() && caps.effects_enabled() {
            self.activate()?;
        }
        Ok(())
    }

    /// Run one frame of scheduled work.
    pub fn advance_frame(&self) {
        self.scheduler.run_frame();
    }

    /// Stop the session.
    ///
    /// Idempotent; a stopped session ignores further events and never
    /// re-activates.
    pub fn stop(&self) {
        if self.stopped.get() {
            return;
        }
        self.stopped.set(true);
        self.deactivate();
        debug!("session stopped");
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Compose the current effect frame for the host renderer.
    ///
    /// `None` whenever the engine is inert, so the host draws the same
    /// thing it would have drawn with no session at all.
    pub fn compose(&self) -> Option<EffectFrame> {
        if !self.active.get() {
            return None;
        }
        let env = self.env.borrow();
        compose(
            self.caps.get(),
            self.animator.ring(),
            self.animator.follower(),
            (env.columns, env.rows),
        )
    }

    /// Current capability state.
    pub fn capabilities(&self) -> CapabilityState {
        self.caps.get()
    }

    /// Whether the engine currently owns resources.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Whether mouse capture is enabled.
    pub fn is_capturing(&self) -> bool {
        self.tracker.is_capturing()
    }

    /// Smoothed cursor ring position.
    pub fn cursor(&self) -> Vec2 {
        self.animator.ring()
    }

    /// Smoothed follower position.
    pub fn follower(&self) -> Vec2 {
        self.animator.follower()
    }

    /// Committed magnetic offset for a target id.
    pub fn magnetic_offset(&self, id: usize) -> Vec2 {
        self.magnetic.offset_of(id)
    }

    /// Number of frame callbacks currently queued.
    pub fn pending_frames(&self) -> usize {
        self.scheduler.pending()
    }
}

impl Drop for EffectsSession {
    fn drop(&mut self) {
        // Best-effort cleanup if the host never called stop().
        self.stop();
    }
}

// =============================================================================
// TESTS
// =============================================================================
