//! Pointer Tracker - Raw pointer sampling behind capability gating
//!
//! Owns the mouse-capture lifecycle and the single live pointer sample.
//! Capture is only ever enabled when the capability state allows hover;
//! on touch/mobile classification nothing is attached at all, so there
//! is nothing to undo later.
//!
//! # API
//!
//! - `PointerTracker::start` - Enable capture if capabilities allow it
//! - `PointerTracker::record` - Feed one pointer position in
//! - `PointerTracker::stop` - Disable capture; idempotent
//! - `PointerTracker::sample` - Read the latest sample
//!
//! # Example
//!
//! ```ignore
//! use pointer_fx::tracker::PointerTracker;
//!
//! let tracker = PointerTracker::new();
//! tracker.start(caps, Box::new(|p| println!("pointer at {p:?}")))?;
//! // ... feed events ...
//! tracker.stop();
//! ```

use std::cell::{Cell, RefCell};
use std::io::stdout;
use std::rc::Rc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tracing::debug;

use crate::capability::CapabilityState;
use crate::types::Vec2;

// =============================================================================
// POINTER TRACKER
// =============================================================================

/// Sampling callback, invoked synchronously per recorded move.
pub type SampleFn = Box<dyn Fn(Vec2)>;

/// Tracks the pointer while mouse capture is active.
///
/// There is exactly one live sample, origin-initialized, shared with the
/// animator through an `Rc<Cell<_>>` so frame callbacks read the freshest
/// position without going through the tracker.
pub struct PointerTracker {
    sample: Rc<Cell<Vec2>>,
    capturing: Cell<bool>,
    on_sample: RefCell<Option<SampleFn>>,
}

impl PointerTracker {
    /// Create a tracker with the sample at the origin.
    pub fn new() -> Self {
        Self {
            sample: Rc::new(Cell::new(Vec2::ZERO)),
            capturing: Cell::new(false),
            on_sample: RefCell::new(None),
        }
    }

    /// Enable mouse capture and install the sample callback.
    ///
    /// When the capability state gates effects off this attaches nothing
    /// and returns Ok: skipping is the intended behavior, not a failure.
    pub fn start(&self, caps: CapabilityState, on_sample: SampleFn) -> std::io::Result<()> {
        if !caps.effects_enabled() {
            debug!("pointer tracker: capabilities gate capture off");
            return Ok(());
        }
        if self.capturing.get() {
            return Ok(());
        }

        execute!(stdout(), EnableMouseCapture)?;
        self.capturing.set(true);
        *self.on_sample.borrow_mut() = Some(on_sample);
        debug!("pointer tracker: mouse capture enabled");
        Ok(())
    }

    /// Record one pointer position.
    ///
    /// Ignored while capture is off; the callback fires synchronously,
    /// once per recorded move, with no throttling.
    pub fn record(&self, x: u16, y: u16) {
        if !self.capturing.get() {
            return;
        }
        let p = Vec2::from_cell(x, y);
        self.sample.set(p);
        if let Some(callback) = self.on_sample.borrow().as_ref() {
            callback(p);
        }
    }

    /// Disable mouse capture and drop the callback.
    ///
    /// Idempotent. Capture teardown is best-effort: a failing write to
    /// stdout at this point has nothing useful to report to.
    pub fn stop(&self) {
        if !self.capturing.get() {
            return;
        }
        self.capturing.set(false);
        self.on_sample.borrow_mut().take();
        let _ = execute!(stdout(), DisableMouseCapture);
        debug!("pointer tracker: mouse capture disabled");
    }

    /// Whether mouse capture is currently enabled.
    pub fn is_capturing(&self) -> bool {
        self.capturing.get()
    }

    /// The latest sample.
    pub fn sample(&self) -> Vec2 {
        self.sample.get()
    }

    /// Shared handle to the sample cell, for frame callbacks.
    pub fn sample_cell(&self) -> Rc<Cell<Vec2>> {
        self.sample.clone()
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
