//! Capability Detection - Decide whether the effects engine may run
//!
//! Classifies the current terminal environment into a small flag set:
//! touch/mobile, hover-capable, reduced-motion. Everything downstream
//! gates on these flags; nothing else in the crate inspects the
//! environment directly.
//!
//! # API
//!
//! - `Environment` - Snapshot of the signals detection reads
//! - `Environment::capture` - Capture from the live process
//! - `CapabilityState` - Bitflag result of detection
//! - `detect` - Pure classification of an environment snapshot
//!
//! # Example
//!
//! ```ignore
//! use pointer_fx::capability::{detect, Environment};
//! use pointer_fx::EffectsConfig;
//!
//! let env = Environment::capture();
//! let caps = detect(&env, &EffectsConfig::default());
//! if caps.effects_enabled() {
//!     // start the session
//! }
//! ```

use std::env;
use std::io::{stdout, IsTerminal};

use bitflags::bitflags;
use tracing::trace;

use crate::types::EffectsConfig;

// =============================================================================
// ENVIRONMENT SNAPSHOT
// =============================================================================

/// `TERM`/`TERM_PROGRAM` substrings that indicate a touch-first terminal.
///
/// The match is case-insensitive and substring-based, so "Termux" and
/// "termux-monet" both count.
const MOBILE_SIGNATURES: &[&str] = &["termux", "ish", "a-shell", "blink"];

/// A snapshot of everything detection looks at.
///
/// Captured once from the live process, or constructed directly in tests
/// and headless contexts. Detection never reads the process environment
/// behind this struct's back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Environment {
    /// Value of `TERM`, if set.
    pub term: Option<String>,
    /// Value of `TERM_PROGRAM`, if set.
    pub term_program: Option<String>,
    /// Value of `REDUCED_MOTION`, if set.
    pub reduced_motion: Option<String>,
    /// Value of `NO_MOTION`, if set. Accepted as an alias.
    pub no_motion: Option<String>,
    /// Whether stdout is attached to a terminal.
    pub is_tty: bool,
    /// Viewport width in columns. 0 when unknown.
    pub columns: u16,
    /// Viewport height in rows. 0 when unknown.
    pub rows: u16,
}

impl Environment {
    /// Capture a snapshot from the running process.
    ///
    /// Size probing failure is not an error; the snapshot just carries
    /// zero dimensions and detection treats them as unknown.
    pub fn capture() -> Self {
        let (columns, rows) = crossterm::terminal::size().unwrap_or((0, 0));
        Self {
            term: env::var("TERM").ok(),
            term_program: env::var("TERM_PROGRAM").ok(),
            reduced_motion: env::var("REDUCED_MOTION").ok(),
            no_motion: env::var("NO_MOTION").ok(),
            is_tty: stdout().is_terminal(),
            columns,
            rows,
        }
    }

    /// An environment with no terminal attached.
    ///
    /// Detection of this snapshot yields the empty state, which gates
    /// every effect off.
    pub fn headless() -> Self {
        Self::default()
    }

    /// Update the viewport dimensions in place.
    pub fn set_size(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
    }
}

// =============================================================================
// CAPABILITY STATE
// =============================================================================

bitflags! {
    /// Result of capability detection.
    ///
    /// `DETECTED` distinguishes "detection ran and found nothing" from
    /// "detection never ran": before the first successful detection the
    /// state is `empty()` and every effect stays off.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CapabilityState: u8 {
        /// The terminal is classified as touch-first or mobile.
        const TOUCH_OR_MOBILE = 1 << 0;
        /// The terminal can report pointer motion (hover analogue).
        const CAN_HOVER       = 1 << 1;
        /// The user asked for reduced motion.
        const REDUCED_MOTION  = 1 << 2;
        /// Detection has run at least once against a real terminal.
        const DETECTED        = 1 << 3;
    }
}

impl CapabilityState {
    /// Whether the full effects engine may run.
    ///
    /// Requires a completed detection and hover capability, and the
    /// absence of both the touch/mobile classification and reduced motion.
    pub fn effects_enabled(&self) -> bool {
        self.contains(Self::DETECTED | Self::CAN_HOVER)
            && !self.intersects(Self::TOUCH_OR_MOBILE | Self::REDUCED_MOTION)
    }
}

impl Default for CapabilityState {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// DETECTION
// =============================================================================

/// Classify an environment snapshot.
///
/// Pure function of its inputs; the same snapshot always produces the
/// same state, so re-running on resize is free when nothing changed.
/// A snapshot without a terminal attached yields `empty()`.
pub fn detect(env: &Environment, config: &EffectsConfig) -> CapabilityState {
    if !env.is_tty {
        trace!("capability detect: no tty, effects stay off");
        return CapabilityState::empty();
    }

    let mut caps = CapabilityState::DETECTED;

    if is_touch_or_mobile(env, config) {
        caps |= CapabilityState::TOUCH_OR_MOBILE;
    }
    if can_hover(env) {
        caps |= CapabilityState::CAN_HOVER;
    }
    if reduced_motion_requested(env) {
        caps |= CapabilityState::REDUCED_MOTION;
    }

    trace!(?caps, "capability detect");
    caps
}

/// Touch/mobile classification.
///
/// Signature tokens win outright; the narrow-viewport heuristic only
/// adds to them. `force_disable` is the manual override for terminals
/// the heuristics misjudge.
fn is_touch_or_mobile(env: &Environment, config: &EffectsConfig) -> bool {
    if config.force_disable {
        return true;
    }
    if matches_mobile_signature(env.term.as_deref())
        || matches_mobile_signature(env.term_program.as_deref())
    {
        return true;
    }
    // Narrow viewports are treated as handheld when the width is known.
    env.columns > 0 && env.columns < config.narrow_columns
}

fn matches_mobile_signature(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let lower = value.to_ascii_lowercase();
    MOBILE_SIGNATURES.iter().any(|sig| lower.contains(sig))
}

/// Hover analogue: the terminal must identify itself and not be "dumb".
fn can_hover(env: &Environment) -> bool {
    match env.term.as_deref() {
        Some(term) => !term.eq_ignore_ascii_case("dumb"),
        None => false,
    }
}

/// Reduced motion: any non-empty value other than "0" on either variable.
fn reduced_motion_requested(env: &Environment) -> bool {
    let set = |v: &Option<String>| match v.as_deref() {
        Some(value) => !value.is_empty() && value != "0",
        None => false,
    };
    set(&env.reduced_motion) || set(&env.no_motion)
}

// =============================================================================
// TESTS
// =============================================================================
