//! Effect Compositor - Pure render-frame derivation
//!
//! Turns capability state plus the animated positions into the cells the
//! host renderer draws. No side effects, no stored state: composing the
//! same inputs twice yields the same frame, and gated-off capability
//! states yield nothing, so the first interactive render is identical to
//! the inert one.
//!
//! # API
//!
//! - `compose` - Derive an `EffectFrame`, or `None` when effects are off
//! - `EffectFrame` - Glow, ring and follower cells, viewport-clamped
//!
//! # Example
//!
//! ```ignore
//! use pointer_fx::compositor::compose;
//!
//! if let Some(frame) = compose(caps, ring, follower, (cols, rows)) {
//!     draw_glow(frame.glow);
//!     draw_ring(frame.ring);
//! }
//! ```

use crate::capability::CapabilityState;
use crate::types::Vec2;

// =============================================================================
// EFFECT FRAME
// =============================================================================

/// The ambient glow around the follower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glow {
    /// Center cell.
    pub center: (u16, u16),
    /// Falloff radius in cells, derived from the viewport size.
    pub radius: u16,
}

/// One composed frame of effect geometry, in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectFrame {
    /// Ambient glow, centered on the slow follower.
    pub glow: Glow,
    /// Cursor ring cell.
    pub ring: (u16, u16),
    /// Follower cell.
    pub follower: (u16, u16),
}

// =============================================================================
// COMPOSE
// =============================================================================

/// Derive the effect frame for the current state.
///
/// Returns `None` whenever the capability state gates effects off
/// (touch/mobile, reduced motion, or no completed detection yet) or the
/// viewport is degenerate. Smoothed positions round to the nearest cell
/// and clamp inside the viewport.
pub fn compose(
    caps: CapabilityState,
    ring: Vec2,
    follower: Vec2,
    viewport: (u16, u16),
) -> Option<EffectFrame> {
    if !caps.effects_enabled() {
        return None;
    }
    let (cols, rows) = viewport;
    if cols == 0 || rows == 0 {
        return None;
    }

    let follower_cell = to_cell(follower, cols, rows);
    Some(EffectFrame {
        glow: Glow {
            center: follower_cell,
            radius: glow_radius(cols, rows),
        },
        ring: to_cell(ring, cols, rows),
        follower: follower_cell,
    })
}

/// Round a smoothed position back to a viewport cell.
fn to_cell(p: Vec2, cols: u16, rows: u16) -> (u16, u16) {
    let clamp = |v: f32, max: u16| -> u16 {
        let rounded = v.round();
        if rounded <= 0.0 {
            0
        } else if rounded >= (max - 1) as f32 {
            max - 1
        } else {
            rounded as u16
        }
    };
    (clamp(p.x, cols), clamp(p.y, rows))
}

/// Glow falloff radius scales with the larger viewport dimension.
fn glow_radius(cols: u16, rows: u16) -> u16 {
    (cols.max(rows) / 6).max(2)
}

// =============================================================================
// TESTS
// =============================================================================
