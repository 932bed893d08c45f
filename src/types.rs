//! Core types for pointer-fx.
//!
//! These types define the foundation that everything builds on.
//! They flow between the tracker, the animator, the magnetic registry and
//! the compositor, and define what the host renderer understands.

// =============================================================================
// Vec2
// =============================================================================

/// A 2D position or offset in viewport coordinates.
///
/// Uses `f32` because smoothed positions live between cells; the compositor
/// rounds back to cell coordinates at the very end.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Create a new vector.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Convert cell coordinates to a position.
    pub fn from_cell(x: u16, y: u16) -> Self {
        Self::new(x as f32, y as f32)
    }

    /// Move this position one smoothing step toward `target`.
    ///
    /// Exponential smoothing: `p + (target - p) * alpha`, per axis.
    /// With a constant `target` the remaining error shrinks by `(1 - alpha)`
    /// every step.
    #[inline]
    pub fn toward(self, target: Self, alpha: f32) -> Self {
        Self {
            x: self.x + (target.x - self.x) * alpha,
            y: self.y + (target.y - self.y) * alpha,
        }
    }

    /// Component-wise scale.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// =============================================================================
// Rect
// =============================================================================

/// A rectangular screen region in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Geometric center of the rect.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Check whether a position falls inside the rect.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x as f32
            && p.x < (self.x + self.width) as f32
            && p.y >= self.y as f32
            && p.y < (self.y + self.height) as f32
    }
}

// =============================================================================
// Magnetic Target
// =============================================================================

/// A screen region that opted into the magnetic displacement effect.
///
/// Targets are designated by the host as a snapshot at session setup;
/// regions appearing later are not picked up automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagneticTarget {
    /// Host-chosen identifier, used to read the committed offset back.
    pub id: usize,
    /// The region's laid-out bounds.
    pub rect: Rect,
}

impl MagneticTarget {
    /// Create a new target.
    pub const fn new(id: usize, rect: Rect) -> Self {
        Self { id, rect }
    }
}

// =============================================================================
// Effects Config
// =============================================================================

/// Tuning knobs for the effects engine.
///
/// All fields have sensible defaults; construct with struct update syntax:
///
/// ```
/// use pointer_fx::EffectsConfig;
///
/// let config = EffectsConfig {
///     magnetic_scale: 0.25,
///     ..Default::default()
/// };
/// assert_eq!(config.ring_alpha, 0.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectsConfig {
    /// Smoothing factor for the primary cursor ring. Must be in (0, 1);
    /// higher chases the pointer faster.
    pub ring_alpha: f32,
    /// Smoothing factor for the slower follower. Must be in (0, 1).
    pub follower_alpha: f32,
    /// Per-axis scale applied to the pointer-to-center vector of a
    /// magnetic target. Below 1 so the pull is smaller than the offset.
    pub magnetic_scale: f32,
    /// Viewports narrower than this count toward the handheld heuristic.
    pub narrow_columns: u16,
    /// Manual override: treat the device as touch/mobile regardless of
    /// what detection says. Escape hatch for misclassified terminals.
    pub force_disable: bool,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            ring_alpha: 0.2,
            follower_alpha: 0.1,
            magnetic_scale: 0.3,
            narrow_columns: 40,
            force_disable: false,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_toward() {
        let p = Vec2::ZERO.toward(Vec2::new(100.0, 100.0), 0.2);
        assert_eq!(p, Vec2::new(20.0, 20.0));

        let p = p.toward(Vec2::new(100.0, 100.0), 0.2);
        assert_eq!(p, Vec2::new(36.0, 36.0));
    }

    #[test]
    fn test_vec2_toward_zero_error_is_stable() {
        let target = Vec2::new(42.0, -7.0);
        assert_eq!(target.toward(target, 0.2), target);
    }

    #[test]
    fn test_vec2_scaled() {
        let v = Vec2::new(30.0, 10.0).scaled(0.3);
        assert_eq!(v, Vec2::new(9.0, 3.0));
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(40, 40, 20, 20);
        assert_eq!(rect.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10, 10, 5, 5);

        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(14.0, 14.0)));

        // Exclusive far edge
        assert!(!rect.contains(Vec2::new(15.0, 12.0)));
        assert!(!rect.contains(Vec2::new(12.0, 15.0)));
        assert!(!rect.contains(Vec2::new(9.0, 12.0)));
    }

    #[test]
    fn test_config_defaults() {
        let config = EffectsConfig::default();
        assert_eq!(config.ring_alpha, 0.2);
        assert_eq!(config.follower_alpha, 0.1);
        assert_eq!(config.magnetic_scale, 0.3);
        assert!(!config.force_disable);
    }
}
