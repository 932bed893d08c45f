//! Magnetic Displacement - Per-target hover pull
//!
//! Targets registered at session setup get displaced toward the pointer
//! while it hovers them. Each target commits its displacement through
//! one scheduled frame; rapid moves within a frame coalesce by canceling
//! the pending handle before queuing a new one, so a target never has
//! more than one frame outstanding.
//!
//! # Pattern
//!
//! - Registry keyed by host-chosen target id
//! - Move inside a rect: displacement = (pointer - center) * scale
//! - Move off a rect: one final frame resets the offset to the origin
//! - Teardown cancels every pending frame and clears all offsets
//!
//! # Example
//!
//! ```ignore
//! use pointer_fx::magnetic::MagneticRegistry;
//!
//! let registry = MagneticRegistry::new(scheduler, 0.3);
//! registry.register_targets(&targets);
//! registry.handle_move(pointer);
//! // after the host pumps a frame:
//! let offset = registry.offset_of(target_id);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::frame::{FrameHandle, FrameScheduler};
use crate::types::{MagneticTarget, Rect, Vec2};

// =============================================================================
// BINDING
// =============================================================================

/// Per-target state.
struct Binding {
    rect: Rect,
    offset: Rc<Cell<Vec2>>,
    pending: Rc<Cell<Option<FrameHandle>>>,
    hovered: Cell<bool>,
}

impl Binding {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            offset: Rc::new(Cell::new(Vec2::ZERO)),
            pending: Rc::new(Cell::new(None)),
            hovered: Cell::new(false),
        }
    }
}

// =============================================================================
// MAGNETIC REGISTRY
// =============================================================================

/// Registry of magnetic targets and their committed offsets.
pub struct MagneticRegistry {
    scheduler: Rc<FrameScheduler>,
    scale: f32,
    bindings: RefCell<HashMap<usize, Binding>>,
}

impl MagneticRegistry {
    /// Create an empty registry.
    pub fn new(scheduler: Rc<FrameScheduler>, scale: f32) -> Self {
        Self {
            scheduler,
            scale,
            bindings: RefCell::new(HashMap::new()),
        }
    }

    /// Register the target snapshot.
    ///
    /// Replaces any previous registration. Targets added to the screen
    /// after this call are not picked up.
    pub fn register_targets(&self, targets: &[MagneticTarget]) {
        let mut bindings = self.bindings.borrow_mut();
        bindings.clear();
        for target in targets {
            bindings.insert(target.id, Binding::new(target.rect));
        }
        debug!(count = targets.len(), "magnetic targets registered");
    }

    /// React to a pointer position.
    ///
    /// For each target the pointer is inside, schedule a displacement
    /// commit, canceling whatever was pending for that target. For each
    /// target the pointer just left, schedule one reset frame so the
    /// target never sticks displaced.
    pub fn handle_move(&self, p: Vec2) {
        let bindings = self.bindings.borrow();
        for (id, binding) in bindings.iter() {
            if binding.rect.contains(p) {
                binding.hovered.set(true);
                let displacement = (p - binding.rect.center()).scaled(self.scale);
                trace!(id, ?displacement, "magnetic pull");
                self.commit(binding, displacement);
            } else if binding.hovered.get() {
                binding.hovered.set(false);
                trace!(id, "magnetic release");
                self.commit(binding, Vec2::ZERO);
            }
        }
    }

    /// Schedule one commit frame for a binding, coalescing with any
    /// frame already pending for it.
    fn commit(&self, binding: &Binding, value: Vec2) {
        if let Some(handle) = binding.pending.take() {
            self.scheduler.cancel(handle);
        }
        let offset = binding.offset.clone();
        let pending = binding.pending.clone();
        let handle = self.scheduler.request(Box::new(move || {
            offset.set(value);
            pending.set(None);
        }));
        binding.pending.set(Some(handle));
    }

    /// Committed offset for a target. Origin for unknown ids.
    pub fn offset_of(&self, id: usize) -> Vec2 {
        self.bindings
            .borrow()
            .get(&id)
            .map(|b| b.offset.get())
            .unwrap_or(Vec2::ZERO)
    }

    /// Cancel everything and clear all state.
    ///
    /// Safe to call with nothing registered or pending.
    pub fn teardown(&self) {
        let mut bindings = self.bindings.borrow_mut();
        for binding in bindings.values() {
            if let Some(handle) = binding.pending.take() {
                self.scheduler.cancel(handle);
            }
            binding.offset.set(Vec2::ZERO);
        }
        bindings.clear();
        debug!("magnetic registry torn down");
    }

    /// Number of registered targets.
    pub fn target_count(&self) -> usize {
        self.bindings.borrow().len()
    }

    /// Number of targets with a frame outstanding.
    pub fn pending_count(&self) -> usize {
        self.bindings
            .borrow()
            .values()
            .filter(|b| b.pending.get().is_some())
            .count()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Target rect centered on (50, 50), wide enough to hover from (80, 60).
    fn setup() -> (Rc<FrameScheduler>, MagneticRegistry) {
        let scheduler = Rc::new(FrameScheduler::new());
        let registry = MagneticRegistry::new(scheduler.clone(), 0.3);
        registry.register_targets(&[MagneticTarget::new(1, Rect::new(10, 30, 80, 40))]);
        (scheduler, registry)
    }

    #[test]
    fn test_hover_commits_displacement() {
        let (scheduler, registry) = setup();

        // Target center is (50, 50).
        registry.handle_move(Vec2::new(80.0, 60.0));
        assert_eq!(registry.offset_of(1), Vec2::ZERO);

        scheduler.run_frame();
        assert_eq!(registry.offset_of(1), Vec2::new(9.0, 3.0));
    }

    #[test]
    fn test_moves_within_frame_coalesce() {
        let (scheduler, registry) = setup();

        registry.handle_move(Vec2::new(45.0, 45.0));
        registry.handle_move(Vec2::new(55.0, 55.0));
        registry.handle_move(Vec2::new(80.0, 60.0));

        assert_eq!(registry.pending_count(), 1);
        assert_eq!(scheduler.pending(), 1);

        scheduler.run_frame();
        assert_eq!(registry.offset_of(1), Vec2::new(9.0, 3.0));
        assert_eq!(registry.pending_count(), 0);
    }

    #[test]
    fn test_leave_resets_offset() {
        let (scheduler, registry) = setup();

        registry.handle_move(Vec2::new(80.0, 60.0));
        scheduler.run_frame();
        assert_eq!(registry.offset_of(1), Vec2::new(9.0, 3.0));

        registry.handle_move(Vec2::new(0.0, 0.0));
        scheduler.run_frame();
        assert_eq!(registry.offset_of(1), Vec2::ZERO);
    }

    #[test]
    fn test_leave_before_commit_still_resets() {
        let (scheduler, registry) = setup();

        // Enter and leave within a single frame: the displacement frame
        // is canceled and only the reset commits.
        registry.handle_move(Vec2::new(80.0, 60.0));
        registry.handle_move(Vec2::new(0.0, 0.0));

        assert_eq!(scheduler.pending(), 1);
        scheduler.run_frame();
        assert_eq!(registry.offset_of(1), Vec2::ZERO);
    }

    #[test]
    fn test_move_outside_without_hover_schedules_nothing() {
        let (scheduler, registry) = setup();

        registry.handle_move(Vec2::new(0.0, 0.0));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_offset_of_unknown_id_is_origin() {
        let (_scheduler, registry) = setup();
        assert_eq!(registry.offset_of(99), Vec2::ZERO);
    }

    #[test]
    fn test_independent_targets() {
        let scheduler = Rc::new(FrameScheduler::new());
        let registry = MagneticRegistry::new(scheduler.clone(), 0.3);
        registry.register_targets(&[
            MagneticTarget::new(1, Rect::new(0, 0, 10, 10)),
            MagneticTarget::new(2, Rect::new(10, 30, 80, 40)),
        ]);

        registry.handle_move(Vec2::new(80.0, 60.0));
        scheduler.run_frame();

        assert_eq!(registry.offset_of(1), Vec2::ZERO);
        assert_eq!(registry.offset_of(2), Vec2::new(9.0, 3.0));
    }

    #[test]
    fn test_teardown_cancels_and_clears() {
        let (scheduler, registry) = setup();

        registry.handle_move(Vec2::new(80.0, 60.0));
        assert_eq!(scheduler.pending(), 1);

        registry.teardown();

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(registry.target_count(), 0);
        assert_eq!(registry.offset_of(1), Vec2::ZERO);
    }

    #[test]
    fn test_teardown_twice_is_safe() {
        let (_scheduler, registry) = setup();
        registry.teardown();
        registry.teardown();
        assert_eq!(registry.target_count(), 0);
    }

    #[test]
    fn test_reregister_replaces_snapshot() {
        let (_scheduler, registry) = setup();

        registry.register_targets(&[MagneticTarget::new(7, Rect::new(0, 0, 5, 5))]);

        assert_eq!(registry.target_count(), 1);
        assert_eq!(registry.offset_of(1), Vec2::ZERO);
    }

    proptest! {
        // Any burst of in-rect moves within one frame leaves exactly one
        // frame outstanding, and only the last move commits.
        #[test]
        fn prop_move_bursts_coalesce(
            moves in prop::collection::vec((10u16..90, 30u16..70), 1..20),
        ) {
            let (scheduler, registry) = setup();

            for (x, y) in &moves {
                registry.handle_move(Vec2::from_cell(*x, *y));
            }

            prop_assert_eq!(registry.pending_count(), 1);
            prop_assert_eq!(scheduler.pending(), 1);

            scheduler.run_frame();

            let (lx, ly) = *moves.last().unwrap();
            let center = Rect::new(10, 30, 80, 40).center();
            let expected = (Vec2::from_cell(lx, ly) - center).scaled(0.3);
            prop_assert_eq!(registry.offset_of(1), expected);
            prop_assert_eq!(registry.pending_count(), 0);
        }
    }
}
