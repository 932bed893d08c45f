//! pointer-fx - Pointer-driven interaction effects for terminal UIs
//!
//! Continuous pointer tracking, exponentially smoothed trailing cursors,
//! a magnetic hover pull for designated regions, and capability detection
//! that keeps all of it switched off on terminals that cannot (or should
//! not) animate.
//!
//! # Architecture
//!
//! - `capability` - Environment snapshot and the flag set gating everything
//! - `tracker` - Mouse capture lifecycle and the live pointer sample
//! - `frame` - Cancelable per-frame callback scheduler, pumped by the host
//! - `animator` - Smoothing loop driving the ring and follower positions
//! - `magnetic` - Per-target hover displacement with frame coalescing
//! - `compositor` - Pure derivation of the drawable effect frame
//! - `session` - The lifecycle object tying it all together
//! - `input` - crossterm event conversion and polling
//!
//! # Example
//!
//! ```ignore
//! use pointer_fx::{EffectsConfig, EffectsSession, Environment, MagneticTarget, Rect};
//! use pointer_fx::input::poll_event;
//! use std::time::Duration;
//!
//! let targets = [MagneticTarget::new(0, Rect::new(10, 5, 20, 3))];
//! let session = EffectsSession::start(
//!     Environment::capture(),
//!     &targets,
//!     EffectsConfig::default(),
//! )?;
//!
//! loop {
//!     if let Some(event) = poll_event(Duration::from_millis(16))? {
//!         session.handle_event(&event)?;
//!     }
//!     session.advance_frame();
//!     if let Some(frame) = session.compose() {
//!         // draw frame.glow / frame.ring / frame.follower,
//!         // shift targets by session.magnetic_offset(id)
//!     }
//! }
//! ```

pub mod animator;
pub mod capability;
pub mod compositor;
pub mod frame;
pub mod input;
pub mod magnetic;
pub mod session;
pub mod tracker;
pub mod types;

pub use capability::{detect, CapabilityState, Environment};
pub use compositor::{compose, EffectFrame, Glow};
pub use frame::{FrameHandle, FrameScheduler};
pub use input::InputEvent;
pub use session::EffectsSession;
pub use types::{EffectsConfig, MagneticTarget, Rect, Vec2};
