//! Swept Pong - arcade prototypes on top of continuous collision detection
//!
//! Core modules:
//! - `sim`: Deterministic simulation (swept-AABB solver, bounce prediction, game variants)
//! - `screen`: Menu/game screens and the fade state machine
//! - `scene`: Draw list handed to an external renderer
//! - `settings`: Data-driven game configuration

pub mod scene;
pub mod screen;
pub mod settings;
pub mod sim;

pub use screen::{FrameInput, KeySet, Screen, ScreenManager};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Capacity of the predicted bounce polyline (start point included)
    pub const BOUNCE_PATH_CAPACITY: usize = 20;
    /// Maximum number of snake pieces
    pub const SNAKE_MAX_PIECES: usize = 100;
    /// Maximum swept-AABB resolutions for the ball within one tick
    pub const MAX_BALL_RESOLVES: usize = 4;

    /// Tolerance for treating a ray and a segment as parallel
    pub const PARALLEL_EPSILON: f32 = 1.0e-6;
    /// Thickness of the invisible top/bottom wall rectangles
    pub const WALL_THICKNESS: f32 = 50.0;
}

/// Approximate float equality, scaled by magnitude
#[inline]
pub fn float_equals(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1.0e-6 * 1.0f32.max(a.abs().max(b.abs()))
}

/// Unit vector for an angle measured from +x, y pointing down
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Normalize `v`, falling back to `fallback` when `v` has no usable length
///
/// A zero vector would otherwise normalize to NaN and poison every
/// collision query downstream.
#[inline]
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(fallback)
}
