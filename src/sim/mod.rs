//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod bounce;
pub mod collision;
pub mod geom;
pub mod ray;
pub mod ring;
pub mod sandbox;
pub mod snake;
pub mod state;
pub mod tick;

pub use bounce::{Boundaries, BouncePath, predict_bounce_path};
pub use collision::{
    CollisionData, broad_phase, reflect_velocity, slide_velocity, snap_to_contact, sweep,
    swept_aabb,
};
pub use geom::Rect;
pub use ray::{RayHit, Segment, ray_segment};
pub use ring::{CapacityError, RingBuffer};
pub use sandbox::SandboxState;
pub use snake::{Direction, SnakePiece, SnakeState};
pub use state::{Entity, GameEvent, GamePhase, GameState, Side};
pub use tick::{TickInput, tick};
