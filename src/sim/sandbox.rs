//! Collision-response sandbox
//!
//! A box steered by the player against one stationary rectangle. Contacts
//! snap the box to the struck face and slide it along that face for the rest
//! of the step.

use glam::Vec2;

use super::collision::{CollisionData, slide_velocity, snap_to_contact, sweep};
use super::geom::Rect;
use super::state::Entity;
use crate::settings::SandboxTuning;

#[derive(Debug, Clone)]
pub struct SandboxState {
    pub field: Rect,
    /// Stationary obstacle
    pub target: Rect,
    /// Player-driven box
    pub mover: Entity,
    /// Contact from the most recent tick, if any
    pub last_contact: Option<CollisionData>,
}

impl SandboxState {
    pub fn new(tuning: &SandboxTuning, width: f32, height: f32) -> Self {
        let field = Rect::new(0.0, 0.0, width, height);
        let target = Rect::from_center(
            field.center(),
            Vec2::new(tuning.target_width, tuning.target_height),
        );
        let mut mover = Entity::new(Rect::new(
            (width - tuning.box_size) / 2.0,
            0.0,
            tuning.box_size,
            tuning.box_size,
        ));
        mover.speed = tuning.box_speed;

        Self {
            field,
            target,
            mover,
            last_contact: None,
        }
    }

    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.last_contact.is_some()
    }

    /// Move the box by `input` (any length; normalized here) for `dt` seconds
    pub fn tick(&mut self, input: Vec2, dt: f32) {
        self.mover.dir = input.normalize_or_zero();
        let vel = self.mover.velocity(dt);

        let data = sweep(&self.mover.rect, vel, &self.target);
        let vel = if data.hit {
            self.mover.rect = snap_to_contact(&self.mover.rect, &data, &self.target);
            log::trace!("Sandbox contact at t={:.3} normal={}", data.time, data.contact_normal);
            slide_velocity(vel, data.contact_normal, data.remaining())
        } else {
            vel
        };
        self.last_contact = data.hit.then_some(data);

        let moved = self.mover.rect.translated(vel);
        self.mover.rect.x = moved.x.clamp(self.field.left(), (self.field.right() - moved.width).max(self.field.left()));
        self.mover.rect.y = moved.y.clamp(self.field.top(), (self.field.bottom() - moved.height).max(self.field.top()));
    }
}
