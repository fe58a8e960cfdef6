//! Continuous collision detection for axis-aligned rectangles
//!
//! The core of every variant: a moving rectangle is swept over one simulation
//! step against a stationary target, yielding the time of impact, the contact
//! position and the normal of the struck face. Broad phase is a cheap overlap
//! test against the swept bounding rectangle; narrow phase is the swept AABB.

use glam::Vec2;

use super::geom::Rect;

/// Result of a swept AABB query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionData {
    /// Whether the mover touches the target during the step
    pub hit: bool,
    /// Fraction of the step at first contact, in [0, 1] (1.0 on a miss)
    pub time: f32,
    /// Mover's origin at the moment of first contact
    pub contact_point: Vec2,
    /// Face normal of the struck side, pointing back toward the mover
    pub contact_normal: Vec2,
}

impl CollisionData {
    pub fn miss() -> Self {
        Self {
            hit: false,
            time: 1.0,
            contact_point: Vec2::ZERO,
            contact_normal: Vec2::ZERO,
        }
    }

    /// Fraction of the step left after the contact
    #[inline]
    pub fn remaining(&self) -> f32 {
        1.0 - self.time
    }
}

/// Broad phase: could `rect` moving by `vel` touch `target` at all this step?
#[inline]
pub fn broad_phase(rect: &Rect, vel: Vec2, target: &Rect) -> bool {
    rect.swept(vel).overlaps(target)
}

/// Per-axis entry/exit times for one axis of the sweep
struct AxisSweep {
    /// Signed gap from the mover's leading edge to the target's near face
    near: f32,
    entry: f32,
    exit: f32,
}

/// Sweep one axis. `None` means the axis rules out any contact this step.
fn sweep_axis(pos: f32, size: f32, target_pos: f32, target_size: f32, v: f32) -> Option<AxisSweep> {
    let (near, far) = if v > 0.0 {
        (target_pos - (pos + size), (target_pos + target_size) - pos)
    } else {
        ((target_pos + target_size) - pos, target_pos - (pos + size))
    };

    if v == 0.0 {
        // A still axis never constrains the time, but the mover has to
        // already be inside the target's span on it.
        let inside = pos < target_pos + target_size && pos + size > target_pos;
        return inside.then_some(AxisSweep {
            near,
            entry: f32::NEG_INFINITY,
            exit: f32::INFINITY,
        });
    }

    Some(AxisSweep {
        near,
        entry: near / v,
        exit: far / v,
    })
}

/// Sign of the contact normal on the dominant axis
#[inline]
fn face_sign(near: f32, v: f32) -> f32 {
    if near < 0.0 || (near == 0.0 && v < 0.0) {
        1.0
    } else {
        -1.0
    }
}

/// Narrow phase: earliest time `rect` moving by `vel` touches `target`
///
/// `vel` is the full displacement for this step. Inputs are never mutated;
/// the caller snaps to `contact_point` and redirects using `contact_normal`.
pub fn swept_aabb(rect: &Rect, vel: Vec2, target: &Rect) -> CollisionData {
    let Some(x) = sweep_axis(rect.x, rect.width, target.x, target.width, vel.x) else {
        return CollisionData::miss();
    };
    let Some(y) = sweep_axis(rect.y, rect.height, target.y, target.height, vel.y) else {
        return CollisionData::miss();
    };

    let entry_time = x.entry.max(y.entry);
    let exit_time = x.exit.min(y.exit);

    if entry_time > exit_time
        || (x.entry < 0.0 && y.entry < 0.0)
        || x.entry > 1.0
        || y.entry > 1.0
    {
        return CollisionData::miss();
    }

    let contact_normal = if x.entry > y.entry {
        Vec2::new(face_sign(x.near, vel.x), 0.0)
    } else {
        Vec2::new(0.0, face_sign(y.near, vel.y))
    };

    CollisionData {
        hit: true,
        time: entry_time,
        contact_point: rect.origin() + vel * entry_time,
        contact_normal,
    }
}

/// Broad phase followed by the swept AABB
pub fn sweep(rect: &Rect, vel: Vec2, target: &Rect) -> CollisionData {
    if broad_phase(rect, vel, target) {
        swept_aabb(rect, vel, target)
    } else {
        CollisionData::miss()
    }
}

/// `rect` moved to the contact and made flush with the struck face
///
/// The contact point alone can land a rounding error inside the target,
/// which the next sweep would read as already overlapping.
pub fn snap_to_contact(rect: &Rect, data: &CollisionData, target: &Rect) -> Rect {
    let mut snapped = *rect;
    snapped.set_origin(data.contact_point);

    let n = data.contact_normal;
    if n.x < 0.0 {
        snapped.x = target.left() - snapped.width;
    } else if n.x > 0.0 {
        snapped.x = target.right();
    } else if n.y < 0.0 {
        snapped.y = target.top() - snapped.height;
    } else if n.y > 0.0 {
        snapped.y = target.bottom();
    }
    snapped
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Component of `velocity` along the struck face, scaled by the time left
///
/// Used for sliding responses: motion into the face is dropped, motion along
/// it is kept for the rest of the step.
#[inline]
pub fn slide_velocity(velocity: Vec2, normal: Vec2, remaining: f32) -> Vec2 {
    let tangent = Vec2::new(normal.y, normal.x);
    tangent * (velocity.dot(tangent) * remaining)
}
