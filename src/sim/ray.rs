//! Ray vs. line segment intersection

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PARALLEL_EPSILON;

/// A finite line segment
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Vector from start to end
    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.end - self.start
    }
}

/// Where a ray crossed a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec2,
    /// Ray parameter, in multiples of the ray direction's length
    pub t: f32,
}

/// Intersect the ray `origin + t * dir` (t >= 0) with `segment`
///
/// `dir` need not be normalized; `t` is measured in units of its length.
/// Parallel rays never intersect, even when coincident with the segment.
pub fn ray_segment(origin: Vec2, dir: Vec2, segment: &Segment) -> Option<RayHit> {
    let seg_dir = segment.delta();
    let denom = dir.perp_dot(seg_dir);
    if denom.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let to_start = segment.start - origin;
    let t = to_start.perp_dot(seg_dir) / denom;
    let u = to_start.perp_dot(dir) / denom;

    if t < 0.0 || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(RayHit {
        point: origin + dir * t,
        t,
    })
}
