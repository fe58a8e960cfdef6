//! Ball path prediction
//!
//! Traces the ball's future path through ideal wall reflections until it
//! reaches one of the paddle planes. The AI aims at the end of the path.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::ray::{RayHit, Segment, ray_segment};
use super::ring::RingBuffer;
use crate::consts::BOUNCE_PATH_CAPACITY;

/// Predicted reflection points; index 0 is the ball's position at prediction time
pub type BouncePath = RingBuffer<Vec2, BOUNCE_PATH_CAPACITY>;

/// The four segments enclosing the ball-centre travel area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundaries {
    pub top: Segment,
    pub bottom: Segment,
    pub left: Segment,
    pub right: Segment,
}

impl Boundaries {
    pub fn from_rect(area: &Rect) -> Self {
        let tl = Vec2::new(area.left(), area.top());
        let tr = Vec2::new(area.right(), area.top());
        let bl = Vec2::new(area.left(), area.bottom());
        let br = Vec2::new(area.right(), area.bottom());
        Self {
            top: Segment::new(tl, tr),
            bottom: Segment::new(bl, br),
            left: Segment::new(tl, bl),
            right: Segment::new(tr, br),
        }
    }

    /// All four segments, for debug drawing
    pub fn segments(&self) -> [Segment; 4] {
        [self.top, self.bottom, self.left, self.right]
    }
}

/// Which kind of boundary a trace step reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wall {
    /// Top or bottom: reflect and keep tracing
    Horizontal,
    /// Left or right: a paddle plane, the trace ends
    Side,
}

fn nearest(best: Option<(RayHit, Wall)>, candidate: Option<RayHit>, wall: Wall) -> Option<(RayHit, Wall)> {
    match (best, candidate) {
        (Some((b, _)), Some(c)) if c.t < b.t => Some((c, wall)),
        (None, Some(c)) => Some((c, wall)),
        (best, _) => best,
    }
}

/// Rebuild `path` from `origin` moving along `dir`
///
/// Only the segments the direction is heading toward are tested. Side walls
/// are tested first so a corner hit ends the trace.
pub fn predict_bounce_path(origin: Vec2, dir: Vec2, bounds: &Boundaries, path: &mut BouncePath) {
    path.clear();
    if path.push_back(origin).is_err() {
        return;
    }

    let mut pos = origin;
    let mut dir = dir;

    while !path.is_full() {
        let mut best = None;
        if dir.x < 0.0 {
            best = nearest(best, ray_segment(pos, dir, &bounds.left), Wall::Side);
        } else if dir.x > 0.0 {
            best = nearest(best, ray_segment(pos, dir, &bounds.right), Wall::Side);
        }
        if dir.y < 0.0 {
            best = nearest(best, ray_segment(pos, dir, &bounds.top), Wall::Horizontal);
        } else if dir.y > 0.0 {
            best = nearest(best, ray_segment(pos, dir, &bounds.bottom), Wall::Horizontal);
        }

        let Some((hit, wall)) = best else {
            break;
        };
        if path.push_back(hit.point).is_err() {
            break;
        }
        match wall {
            Wall::Side => break,
            Wall::Horizontal => {
                pos = hit.point;
                dir.y = -dir.y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> Boundaries {
        Boundaries::from_rect(&Rect::new(0.0, 0.0, 400.0, 300.0))
    }

    #[test]
    fn test_straight_shot_ends_at_side() {
        let mut path = BouncePath::new();
        predict_bounce_path(Vec2::new(200.0, 150.0), Vec2::X, &field(), &mut path);
        assert_eq!(path.len(), 2);
        assert_eq!(path.front(), Some(&Vec2::new(200.0, 150.0)));
        assert!((*path.back().unwrap() - Vec2::new(400.0, 150.0)).length() < 1e-3);
    }

    #[test]
    fn test_single_wall_bounce() {
        let mut path = BouncePath::new();
        let dir = Vec2::new(1.0, -1.0).normalize();
        predict_bounce_path(Vec2::new(100.0, 100.0), dir, &field(), &mut path);
        let points = path.to_vec();
        assert_eq!(points.len(), 3);
        // Hits the top at x = 200, then comes down to the right side at y = 200
        assert!((points[1] - Vec2::new(200.0, 0.0)).length() < 1e-2);
        assert!((points[2] - Vec2::new(400.0, 200.0)).length() < 1e-2);
    }

    #[test]
    fn test_steep_shot_is_capped() {
        let mut path = BouncePath::new();
        let dir = Vec2::new(0.001, 1.0).normalize();
        predict_bounce_path(Vec2::new(200.0, 150.0), dir, &field(), &mut path);
        assert!(path.is_full());
        assert_eq!(path.len(), BOUNCE_PATH_CAPACITY);
    }

    #[test]
    fn test_vertical_shot_never_terminates_at_side() {
        let mut path = BouncePath::new();
        predict_bounce_path(Vec2::new(200.0, 150.0), Vec2::Y, &field(), &mut path);
        assert!(path.is_full());
        for p in path.iter().skip(1) {
            assert!(p.y == 0.0 || p.y == 300.0);
        }
    }

    #[test]
    fn test_boundaries_segments() {
        let b = field();
        assert_eq!(b.left.start, Vec2::ZERO);
        assert_eq!(b.right.end, Vec2::new(400.0, 300.0));
        assert_eq!(b.segments().len(), 4);
    }

    proptest! {
        #[test]
        fn prediction_is_idempotent(
            x in 1.0f32..399.0,
            y in 1.0f32..299.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let dir = Vec2::new(angle.cos(), angle.sin());
            let mut first = BouncePath::new();
            let mut second = BouncePath::new();
            predict_bounce_path(Vec2::new(x, y), dir, &field(), &mut first);
            predict_bounce_path(Vec2::new(x, y), dir, &field(), &mut second);
            prop_assert_eq!(first.to_vec(), second.to_vec());
            prop_assert!(first.len() <= BOUNCE_PATH_CAPACITY);
        }
    }
}
