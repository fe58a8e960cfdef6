//! Axis-aligned rectangle geometry
//!
//! Screen space: origin at top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (x, y is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Move the top-left corner to `origin`, keeping the size
    #[inline]
    pub fn set_origin(&mut self, origin: Vec2) {
        self.x = origin.x;
        self.y = origin.y;
    }

    /// Copy of this rectangle displaced by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.x + dx,
            self.y + dy,
            (self.width - 2.0 * dx).max(0.0),
            (self.height - 2.0 * dy).max(0.0),
        )
    }

    /// Closed-interval overlap test (touching edges count as overlapping)
    pub fn overlaps(&self, other: &Rect) -> bool {
        let separated_x = self.right() < other.left() || self.left() > other.right();
        let separated_y = self.bottom() < other.top() || self.top() > other.bottom();
        !separated_x && !separated_y
    }

    /// Bounding rectangle covering this rectangle before and after moving by `vel`
    ///
    /// Broad-phase helper only; never used to decide a final position.
    pub fn swept(&self, vel: Vec2) -> Rect {
        let (x, width) = sweep_axis(self.x, self.width, vel.x);
        let (y, height) = sweep_axis(self.y, self.height, vel.y);
        Rect::new(x, y, width, height)
    }
}

#[inline]
fn sweep_axis(origin: f32, size: f32, delta: f32) -> (f32, f32) {
    if delta > 0.0 {
        (origin, size + delta)
    } else {
        (origin + delta, size - delta)
    }
}
