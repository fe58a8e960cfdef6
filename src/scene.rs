//! Draw list handed to an external renderer
//!
//! Screens describe a frame as a flat list of primitives in screen space.
//! Nothing here touches a graphics API.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Rect;

/// Linear RGBA color
pub type Tint = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Tint;

    pub const BACKGROUND: Tint = [0.02, 0.02, 0.05, 1.0];
    pub const PADDLE: Tint = [0.2, 0.8, 0.4, 1.0];
    pub const BALL: Tint = [1.0, 1.0, 1.0, 1.0];
    pub const TARGET: Tint = [0.4, 0.7, 1.0, 1.0];
    pub const TARGET_HIT: Tint = [1.0, 0.4, 0.2, 1.0];
    pub const SNAKE: Tint = [0.2, 0.8, 0.4, 1.0];
    pub const FOOD: Tint = [0.9, 0.85, 0.3, 1.0];
    pub const TEXT: Tint = [0.9, 0.9, 0.9, 1.0];
    pub const HIGHLIGHT: Tint = [0.9, 0.85, 0.3, 1.0];
    // Debug overlay
    pub const PATH: Tint = [1.0, 0.2, 0.2, 1.0];
    pub const BOUNDARY: Tint = [0.3, 0.3, 0.4, 1.0];
    pub const NORMAL: Tint = [0.6, 0.2, 0.8, 1.0];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        tint: Tint,
        alpha: f32,
        /// Outline only when false
        filled: bool,
    },
    Line {
        from: Vec2,
        to: Vec2,
        tint: Tint,
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        tint: Tint,
        alpha: f32,
    },
    Text {
        text: String,
        /// Top-left, or centre when `centered`
        pos: Vec2,
        size: f32,
        tint: Tint,
        alpha: f32,
        centered: bool,
    },
}

impl DrawCommand {
    pub fn alpha(&self) -> f32 {
        match self {
            DrawCommand::Rect { alpha, .. }
            | DrawCommand::Line { alpha, .. }
            | DrawCommand::Circle { alpha, .. }
            | DrawCommand::Text { alpha, .. } => *alpha,
        }
    }
}

pub type DrawList = Vec<DrawCommand>;

/// Convenience pushes used by the screens
pub trait DrawListExt {
    fn rect(&mut self, rect: Rect, tint: Tint, alpha: f32);
    fn outline(&mut self, rect: Rect, tint: Tint, alpha: f32);
    fn line(&mut self, from: Vec2, to: Vec2, tint: Tint, alpha: f32);
    fn circle(&mut self, center: Vec2, radius: f32, tint: Tint, alpha: f32);
    fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, tint: Tint, alpha: f32);
    fn text_centered(&mut self, text: impl Into<String>, pos: Vec2, size: f32, tint: Tint, alpha: f32);
    /// Connect consecutive points with lines
    fn polyline(&mut self, points: &[Vec2], tint: Tint, alpha: f32);
}

impl DrawListExt for DrawList {
    fn rect(&mut self, rect: Rect, tint: Tint, alpha: f32) {
        self.push(DrawCommand::Rect {
            rect,
            tint,
            alpha,
            filled: true,
        });
    }

    fn outline(&mut self, rect: Rect, tint: Tint, alpha: f32) {
        self.push(DrawCommand::Rect {
            rect,
            tint,
            alpha,
            filled: false,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, tint: Tint, alpha: f32) {
        self.push(DrawCommand::Line {
            from,
            to,
            tint,
            alpha,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, tint: Tint, alpha: f32) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            tint,
            alpha,
        });
    }

    fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, tint: Tint, alpha: f32) {
        self.push(DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            tint,
            alpha,
            centered: false,
        });
    }

    fn text_centered(&mut self, text: impl Into<String>, pos: Vec2, size: f32, tint: Tint, alpha: f32) {
        self.push(DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            tint,
            alpha,
            centered: true,
        });
    }

    fn polyline(&mut self, points: &[Vec2], tint: Tint, alpha: f32) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], tint, alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_emits_one_line_per_pair() {
        let mut list = DrawList::new();
        let points = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        list.polyline(&points, colors::PATH, 1.0);
        assert_eq!(list.len(), 3);
        assert_eq!(
            list[1],
            DrawCommand::Line {
                from: Vec2::X,
                to: Vec2::ONE,
                tint: colors::PATH,
                alpha: 1.0,
            }
        );
    }

    #[test]
    fn test_polyline_short_input_is_empty() {
        let mut list = DrawList::new();
        list.polyline(&[Vec2::ZERO], colors::PATH, 1.0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_outline_is_not_filled() {
        let mut list = DrawList::new();
        list.outline(Rect::new(0.0, 0.0, 4.0, 4.0), colors::BOUNDARY, 0.5);
        match &list[0] {
            DrawCommand::Rect { filled, alpha, .. } => {
                assert!(!filled);
                assert_eq!(*alpha, 0.5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_text_alpha() {
        let mut list = DrawList::new();
        list.text_centered("PONG", Vec2::new(400.0, 100.0), 40.0, colors::TEXT, 0.25);
        assert_eq!(list[0].alpha(), 0.25);
    }
}
