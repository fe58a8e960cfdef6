//! Grid snake
//!
//! Pieces glide continuously; turns happen at grid-aligned turning points
//! that are handed down the body one piece at a time.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ring::RingBuffer;
use crate::consts::SNAKE_MAX_PIECES;
use crate::float_equals;
use crate::settings::SnakeTuning;

/// Heading of a snake piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// One body segment
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SnakePiece {
    pub position: Vec2,
    /// Drawn size, grows toward one grid cell
    pub size: Vec2,
    pub direction: Direction,
    /// Where the pending turn happens
    pub next_point: Vec2,
    pub next_dir: Option<Direction>,
}

impl SnakePiece {
    pub fn new(position: Vec2, size: Vec2, direction: Direction) -> Self {
        Self {
            position,
            size,
            direction,
            next_point: position,
            next_dir: None,
        }
    }

    /// Has this piece reached or passed its turning point?
    fn ready_to_turn(&self) -> bool {
        let (p, n) = (self.position, self.next_point);
        match self.direction {
            Direction::Up => float_equals(p.x, n.x) && p.y < n.y,
            Direction::Right => p.x > n.x && float_equals(p.y, n.y),
            Direction::Down => float_equals(p.x, n.x) && p.y > n.y,
            Direction::Left => p.x < n.x && float_equals(p.y, n.y),
        }
    }
}

pub type SnakeBody = RingBuffer<SnakePiece, SNAKE_MAX_PIECES>;

#[derive(Debug, Clone)]
pub struct SnakeState {
    pub tuning: SnakeTuning,
    /// Grid columns and rows that fit the screen
    pub columns: u32,
    pub rows: u32,
    /// Head first
    pub pieces: SnakeBody,
    /// Grid-aligned food position
    pub food: Vec2,
    /// Number of pieces eaten this game
    pub eaten: u32,
    rng: Pcg32,
}

impl SnakeState {
    pub fn new(tuning: SnakeTuning, width: f32, height: f32, seed: u64) -> Self {
        let cell = Vec2::new(tuning.grid_width, tuning.grid_height);
        let columns = ((width / cell.x).floor() as u32).max(1);
        let rows = ((height / cell.y).floor() as u32).max(1);

        let mut pieces = SnakeBody::new();
        let count = tuning.initial_pieces.clamp(1, SNAKE_MAX_PIECES);
        for i in 0..count {
            let position = Vec2::new((count - i) as f32 * cell.x, 0.0);
            // Capacity was clamped above
            let _ = pieces.push_back(SnakePiece::new(position, cell, Direction::Right));
        }

        let mut state = Self {
            tuning,
            columns,
            rows,
            pieces,
            food: Vec2::ZERO,
            eaten: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.food = state.random_cell();
        state
    }

    #[inline]
    fn cell(&self) -> Vec2 {
        Vec2::new(self.tuning.grid_width, self.tuning.grid_height)
    }

    pub fn head(&self) -> Option<&SnakePiece> {
        self.pieces.front()
    }

    /// Grid cell the head is entering
    pub fn leader_point(&self) -> Vec2 {
        let cell = self.cell();
        let Some(head) = self.head() else {
            return Vec2::ZERO;
        };
        let mut point = head.position;
        if head.direction == Direction::Right {
            point.x += cell.x;
        }
        if head.direction == Direction::Down {
            point.y += cell.y;
        }
        (point / cell).floor() * cell
    }

    /// Turning is allowed only onto a perpendicular heading
    pub fn can_turn(&self, dir: Direction) -> bool {
        self.head()
            .is_some_and(|head| dir != head.direction && dir.opposite() != head.direction)
    }

    fn random_cell(&mut self) -> Vec2 {
        let cell = self.cell();
        let col = self.rng.random_range(0..self.columns);
        let row = self.rng.random_range(0..self.rows);
        Vec2::new(col as f32 * cell.x, row as f32 * cell.y)
    }

    /// Advance by `dt` seconds, applying `turn` to the head if it is legal
    pub fn tick(&mut self, turn: Option<Direction>, dt: f32) {
        if let Some(dir) = turn.filter(|d| self.can_turn(*d)) {
            let point = self.leader_point();
            if let Some(head) = self.pieces.get_mut(0) {
                head.next_dir = Some(dir);
                head.next_point = point;
            }
        }

        let cell = self.cell();
        let step = self.tuning.speed * dt;
        let grow = (10.0 * dt).min(1.0);
        let len = self.pieces.len();

        // Tail first so a handed-down turn waits for the next tick
        for i in (0..len).rev() {
            let Some(piece) = self.pieces.get_mut(i) else {
                continue;
            };
            piece.size = piece.size.lerp(cell, grow);
            piece.position += piece.direction.vector() * step;

            let Some(next_dir) = piece.next_dir else {
                continue;
            };
            if !piece.ready_to_turn() {
                continue;
            }
            let next_point = piece.next_point;
            piece.position = next_point;
            piece.direction = next_dir;
            piece.next_dir = None;

            if let Some(behind) = self.pieces.get_mut(i + 1) {
                behind.next_dir = Some(next_dir);
                behind.next_point = next_point;
            }
        }

        if self.leader_point() == self.food {
            self.eat();
        }
    }

    /// Grow by one piece behind the tail and place new food
    fn eat(&mut self) {
        self.eaten += 1;
        self.food = self.random_cell();

        let Some(&last) = self.pieces.back() else {
            return;
        };
        let cell = self.cell();
        let mut piece = last;
        piece.position -= last.direction.vector() * cell;
        piece.size = cell / 5.0;

        match self.pieces.push_back(piece) {
            Ok(()) => log::debug!("Snake grew to {} pieces", self.pieces.len()),
            Err(e) => log::warn!("Snake cannot grow: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn snake() -> SnakeState {
        let mut s = SnakeState::new(SnakeTuning::default(), 800.0, 600.0, 42);
        // Park the food out of the way
        s.food = Vec2::new(780.0, 580.0);
        s
    }

    #[test]
    fn test_initial_layout() {
        let s = snake();
        assert_eq!(s.columns, 40);
        assert_eq!(s.rows, 30);
        let positions: Vec<_> = s.pieces.iter().map(|p| p.position).collect();
        assert_eq!(
            positions,
            vec![Vec2::new(60.0, 0.0), Vec2::new(40.0, 0.0), Vec2::new(20.0, 0.0)]
        );
        assert_eq!(s.leader_point(), Vec2::new(80.0, 0.0));
    }

    #[test]
    fn test_food_is_on_grid() {
        let mut s = SnakeState::new(SnakeTuning::default(), 800.0, 600.0, 7);
        for _ in 0..20 {
            let food = s.random_cell();
            assert_eq!(food.x % 20.0, 0.0);
            assert_eq!(food.y % 20.0, 0.0);
            assert!(food.x < 800.0 && food.y < 600.0);
        }
    }

    #[test]
    fn test_reverse_and_same_direction_rejected() {
        let s = snake();
        assert!(!s.can_turn(Direction::Right));
        assert!(!s.can_turn(Direction::Left));
        assert!(s.can_turn(Direction::Down));
        assert!(s.can_turn(Direction::Up));
    }

    #[test]
    fn test_moves_continuously() {
        let mut s = snake();
        s.tick(None, 0.5);
        assert!(float_equals(s.head().unwrap().position.x, 85.0));
    }

    #[test]
    fn test_turn_propagates_down_the_body() {
        let mut s = snake();
        s.tick(Some(Direction::Down), DT);
        let head = *s.head().unwrap();
        assert_eq!(head.next_dir, Some(Direction::Down));
        assert_eq!(head.next_point, Vec2::new(80.0, 0.0));

        // Long enough for every piece to pass the turning point
        for _ in 0..300 {
            s.tick(None, DT);
        }
        for piece in s.pieces.iter() {
            assert_eq!(piece.direction, Direction::Down);
            assert!(float_equals(piece.position.x, 80.0));
            assert_eq!(piece.next_dir, None);
        }
        // Body stays one cell apart
        let ys: Vec<_> = s.pieces.iter().map(|p| p.position.y).collect();
        for pair in ys.windows(2) {
            assert!((pair[0] - pair[1] - 20.0).abs() < 1.0);
        }
    }

    #[test]
    fn test_eating_grows_the_tail() {
        let mut s = snake();
        s.food = Vec2::new(80.0, 0.0);
        s.tick(None, DT);
        assert_eq!(s.pieces.len(), 4);
        assert_eq!(s.eaten, 1);
        let tail = *s.pieces.back().unwrap();
        let before_tail = *s.pieces.get(2).unwrap();
        assert!(float_equals(tail.position.x, before_tail.position.x - 20.0));
        assert_eq!(tail.size, Vec2::splat(4.0));
    }

    #[test]
    fn test_full_body_stops_growing() {
        let mut s = snake();
        for _ in 0..(SNAKE_MAX_PIECES + 5) {
            s.eat();
        }
        assert_eq!(s.pieces.len(), SNAKE_MAX_PIECES);
        assert!(s.pieces.is_full());
    }
}
