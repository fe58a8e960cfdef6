//! Pong game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounce::{Boundaries, BouncePath};
use super::collision::CollisionData;
use super::geom::Rect;
use crate::consts::WALL_THICKNESS;
use crate::settings::PongTuning;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball parked at the centre, counting down to the serve
    Serve,
    /// Ball in play
    Playing,
    /// A side reached the winning score
    GameOver,
}

/// Which half of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// +1 for right, -1 for left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Something that moves: a paddle or the ball
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Entity {
    pub rect: Rect,
    /// Unit direction (zero when at rest)
    pub dir: Vec2,
    /// Scalar speed (px/s)
    pub speed: f32,
}

impl Entity {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            dir: Vec2::ZERO,
            speed: 0.0,
        }
    }

    /// Displacement for a step of `dt` seconds
    #[inline]
    pub fn velocity(&self, dt: f32) -> Vec2 {
        self.dir * self.speed * dt
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Served { toward: Side },
    PaddleHit { side: Side },
    WallHit,
    Scored { side: Side },
    MatchOver { winner: Side },
}

/// Complete Pong state, owned by the game screen
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: PongTuning,
    /// Play field (the screen)
    pub field: Rect,
    /// Top and bottom walls, just outside the field
    pub walls: [Rect; 2],
    /// Ball-centre travel area used for path prediction
    pub boundaries: Boundaries,
    /// Indexed by `Side::index`
    pub paddles: [Entity; 2],
    pub ball: Entity,
    /// Predicted path of the ball, rebuilt on every direction change
    pub bounce_path: BouncePath,
    /// Paddle-centre y each AI wants to reach, indexed by `Side::index`
    pub ai_targets: [f32; 2],
    pub score: [u32; 2],
    pub phase: GamePhase,
    /// Seconds until the next serve
    pub serve_timer: f32,
    /// Side the next serve travels toward
    pub serve_toward: Side,
    /// Most recent ball contact, for the debug overlay
    pub last_contact: Option<CollisionData>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    pub fn new(tuning: PongTuning, width: f32, height: f32, seed: u64) -> Self {
        let field = Rect::new(0.0, 0.0, width, height);
        let paddle_size = Vec2::new(tuning.paddle_width, tuning.paddle_height);
        let mid_y = field.center().y;

        let left = Rect::from_center(
            Vec2::new(field.left() + tuning.paddle_margin + paddle_size.x / 2.0, mid_y),
            paddle_size,
        );
        let right = Rect::from_center(
            Vec2::new(field.right() - tuning.paddle_margin - paddle_size.x / 2.0, mid_y),
            paddle_size,
        );

        let walls = [
            Rect::new(
                field.left() - WALL_THICKNESS,
                field.top() - WALL_THICKNESS,
                field.width + 2.0 * WALL_THICKNESS,
                WALL_THICKNESS,
            ),
            Rect::new(
                field.left() - WALL_THICKNESS,
                field.bottom(),
                field.width + 2.0 * WALL_THICKNESS,
                WALL_THICKNESS,
            ),
        ];

        // The ball centre bounces between the paddle faces and the walls,
        // each inset by half a ball.
        let half_ball = tuning.ball_size / 2.0;
        let travel = Rect::new(
            left.right() + half_ball,
            field.top() + half_ball,
            (right.left() - left.right() - tuning.ball_size).max(0.0),
            (field.height - tuning.ball_size).max(0.0),
        );

        let ball = Entity::new(Rect::from_center(
            field.center(),
            Vec2::splat(tuning.ball_size),
        ));

        let mut rng = Pcg32::seed_from_u64(seed);
        let serve_toward = if rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };

        let mut bounce_path = BouncePath::new();
        let _ = bounce_path.push_back(ball.center());

        Self {
            serve_timer: tuning.serve_delay,
            tuning,
            field,
            walls,
            boundaries: Boundaries::from_rect(&travel),
            paddles: [Entity::new(left), Entity::new(right)],
            ball,
            bounce_path,
            ai_targets: [mid_y; 2],
            score: [0; 2],
            phase: GamePhase::Serve,
            serve_toward,
            last_contact: None,
            time_ticks: 0,
            events: Vec::new(),
            rng,
        }
    }

    #[inline]
    pub fn paddle(&self, side: Side) -> &Entity {
        &self.paddles[side.index()]
    }

    #[inline]
    pub fn score_of(&self, side: Side) -> u32 {
        self.score[side.index()]
    }

    /// Park the ball at the centre and start the serve countdown
    pub fn reset_ball(&mut self, toward: Side) {
        self.ball.rect = Rect::from_center(self.field.center(), self.ball.rect.size());
        self.ball.dir = Vec2::ZERO;
        self.ball.speed = 0.0;
        self.serve_toward = toward;
        self.serve_timer = self.tuning.serve_delay;
        self.phase = GamePhase::Serve;
        self.last_contact = None;
        self.bounce_path.clear();
        let _ = self.bounce_path.push_back(self.ball.center());
        self.ai_targets = [self.field.center().y; 2];
    }

    /// Zero the score and serve again
    pub fn reset_match(&mut self) {
        self.score = [0; 2];
        let toward = self.serve_toward;
        self.reset_ball(toward);
        log::info!("New match");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(PongTuning::default(), 800.0, 600.0, 7)
    }

    #[test]
    fn test_layout() {
        let s = state();
        let t = PongTuning::default();
        assert_eq!(s.paddle(Side::Left).rect.x, t.paddle_margin);
        assert_eq!(s.paddle(Side::Right).rect.right(), 800.0 - t.paddle_margin);
        assert_eq!(s.ball.center(), Vec2::new(400.0, 300.0));
        assert_eq!(s.walls[0].bottom(), 0.0);
        assert_eq!(s.walls[1].top(), 600.0);
        // Travel area starts half a ball in front of the left paddle face
        assert_eq!(
            s.boundaries.left.start.x,
            s.paddle(Side::Left).rect.right() + t.ball_size / 2.0
        );
        assert_eq!(s.phase, GamePhase::Serve);
        assert_eq!(s.bounce_path.len(), 1);
    }

    #[test]
    fn test_entity_velocity() {
        let mut e = Entity::new(Rect::new(0.0, 0.0, 1.0, 1.0));
        e.dir = Vec2::new(0.6, 0.8);
        e.speed = 100.0;
        let v = e.velocity(0.5);
        assert!((v - Vec2::new(30.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn test_reset_match_clears_score() {
        let mut s = state();
        s.score = [3, 4];
        s.phase = GamePhase::GameOver;
        s.reset_match();
        assert_eq!(s.score, [0, 0]);
        assert_eq!(s.phase, GamePhase::Serve);
        assert_eq!(s.ball.speed, 0.0);
    }

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.index(), 1);
        assert_eq!(Side::Left.sign(), -1.0);
    }
}
