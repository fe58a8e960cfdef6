//! Pong simulation tick
//!
//! Advances the match by one step: paddles first, then the ball is swept
//! against paddles and walls, resolving the earliest contact each pass.

use glam::Vec2;
use rand::Rng;

use super::bounce::predict_bounce_path;
use super::collision::{CollisionData, reflect_velocity, snap_to_contact, sweep};
use super::geom::Rect;
use super::state::{GameEvent, GamePhase, GameState, Side};
use crate::consts::MAX_BALL_RESOLVES;
use crate::{direction_from_angle, normalize_or};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Vertical input for the left paddle: -1 up, +1 down
    pub paddle_axis: f32,
    /// Demo mode - the AI drives the left paddle too
    pub autopilot: bool,
    /// Start a new match once the current one is over
    pub restart: bool,
}

/// What the ball ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contact {
    Paddle(Side),
    Wall,
}

/// Advance the match by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.reset_match();
        }
        return;
    }

    state.time_ticks += 1;

    // Paddles
    if input.autopilot {
        let target = state.ai_targets[Side::Left.index()];
        move_paddle_toward(state, Side::Left, target, dt);
    } else {
        let speed = state.tuning.paddle_speed;
        move_paddle(state, Side::Left, input.paddle_axis.clamp(-1.0, 1.0), speed, dt);
    }
    let target = state.ai_targets[Side::Right.index()];
    move_paddle_toward(state, Side::Right, target, dt);

    match state.phase {
        GamePhase::Serve => {
            state.serve_timer -= dt;
            if state.serve_timer <= 0.0 {
                serve(state);
            }
        }
        GamePhase::Playing => {
            step_ball(state, dt);
            check_score(state);
        }
        GamePhase::GameOver => {}
    }
}

/// Move a paddle vertically, kept inside the field
fn move_paddle(state: &mut GameState, side: Side, axis: f32, speed: f32, dt: f32) {
    let field = state.field;
    let paddle = &mut state.paddles[side.index()];
    paddle.dir = Vec2::new(0.0, axis);
    paddle.speed = speed;

    let moved = paddle.rect.translated(paddle.velocity(dt));
    paddle.rect.y = moved.y.clamp(field.top(), (field.bottom() - moved.height).max(field.top()));
}

/// Steer a paddle's centre toward `target_y` without overshooting
fn move_paddle_toward(state: &mut GameState, side: Side, target_y: f32, dt: f32) {
    let speed = state.tuning.ai_speed;
    let delta = target_y - state.paddle(side).center().y;
    if delta.abs() <= state.tuning.ai_dead_zone {
        move_paddle(state, side, 0.0, speed, dt);
        return;
    }
    let step = speed * dt;
    let speed = if delta.abs() < step && dt > 0.0 {
        delta.abs() / dt
    } else {
        speed
    };
    move_paddle(state, side, delta.signum(), speed, dt);
}

/// Launch the ball from the centre toward `serve_toward`
fn serve(state: &mut GameState) {
    let max = state.tuning.max_serve_angle.abs();
    let angle = if max > 0.0 {
        state.rng.random_range(-max..=max)
    } else {
        0.0
    };
    let toward = state.serve_toward;
    let raw = direction_from_angle(angle) * Vec2::new(toward.sign(), 1.0);
    let fallback = Vec2::new(toward.sign(), 0.0);

    state.ball.dir = normalize_or(raw, fallback);
    state.ball.speed = state.tuning.ball_start_speed;
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Served { toward });
    log::debug!("Serve toward {:?} at {:.2} rad", toward, angle);

    retarget(state);
}

/// Earliest contact along `vel` among paddles and walls
fn earliest_contact(state: &GameState, vel: Vec2) -> Option<(Contact, Rect, CollisionData)> {
    let ball = &state.ball.rect;
    let candidates = [
        (Contact::Paddle(Side::Left), state.paddles[0].rect),
        (Contact::Paddle(Side::Right), state.paddles[1].rect),
        (Contact::Wall, state.walls[0]),
        (Contact::Wall, state.walls[1]),
    ];

    candidates
        .iter()
        .map(|(contact, target)| (*contact, *target, sweep(ball, vel, target)))
        .filter(|(_, _, data)| data.hit)
        .min_by(|a, b| a.2.time.total_cmp(&b.2.time))
}

/// Move the ball for one step, bouncing off whatever it meets on the way
fn step_ball(state: &mut GameState, dt: f32) {
    let mut vel = state.ball.velocity(dt);
    let mut redirected = false;
    let mut settled = false;

    for _ in 0..MAX_BALL_RESOLVES {
        let Some((contact, target, data)) = earliest_contact(state, vel) else {
            settled = true;
            break;
        };

        state.ball.rect = snap_to_contact(&state.ball.rect, &data, &target);
        match contact {
            Contact::Paddle(side) => bounce_off_paddle(state, side, data.contact_normal),
            Contact::Wall => {
                state.ball.dir = reflect_velocity(state.ball.dir, data.contact_normal);
                state.events.push(GameEvent::WallHit);
            }
        }
        state.last_contact = Some(data);
        redirected = true;

        // Spend what is left of the step with the new velocity
        vel = state.ball.velocity(dt) * data.remaining();
    }

    if settled {
        state.ball.rect = state.ball.rect.translated(vel);
    } else {
        log::warn!("Ball still colliding after {} resolves, dropping remainder", MAX_BALL_RESOLVES);
    }

    if redirected {
        retarget(state);
    }
}

/// Redirect the ball after a paddle contact
///
/// Face hits leave at an angle set by how far from the paddle centre the
/// ball struck and speed up; hits on a paddle's end just reflect.
fn bounce_off_paddle(state: &mut GameState, side: Side, normal: Vec2) {
    if normal.x != 0.0 {
        let paddle = state.paddle(side).rect;
        let reach = (paddle.height + state.ball.rect.height) / 2.0;
        let offset = if reach > 0.0 {
            ((state.ball.center().y - paddle.center().y) / reach).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let angle = offset * state.tuning.max_bounce_angle;
        let dir = Vec2::new(normal.x * angle.cos(), angle.sin());

        state.ball.dir = normalize_or(dir, Vec2::new(normal.x, 0.0));
        state.ball.speed = (state.ball.speed * state.tuning.paddle_boost).min(state.tuning.ball_max_speed);
    } else {
        state.ball.dir = reflect_velocity(state.ball.dir, normal);
    }
    state.events.push(GameEvent::PaddleHit { side });
}

/// Rebuild the predicted path and point each AI at its end
fn retarget(state: &mut GameState) {
    let center = state.ball.center();
    predict_bounce_path(center, state.ball.dir, &state.boundaries, &mut state.bounce_path);

    let rest = state.field.center().y;
    state.ai_targets = [rest; 2];

    let heading = if state.ball.dir.x > 0.0 {
        Side::Right
    } else if state.ball.dir.x < 0.0 {
        Side::Left
    } else {
        return;
    };
    if let Some(end) = state.bounce_path.back() {
        state.ai_targets[heading.index()] = end.y;
    }
}

/// Award a point once the ball is fully past a paddle's edge of the field
fn check_score(state: &mut GameState) {
    let ball = state.ball.rect;
    let scorer = if ball.right() < state.field.left() {
        Side::Right
    } else if ball.left() > state.field.right() {
        Side::Left
    } else {
        return;
    };

    state.score[scorer.index()] += 1;
    state.events.push(GameEvent::Scored { side: scorer });
    log::info!(
        "{:?} scores ({} - {})",
        scorer,
        state.score_of(Side::Left),
        state.score_of(Side::Right)
    );

    if state.score_of(scorer) >= state.tuning.winning_score {
        state.phase = GamePhase::GameOver;
        state.ball.dir = Vec2::ZERO;
        state.ball.speed = 0.0;
        state.events.push(GameEvent::MatchOver { winner: scorer });
        log::info!("{:?} wins the match", scorer);
    } else {
        // The side that conceded receives the next serve
        state.reset_ball(scorer.opposite());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::PongTuning;

    fn new_state(seed: u64) -> GameState {
        GameState::new(PongTuning::default(), 800.0, 600.0, seed)
    }

    /// Skip the serve countdown
    fn served(seed: u64) -> GameState {
        let mut state = new_state(seed);
        state.serve_timer = 0.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    #[test]
    fn test_tick_serve_to_playing() {
        let mut state = new_state(12345);
        assert_eq!(state.phase, GamePhase::Serve);

        let input = TickInput::default();
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Serve);

        for _ in 0..61 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert!((state.ball.dir.length() - 1.0).abs() < 1e-4);
        assert_eq!(state.ball.speed, state.tuning.ball_start_speed);
        // Path was predicted from the serve position
        assert!(state.bounce_path.len() >= 2);
        assert_eq!(state.bounce_path.front(), Some(&state.field.center()));
    }

    #[test]
    fn test_serve_direction_matches_side() {
        let state = served(1);
        let toward = state.serve_toward;
        assert_eq!(state.ball.dir.x.signum(), toward.sign());
        assert!(state.ball.dir.y.abs() <= state.tuning.max_serve_angle.sin() + 1e-4);
    }

    #[test]
    fn test_player_paddle_moves_and_clamps() {
        let mut state = new_state(3);
        let start = state.paddle(Side::Left).rect.y;
        let input = TickInput {
            paddle_axis: -1.0,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        let moved = state.paddle(Side::Left).rect.y;
        assert!((start - moved - state.tuning.paddle_speed * SIM_DT).abs() < 1e-3);

        for _ in 0..200 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.paddle(Side::Left).rect.y, 0.0);
    }

    #[test]
    fn test_ball_bounces_off_right_paddle() {
        let mut state = served(5);
        let paddle = state.paddle(Side::Right).rect;
        // Place the ball just in front of the paddle centre, moving right
        state.ball.rect = Rect::from_center(
            Vec2::new(paddle.left() - 10.0, paddle.center().y),
            state.ball.rect.size(),
        );
        state.ball.dir = Vec2::X;
        state.ball.speed = 600.0;

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(state.events.contains(&GameEvent::PaddleHit { side: Side::Right }));
        assert!(state.ball.dir.x < 0.0);
        assert!(state.ball.rect.right() <= paddle.left() + 1e-3);
        assert!(state.ball.speed > 600.0);
        let contact = state.last_contact.unwrap();
        assert_eq!(contact.contact_normal, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_fast_ball_does_not_tunnel_through_paddle() {
        let mut state = served(9);
        let paddle = state.paddle(Side::Right).rect;
        state.ball.rect = Rect::from_center(
            Vec2::new(paddle.left() - 30.0, paddle.center().y),
            state.ball.rect.size(),
        );
        state.ball.dir = Vec2::X;
        // Far more than the paddle width per tick
        state.ball.speed = 6000.0;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.ball.rect.right() <= paddle.left() + 1e-3);
        assert!(state.ball.dir.x < 0.0);
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let mut state = served(11);
        state.ball.rect = Rect::from_center(Vec2::new(400.0, 10.0), state.ball.rect.size());
        state.ball.dir = Vec2::new(0.6, -0.8);
        state.ball.speed = 600.0;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.events.contains(&GameEvent::WallHit));
        assert!(state.ball.dir.y > 0.0);
        assert!(state.ball.rect.top() >= 0.0);
        // Remainder of the step was spent moving down
        assert!(state.ball.rect.top() > 0.0);
    }

    #[test]
    fn test_ai_targets_end_of_path() {
        let mut state = served(13);
        state.ball.rect = Rect::from_center(Vec2::new(400.0, 300.0), state.ball.rect.size());
        state.ball.dir = Vec2::X;
        retarget(&mut state);
        assert_eq!(state.bounce_path.len(), 2);
        assert!((state.ai_targets[Side::Right.index()] - 300.0).abs() < 1e-3);
        assert_eq!(state.ai_targets[Side::Left.index()], 300.0);
    }

    #[test]
    fn test_ai_paddle_tracks_target() {
        let mut state = new_state(17);
        state.ai_targets[Side::Right.index()] = 100.0;
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            // Serving and ball contacts retarget; pin it back
            state.ai_targets[Side::Right.index()] = 100.0;
        }
        let center = state.paddle(Side::Right).center().y;
        assert!((center - 100.0).abs() <= state.tuning.ai_dead_zone + 1e-3);
    }

    #[test]
    fn test_scoring_and_match_over() {
        let mut state = served(21);
        state.tuning.winning_score = 2;

        for expected in 1..=2 {
            state.phase = GamePhase::Playing;
            state.ball.rect = Rect::from_center(Vec2::new(-50.0, 300.0), state.ball.rect.size());
            state.ball.dir = Vec2::new(-1.0, 0.0);
            state.ball.speed = 100.0;
            tick(&mut state, &TickInput::default(), SIM_DT);
            assert_eq!(state.score_of(Side::Right), expected);
            assert!(state.events.contains(&GameEvent::Scored { side: Side::Right }));
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::MatchOver { winner: Side::Right }));

        // Nothing moves once the match is over
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.phase, GamePhase::Serve);
        assert_eq!(state.score, [0, 0]);
    }

    #[test]
    fn test_conceding_side_receives_serve() {
        let mut state = served(23);
        state.ball.rect = Rect::from_center(Vec2::new(900.0, 300.0), state.ball.rect.size());
        state.ball.dir = Vec2::X;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score_of(Side::Left), 1);
        assert_eq!(state.phase, GamePhase::Serve);
        assert_eq!(state.serve_toward, Side::Right);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        let inputs = [
            TickInput {
                paddle_axis: 1.0,
                ..Default::default()
            },
            TickInput {
                autopilot: true,
                ..Default::default()
            },
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.ball, state2.ball);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.bounce_path, state2.bounce_path);
    }

    #[test]
    fn test_autopilot_rally_keeps_ball_in_field() {
        let mut state = new_state(31);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..(60 * 20) {
            tick(&mut state, &input, SIM_DT);
            let ball = state.ball.rect;
            assert!(ball.top() >= -1e-2 && ball.bottom() <= 600.0 + 1e-2);
            assert!(ball.center().is_finite());
        }
    }
}
