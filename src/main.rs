//! Swept Pong - headless native runner
//!
//! Drives the screen manager with a scripted player: pick Pong from the
//! menu, let the AI play both paddles until the match ends, then back out
//! and quit.
//!
//! Usage: `swept-pong [settings.json] [max_frames]`

use swept_pong::consts::{MAX_SUBSTEPS, SIM_DT};
use swept_pong::scene::DrawList;
use swept_pong::screen::{GameKind, ScreenId};
use swept_pong::sim::{GameEvent, GamePhase};
use swept_pong::{FrameInput, ScreenManager, Settings};

/// Simulated wall-clock time per rendered frame
const FRAME_DT: f32 = 1.0 / 50.0;
const DEFAULT_MAX_FRAMES: u64 = 50 * 60 * 10;

/// Runner holding all state
struct Game {
    manager: ScreenManager,
    accumulator: f32,
    input: FrameInput,
    played: bool,
    frames: u64,
    draw_list: DrawList,
}

impl Game {
    fn new(settings: Settings, seed: u64) -> Self {
        Self {
            manager: ScreenManager::new(settings, seed),
            accumulator: 0.0,
            input: FrameInput::default(),
            played: false,
            frames: 0,
            draw_list: DrawList::new(),
        }
    }

    /// Press the key the script wants for this frame
    fn script_input(&mut self) {
        self.input = FrameInput::default();
        if !self.manager.is_active() {
            return;
        }
        match self.manager.current_id() {
            ScreenId::Menu if !self.played => self.input.pressed.confirm = true,
            ScreenId::Menu => self.input.pressed.back = true,
            ScreenId::Game(GameKind::Pong) => {
                self.played = true;
                let over = self
                    .manager
                    .pong_state()
                    .is_some_and(|s| s.phase == GamePhase::GameOver);
                if over {
                    self.input.pressed.back = true;
                }
            }
            ScreenId::Game(_) => self.input.pressed.back = true,
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input;
            self.manager.update(SIM_DT, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.clear_pressed();
            self.log_events();
        }
    }

    fn log_events(&self) {
        let Some(state) = self.manager.pong_state() else {
            return;
        };
        for event in &state.events {
            match event {
                GameEvent::PaddleHit { .. } | GameEvent::WallHit => log::trace!("{:?}", event),
                _ => log::debug!("{:?}", event),
            }
        }
    }

    fn render(&mut self) {
        self.draw_list = self.manager.render();
        log::trace!("Frame {}: {} draw commands", self.frames, self.draw_list.len());
    }
}

fn main() {
    env_logger::init();
    log::info!("Swept Pong (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    settings.demo_mode = true;
    let max_frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_FRAMES);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!("Game initialized with seed: {}", seed);

    let mut game = Game::new(settings, seed);
    let mut final_score = None;

    while !game.manager.should_close() && game.frames < max_frames {
        game.script_input();
        game.update(FRAME_DT);
        game.render();
        game.frames += 1;

        if let Some(state) = game.manager.pong_state() {
            final_score = Some(state.score);
        }
    }

    match final_score {
        Some([left, right]) => log::info!("Final score {} - {}", left, right),
        None => log::warn!("Pong never started"),
    }
    if !game.manager.should_close() {
        log::warn!("Stopped after {} frames", game.frames);
    }
    log::info!("Ran {} frames", game.frames);
}
