//! Screens and the fade state machine that switches between them

use glam::Vec2;

use crate::consts::SIM_DT;
use crate::scene::{DrawList, DrawListExt, colors};
use crate::settings::Settings;
use crate::sim::{
    CollisionData, Direction, GamePhase, GameState, Rect, SandboxState, Side, SnakeState,
    TickInput, tick,
};

/// One boolean per logical key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
    pub back: bool,
}

/// Keyboard state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Keys currently down
    pub held: KeySet,
    /// Keys that went down this frame (one-shot)
    pub pressed: KeySet,
}

impl FrameInput {
    /// Held arrow keys as a vector, y down
    pub fn axis(&self) -> Vec2 {
        let h = &self.held;
        let x = (h.right as i32 - h.left as i32) as f32;
        let y = (h.down as i32 - h.up as i32) as f32;
        Vec2::new(x, y)
    }

    pub fn clear_pressed(&mut self) {
        self.pressed = KeySet::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Pong,
    Sandbox,
    Snake,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Pong, GameKind::Sandbox, GameKind::Snake];

    pub fn title(self) -> &'static str {
        match self {
            GameKind::Pong => "PONG",
            GameKind::Sandbox => "SANDBOX",
            GameKind::Snake => "SNAKE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    Menu,
    Game(GameKind),
}

/// Requested by a screen; carried out once the fade-out finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Goto(ScreenId),
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct MenuScreen {
    pub selected: usize,
}

impl MenuScreen {
    pub fn selected_kind(&self) -> GameKind {
        GameKind::ALL[self.selected % GameKind::ALL.len()]
    }

    fn update(&mut self, input: &FrameInput) -> Option<Transition> {
        let count = GameKind::ALL.len();
        if input.pressed.up {
            self.selected = (self.selected + count - 1) % count;
        }
        if input.pressed.down {
            self.selected = (self.selected + 1) % count;
        }
        if input.pressed.back {
            return Some(Transition::Quit);
        }
        if input.pressed.confirm {
            return Some(Transition::Goto(ScreenId::Game(self.selected_kind())));
        }
        None
    }

    fn render(&self, alpha: f32, settings: &Settings, list: &mut DrawList) {
        let cx = settings.screen_width / 2.0;
        list.text_centered("SWEPT PONG", Vec2::new(cx, settings.screen_height * 0.2), 48.0, colors::TEXT, alpha);
        for (i, kind) in GameKind::ALL.iter().enumerate() {
            let tint = if i == self.selected { colors::HIGHLIGHT } else { colors::TEXT };
            let y = settings.screen_height * 0.45 + i as f32 * 40.0;
            list.text_centered(kind.title(), Vec2::new(cx, y), 28.0, tint, alpha);
        }
    }
}

#[derive(Debug, Clone)]
pub enum GameScreen {
    Pong(GameState),
    Sandbox(SandboxState),
    Snake(SnakeState),
}

impl GameScreen {
    fn kind(&self) -> GameKind {
        match self {
            GameScreen::Pong(_) => GameKind::Pong,
            GameScreen::Sandbox(_) => GameKind::Sandbox,
            GameScreen::Snake(_) => GameKind::Snake,
        }
    }

    fn update(&mut self, dt: f32, input: &FrameInput, settings: &Settings) -> Option<Transition> {
        if input.pressed.back {
            return Some(Transition::Goto(ScreenId::Menu));
        }

        match self {
            GameScreen::Pong(state) => {
                let tick_input = TickInput {
                    paddle_axis: input.axis().y,
                    autopilot: settings.demo_mode,
                    restart: input.pressed.confirm,
                };
                tick(state, &tick_input, dt);
            }
            GameScreen::Sandbox(state) => state.tick(input.axis(), dt),
            GameScreen::Snake(state) => state.tick(snake_turn(&input.pressed), dt),
        }
        None
    }

    fn render(&self, alpha: f32, settings: &Settings, list: &mut DrawList) {
        match self {
            GameScreen::Pong(state) => render_pong(state, alpha, settings, list),
            GameScreen::Sandbox(state) => render_sandbox(state, alpha, settings, list),
            GameScreen::Snake(state) => render_snake(state, alpha, settings, list),
        }
    }
}

fn snake_turn(pressed: &KeySet) -> Option<Direction> {
    if pressed.up {
        Some(Direction::Up)
    } else if pressed.down {
        Some(Direction::Down)
    } else if pressed.left {
        Some(Direction::Left)
    } else if pressed.right {
        Some(Direction::Right)
    } else {
        None
    }
}

fn render_contact(contact: &CollisionData, anchor: Vec2, alpha: f32, list: &mut DrawList) {
    list.circle(anchor, 3.0, colors::NORMAL, alpha);
    list.line(anchor, anchor + contact.contact_normal * 25.0, colors::NORMAL, alpha);
}

fn render_pong(state: &GameState, alpha: f32, settings: &Settings, list: &mut DrawList) {
    for paddle in &state.paddles {
        list.rect(paddle.rect, colors::PADDLE, alpha);
    }
    list.rect(state.ball.rect, colors::BALL, alpha);

    let cx = state.field.center().x;
    let score = format!("{}   {}", state.score_of(Side::Left), state.score_of(Side::Right));
    list.text_centered(score, Vec2::new(cx, 40.0), 32.0, colors::TEXT, alpha);

    if state.phase == GamePhase::GameOver {
        let winner = if state.score_of(Side::Left) >= state.score_of(Side::Right) {
            "LEFT WINS"
        } else {
            "RIGHT WINS"
        };
        list.text_centered(winner, state.field.center(), 40.0, colors::HIGHLIGHT, alpha);
    }

    if settings.debug_overlay {
        for segment in state.boundaries.segments() {
            list.line(segment.start, segment.end, colors::BOUNDARY, alpha);
        }
        let path = state.bounce_path.to_vec();
        list.polyline(&path, colors::PATH, alpha);
        if let Some(contact) = &state.last_contact {
            // Ball centre at the moment of contact
            let anchor = contact.contact_point + state.ball.rect.size() / 2.0;
            render_contact(contact, anchor, alpha, list);
        }
    }
}

fn render_sandbox(state: &SandboxState, alpha: f32, settings: &Settings, list: &mut DrawList) {
    let tint = if state.is_colliding() { colors::TARGET_HIT } else { colors::TARGET };
    list.rect(state.target, tint, alpha);
    list.rect(state.mover.rect, colors::PADDLE, alpha);

    if settings.debug_overlay {
        let swept = state.mover.rect.swept(state.mover.velocity(SIM_DT));
        list.outline(swept, colors::BOUNDARY, alpha);
        if let Some(contact) = &state.last_contact {
            let anchor = contact.contact_point + state.mover.rect.size() / 2.0;
            render_contact(contact, anchor, alpha, list);
        }
    }
}

fn render_snake(state: &SnakeState, alpha: f32, _settings: &Settings, list: &mut DrawList) {
    let margin = state.tuning.grid_margin;
    let cell = Vec2::new(state.tuning.grid_width, state.tuning.grid_height);

    let food = Rect::new(state.food.x, state.food.y, cell.x, cell.y);
    list.rect(food.inset(margin, margin), colors::FOOD, alpha);

    for piece in state.pieces.iter() {
        // Pieces grow from their cell centre
        let center = piece.position + cell / 2.0;
        let rect = Rect::from_center(center, piece.size);
        list.rect(rect.inset(margin, margin), colors::SNAKE, alpha);
    }

    let eaten = format!("{}", state.eaten);
    list.text(eaten, Vec2::new(10.0, 10.0), 24.0, colors::TEXT, alpha);
}

/// The active screen
#[derive(Debug, Clone)]
pub enum Screen {
    Menu(MenuScreen),
    Game(GameScreen),
}

impl Screen {
    /// Build a fresh screen; `seed` feeds the game's RNG
    pub fn init(id: ScreenId, settings: &Settings, seed: u64) -> Self {
        let (w, h) = (settings.screen_width, settings.screen_height);
        log::debug!("Init screen {:?} (seed {})", id, seed);
        match id {
            ScreenId::Menu => Screen::Menu(MenuScreen::default()),
            ScreenId::Game(GameKind::Pong) => {
                Screen::Game(GameScreen::Pong(GameState::new(settings.pong.clone(), w, h, seed)))
            }
            ScreenId::Game(GameKind::Sandbox) => {
                Screen::Game(GameScreen::Sandbox(SandboxState::new(&settings.sandbox, w, h)))
            }
            ScreenId::Game(GameKind::Snake) => {
                Screen::Game(GameScreen::Snake(SnakeState::new(settings.snake.clone(), w, h, seed)))
            }
        }
    }

    pub fn id(&self) -> ScreenId {
        match self {
            Screen::Menu(_) => ScreenId::Menu,
            Screen::Game(game) => ScreenId::Game(game.kind()),
        }
    }

    pub fn update(&mut self, dt: f32, input: &FrameInput, settings: &Settings) -> Option<Transition> {
        match self {
            Screen::Menu(menu) => menu.update(input),
            Screen::Game(game) => game.update(dt, input, settings),
        }
    }

    /// Emit this screen's frame at opacity `fade` (0 transparent, 1 opaque)
    pub fn render(&self, fade: f32, settings: &Settings, list: &mut DrawList) {
        match self {
            Screen::Menu(menu) => menu.render(fade, settings, list),
            Screen::Game(game) => game.render(fade, settings, list),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fade {
    FadingIn { elapsed: f32 },
    Active,
    FadingOut { elapsed: f32, next: Transition },
}

/// Owns the active screen and runs the fade between screens
#[derive(Debug, Clone)]
pub struct ScreenManager {
    settings: Settings,
    screen: Screen,
    fade: Fade,
    /// Seed for the next game screen
    seed: u64,
    closed: bool,
}

impl ScreenManager {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let screen = Screen::init(ScreenId::Menu, &settings, seed);
        Self {
            settings,
            screen,
            fade: Fade::FadingIn { elapsed: 0.0 },
            seed,
            closed: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current(&self) -> &Screen {
        &self.screen
    }

    pub fn current_id(&self) -> ScreenId {
        self.screen.id()
    }

    /// Pong state when the Pong screen is up
    pub fn pong_state(&self) -> Option<&GameState> {
        match &self.screen {
            Screen::Game(GameScreen::Pong(state)) => Some(state),
            _ => None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.fade == Fade::Active
    }

    #[inline]
    pub fn should_close(&self) -> bool {
        self.closed
    }

    /// Opacity of the current screen
    pub fn fade_alpha(&self) -> f32 {
        let duration = self.settings.fade_time;
        match self.fade {
            Fade::Active => 1.0,
            Fade::FadingIn { elapsed } if duration > 0.0 => (elapsed / duration).clamp(0.0, 1.0),
            Fade::FadingIn { .. } => 1.0,
            Fade::FadingOut { elapsed, .. } if duration > 0.0 => 1.0 - (elapsed / duration).clamp(0.0, 1.0),
            Fade::FadingOut { .. } => 0.0,
        }
    }

    /// Advance fades and, once fully faded in, the active screen
    pub fn update(&mut self, dt: f32, input: &FrameInput) {
        if self.closed {
            return;
        }
        let duration = self.settings.fade_time;

        match self.fade {
            Fade::FadingIn { elapsed } => {
                let elapsed = elapsed + dt;
                self.fade = if elapsed >= duration {
                    Fade::Active
                } else {
                    Fade::FadingIn { elapsed }
                };
            }
            Fade::Active => {
                if let Some(next) = self.screen.update(dt, input, &self.settings) {
                    log::debug!("Leaving {:?} for {:?}", self.screen.id(), next);
                    self.fade = Fade::FadingOut { elapsed: 0.0, next };
                }
            }
            Fade::FadingOut { elapsed, next } => {
                let elapsed = elapsed + dt;
                if elapsed < duration {
                    self.fade = Fade::FadingOut { elapsed, next };
                    return;
                }
                match next {
                    Transition::Goto(id) => {
                        self.seed = self.seed.wrapping_add(1);
                        self.screen = Screen::init(id, &self.settings, self.seed);
                        self.fade = Fade::FadingIn { elapsed: 0.0 };
                    }
                    Transition::Quit => {
                        log::info!("Quit");
                        self.closed = true;
                    }
                }
            }
        }
    }

    /// Draw list for the current frame
    pub fn render(&self) -> DrawList {
        let mut list = DrawList::new();
        self.screen.render(self.fade_alpha(), &self.settings, &mut list);
        list
    }
}
