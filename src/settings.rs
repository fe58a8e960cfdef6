//! Game settings and tuning
//!
//! Loaded from a JSON file on disk; every field falls back to its default
//! when missing, so partial files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Pong balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongTuning {
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between a paddle and its screen edge
    pub paddle_margin: f32,
    /// Player paddle speed (px/s)
    pub paddle_speed: f32,
    pub ball_size: f32,
    pub ball_start_speed: f32,
    pub ball_max_speed: f32,
    /// Speed multiplier applied on every paddle hit
    pub paddle_boost: f32,
    /// Deflection at the paddle tip (radians)
    pub max_bounce_angle: f32,
    /// Largest serve angle off the horizontal (radians)
    pub max_serve_angle: f32,
    /// AI paddle speed (px/s)
    pub ai_speed: f32,
    /// AI stops correcting within this many pixels of its target
    pub ai_dead_zone: f32,
    pub winning_score: u32,
    /// Seconds the ball waits before each serve
    pub serve_delay: f32,
}

impl Default for PongTuning {
    fn default() -> Self {
        Self {
            paddle_width: 20.0,
            paddle_height: 100.0,
            paddle_margin: 30.0,
            paddle_speed: 400.0,
            ball_size: 15.0,
            ball_start_speed: 350.0,
            ball_max_speed: 900.0,
            paddle_boost: 1.05,
            max_bounce_angle: 60.0_f32.to_radians(),
            max_serve_angle: 35.0_f32.to_radians(),
            ai_speed: 320.0,
            ai_dead_zone: 6.0,
            winning_score: 5,
            serve_delay: 1.0,
        }
    }
}

/// Collision sandbox layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxTuning {
    pub target_width: f32,
    pub target_height: f32,
    pub box_size: f32,
    pub box_speed: f32,
}

impl Default for SandboxTuning {
    fn default() -> Self {
        Self {
            target_width: 150.0,
            target_height: 50.0,
            box_size: 30.0,
            box_speed: 200.0,
        }
    }
}

/// Snake grid and pace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeTuning {
    pub grid_width: f32,
    pub grid_height: f32,
    /// Inner margin of a drawn cell
    pub grid_margin: f32,
    /// Head speed (px/s)
    pub speed: f32,
    pub initial_pieces: usize,
}

impl Default for SnakeTuning {
    fn default() -> Self {
        Self {
            grid_width: 20.0,
            grid_height: 20.0,
            grid_margin: 3.0,
            speed: 50.0,
            initial_pieces: 3,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Seconds for each half of a screen transition
    pub fade_time: f32,
    /// Emit bounce path, boundaries and contact normals into the draw list
    pub debug_overlay: bool,
    /// Both Pong paddles are driven by the AI
    pub demo_mode: bool,

    pub pong: PongTuning,
    pub sandbox: SandboxTuning,
    pub snake: SnakeTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            fade_time: 0.3,
            debug_overlay: false,
            demo_mode: false,
            pong: PongTuning::default(),
            sandbox: SandboxTuning::default(),
            snake: SnakeTuning::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Read settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
