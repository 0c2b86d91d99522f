//! Game tuning settings
//!
//! Persisted as JSON under its own storage key. Every field falls back to the
//! reference tuning in `consts` when absent from the stored document.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::persistence::Storage;

/// Impossible or degenerate tuning
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be a finite number (got {value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error(
        "pipe gap {gap} plus margins {margin}x2 does not fit in playfield height {playfield}"
    )]
    GapTooLarge { gap: f32, margin: f32, playfield: f32 },
    #[error("bird ({width}x{height}) does not fit in the playfield")]
    BirdTooLarge { width: f32, height: f32 },
    #[error("leaderboard capacity must be at least 1")]
    ZeroCapacity,
    #[error("bird animation needs at least one frame and one tick per frame")]
    EmptyAnimation,
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Ground strip height; the floor line sits this far above the bottom
    pub floor_height: f32,

    // === Bird ===
    pub bird_width: f32,
    pub bird_height: f32,
    pub gravity: f32,
    pub flap_strength: f32,
    pub animation_ticks: u32,
    pub bird_frame_count: u8,

    // === Pipes ===
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub gap_margin: f32,
    pub pipe_speed: f32,
    pub spawn_interval_ms: f32,
    /// Nominal duration of one Update, fed to the spawn accumulator
    pub frame_ms: f32,

    // === Scenery ===
    pub background_speed: f32,
    pub foreground_speed: f32,

    // === Phases ===
    /// Count down before play; false starts Running immediately
    pub countdown: bool,
    pub countdown_start: u32,
    pub countdown_step_ms: f64,

    // === Leaderboard ===
    pub leaderboard_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            floor_height: FLOOR_HEIGHT,

            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            gravity: GRAVITY,
            flap_strength: FLAP_STRENGTH,
            animation_ticks: ANIMATION_TICKS,
            bird_frame_count: BIRD_FRAME_COUNT,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            gap_margin: PIPE_GAP_MARGIN,
            pipe_speed: PIPE_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            frame_ms: FRAME_MS,

            background_speed: BACKGROUND_SPEED,
            foreground_speed: FOREGROUND_SPEED,

            countdown: true,
            countdown_start: COUNTDOWN_START,
            countdown_step_ms: COUNTDOWN_STEP_MS,

            leaderboard_capacity: MAX_HIGH_SCORES,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "flappy_settings";

    /// Y coordinate of the floor line
    pub fn floor_y(&self) -> f32 {
        self.canvas_height - self.floor_height
    }

    /// Inclusive range `gap_top` is drawn from
    pub fn gap_top_range(&self) -> (f32, f32) {
        let low = self.gap_margin;
        let high = self.floor_y() - self.pipe_gap - self.gap_margin;
        (low, high)
    }

    /// Reject tuning that would make the simulation ill-formed
    pub fn validate(&self) -> Result<(), SettingsError> {
        let numbers = [
            ("canvas_width", self.canvas_width as f64),
            ("canvas_height", self.canvas_height as f64),
            ("floor_height", self.floor_height as f64),
            ("bird_width", self.bird_width as f64),
            ("bird_height", self.bird_height as f64),
            ("gravity", self.gravity as f64),
            ("flap_strength", self.flap_strength as f64),
            ("pipe_width", self.pipe_width as f64),
            ("pipe_gap", self.pipe_gap as f64),
            ("gap_margin", self.gap_margin as f64),
            ("pipe_speed", self.pipe_speed as f64),
            ("spawn_interval_ms", self.spawn_interval_ms as f64),
            ("frame_ms", self.frame_ms as f64),
            ("background_speed", self.background_speed as f64),
            ("foreground_speed", self.foreground_speed as f64),
            ("countdown_step_ms", self.countdown_step_ms),
        ];
        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(SettingsError::NonFinite { field, value });
            }
        }

        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("gap_margin", self.gap_margin),
            ("pipe_speed", self.pipe_speed),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("frame_ms", self.frame_ms),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(SettingsError::NonPositive { field, value });
            }
        }
        if self.countdown_step_ms <= 0.0 {
            return Err(SettingsError::NonPositive {
                field: "countdown_step_ms",
                value: self.countdown_step_ms as f32,
            });
        }
        if self.floor_height < 0.0 {
            return Err(SettingsError::NonPositive {
                field: "floor_height",
                value: self.floor_height,
            });
        }

        let playfield = self.floor_y();
        if self.pipe_gap + 2.0 * self.gap_margin >= playfield {
            return Err(SettingsError::GapTooLarge {
                gap: self.pipe_gap,
                margin: self.gap_margin,
                playfield,
            });
        }
        if self.bird_height >= playfield || self.bird_width >= self.canvas_width {
            return Err(SettingsError::BirdTooLarge {
                width: self.bird_width,
                height: self.bird_height,
            });
        }
        if self.leaderboard_capacity == 0 {
            return Err(SettingsError::ZeroCapacity);
        }
        if self.animation_ticks == 0 || self.bird_frame_count == 0 {
            return Err(SettingsError::EmptyAnimation);
        }
        Ok(())
    }

    /// Load settings from storage, falling back to defaults when absent or invalid
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => match settings.validate() {
                    Ok(()) => {
                        log::info!("Loaded settings from storage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored settings rejected: {e}"),
                },
                Err(e) => log::warn!("Stored settings unreadable: {e}"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {e}"),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to storage (best-effort)
    pub fn save(&self, storage: &mut dyn Storage) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match storage.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {e}"),
            },
            Err(e) => log::warn!("Could not serialize settings: {e}"),
        }
    }

    /// Whether settings have ever been stored
    pub fn is_stored(storage: &dyn Storage) -> bool {
        matches!(storage.get(Self::STORAGE_KEY), Ok(Some(_)))
    }
}
