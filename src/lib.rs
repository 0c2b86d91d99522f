//! Flappy - a side-scrolling flap-and-dodge arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, pipes, collisions, phase machine)
//! - `highscores`: Bounded best-score leaderboard
//! - `settings`: Data-driven game tuning
//! - `persistence`: Key-value storage backends
//! - `platform`: Clock, frame pacing and input queue
//! - `renderer`: Read-only frame painting
//! - `game`: Per-frame driver tying the above together

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::{Leaderboard, LeaderboardEntry};
pub use settings::{Settings, SettingsError};

/// Game configuration constants (reference tuning, see `Settings::default`)
pub mod consts {
    /// Nominal frame duration in milliseconds (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Playfield dimensions (logical pixels)
    pub const CANVAS_WIDTH: f32 = 320.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;
    /// Decorative ground strip below the floor line
    pub const FLOOR_HEIGHT: f32 = 40.0;

    /// Bird collision box
    pub const BIRD_WIDTH: f32 = 34.0;
    pub const BIRD_HEIGHT: f32 = 24.0;

    /// Velocity added every frame (pixels/frame²)
    pub const GRAVITY: f32 = 0.25;
    /// Upward velocity set on flap (pixels/frame)
    pub const FLAP_STRENGTH: f32 = 4.5;

    /// Bird animation: frames per wing cycle step, number of wing frames
    pub const ANIMATION_TICKS: u32 = 6;
    pub const BIRD_FRAME_COUNT: u8 = 3;

    /// Pipe geometry
    pub const PIPE_WIDTH: f32 = 50.0;
    pub const PIPE_GAP: f32 = 120.0;
    /// Minimum distance between the gap and the top/floor
    pub const PIPE_GAP_MARGIN: f32 = 50.0;
    /// Horizontal pipe speed (pixels/frame)
    pub const PIPE_SPEED: f32 = 2.0;
    /// Time between pipe spawns
    pub const SPAWN_INTERVAL_MS: f32 = 1500.0;

    /// Cosmetic scroll speeds (pixels/frame)
    pub const BACKGROUND_SPEED: f32 = 0.5;
    pub const FOREGROUND_SPEED: f32 = 2.0;

    /// Countdown before play starts
    pub const COUNTDOWN_START: u32 = 3;
    pub const COUNTDOWN_STEP_MS: f64 = 1000.0;

    /// Leaderboard capacity
    pub const MAX_HIGH_SCORES: usize = 10;
}
