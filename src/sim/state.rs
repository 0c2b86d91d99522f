//! Game state and core simulation types
//!
//! Everything the simulation reads or writes lives in one owned `GameState`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::{Settings, SettingsError};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first start gesture
    NotStarted,
    /// Ready countdown before play
    CountingDown,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended
    Ended,
}

/// Something that happened during a tick (consumed by the driver)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new run began (countdown or play)
    Started,
    /// Countdown value changed
    CountdownTick { remaining: u32 },
    Flapped,
    PipeSpawned,
    /// A pipe was retired; `total` is the new current score
    Scored { total: u32 },
    Paused,
    Resumed,
    GameOver { score: u32 },
}

/// The player-controlled bird
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Top-left corner; x never changes after creation
    pub pos: Vec2,
    /// Vertical velocity (pixels/frame, positive is down)
    pub velocity: f32,
    /// Wing animation frame index
    pub frame: u8,
    /// Updates since the last frame advance
    pub anim_counter: u32,
    pub size: Vec2,
}

impl Bird {
    /// Bird at its start position (a quarter across, vertically centered)
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(settings.canvas_width / 4.0, settings.canvas_height / 2.0),
            velocity: 0.0,
            frame: 0,
            anim_counter: 0,
            size: Vec2::new(settings.bird_width, settings.bird_height),
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Apply one frame of gravity
    pub fn integrate(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.pos.y += self.velocity;
    }

    /// Advance the wing animation
    pub fn animate(&mut self, ticks_per_frame: u32, frame_count: u8) {
        self.anim_counter += 1;
        if self.anim_counter >= ticks_per_frame {
            self.anim_counter = 0;
            self.frame = (self.frame + 1) % frame_count;
        }
    }

    pub fn flap(&mut self, strength: f32) {
        self.velocity = -strength;
    }
}

/// A pipe pair with a passable gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Leading (left) edge
    pub x: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
}

impl Pipe {
    pub fn new(x: f32, gap_top: f32, gap_height: f32) -> Self {
        Self {
            x,
            gap_top,
            gap_bottom: gap_top + gap_height,
        }
    }

    pub fn gap_height(&self) -> f32 {
        self.gap_bottom - self.gap_top
    }

    /// Trailing (right) edge
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Fully past the left boundary
    pub fn is_offscreen(&self, width: f32) -> bool {
        self.right(width) < 0.0
    }
}

/// Score for the current session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub current: u32,
    pub best: u32,
}

/// Cosmetic parallax offsets (renderer only)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scenery {
    pub background_offset: f32,
    pub foreground_offset: f32,
}

impl Scenery {
    /// Scroll both layers left, wrapping at one canvas width
    pub fn scroll(&mut self, background_speed: f32, foreground_speed: f32, width: f32) {
        self.background_offset = wrap_offset(self.background_offset - background_speed, width);
        self.foreground_offset = wrap_offset(self.foreground_offset - foreground_speed, width);
    }
}

fn wrap_offset(offset: f32, width: f32) -> f32 {
    if offset <= -width { 0.0 } else { offset }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub settings: Settings,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Live pipes in creation order
    pub pipes: Vec<Pipe>,
    pub score: Score,
    pub scenery: Scenery,
    /// Milliseconds accumulated toward the next spawn
    pub spawn_accumulator: f32,
    /// Wall-clock time the current countdown started
    pub countdown_started_at: Option<f64>,
    /// Last countdown value reported
    pub countdown_remaining: u32,
    /// Number of Updates applied in the current run
    pub frames: u64,
}

impl GameState {
    /// Create a new game state; fails if the settings are ill-formed
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bird: Bird::new(&settings),
            countdown_remaining: settings.countdown_start,
            settings,
            phase: GamePhase::NotStarted,
            pipes: Vec::new(),
            score: Score::default(),
            scenery: Scenery::default(),
            spawn_accumulator: 0.0,
            countdown_started_at: None,
            frames: 0,
        })
    }

    /// Reset everything a new run starts without (best score survives)
    pub fn reset_run(&mut self) {
        self.bird = Bird::new(&self.settings);
        self.pipes.clear();
        self.score.current = 0;
        self.scenery = Scenery::default();
        self.spawn_accumulator = 0.0;
        self.countdown_started_at = None;
        self.countdown_remaining = self.settings.countdown_start;
        self.frames = 0;
    }

    /// Pick a gap position uniformly inside the configured margins
    pub fn random_gap_top(&mut self) -> f32 {
        let (low, high) = self.settings.gap_top_range();
        self.rng.random_range(low..=high)
    }

    /// Spawn a pipe at the right edge with a random gap
    pub fn spawn_pipe(&mut self) -> Pipe {
        let gap_top = self.random_gap_top();
        let pipe = Pipe::new(self.settings.canvas_width, gap_top, self.settings.pipe_gap);
        self.pipes.push(pipe);
        pipe
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bird_starts_quarter_across_and_centered() {
        let settings = Settings::default();
        let bird = Bird::new(&settings);
        assert_eq!(bird.pos, Vec2::new(80.0, 240.0));
        assert_eq!(bird.velocity, 0.0);
    }

    #[test]
    fn test_bird_animation_wraps() {
        let mut bird = Bird::new(&Settings::default());
        for _ in 0..5 {
            bird.animate(6, 3);
        }
        assert_eq!(bird.frame, 0);
        bird.animate(6, 3);
        assert_eq!((bird.frame, bird.anim_counter), (1, 0));
        for _ in 0..12 {
            bird.animate(6, 3);
        }
        assert_eq!(bird.frame, 0);
    }

    #[test]
    fn test_scenery_wraps_at_canvas_width() {
        let mut scenery = Scenery {
            background_offset: -319.5,
            foreground_offset: -100.0,
        };
        scenery.scroll(0.5, 2.0, 320.0);
        assert_eq!(scenery.background_offset, 0.0);
        assert_eq!(scenery.foreground_offset, -102.0);
    }

    #[test]
    fn test_spawned_gaps_stay_in_bounds() {
        let mut state = GameState::new(Settings::default(), 7).unwrap();
        let floor = state.settings.floor_y();
        for _ in 0..500 {
            let pipe = state.spawn_pipe();
            assert!(pipe.gap_top >= state.settings.gap_margin);
            assert!(pipe.gap_bottom <= floor - state.settings.gap_margin + 0.001);
            assert!((pipe.gap_height() - state.settings.pipe_gap).abs() < 0.001);
            assert_eq!(pipe.x, state.settings.canvas_width);
        }
    }

    #[test]
    fn test_invalid_settings_rejected_at_construction() {
        let settings = Settings {
            pipe_gap: 500.0,
            ..Default::default()
        };
        assert!(GameState::new(settings, 1).is_err());
    }

    #[test]
    fn test_reset_run_keeps_best() {
        let mut state = GameState::new(Settings::default(), 1).unwrap();
        state.score = Score { current: 4, best: 9 };
        state.spawn_pipe();
        state.bird.pos.y = 10.0;
        state.reset_run();
        assert_eq!(state.score, Score { current: 0, best: 9 });
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird, Bird::new(&state.settings));
    }
}
