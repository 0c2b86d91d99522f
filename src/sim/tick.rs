//! Fixed timestep simulation tick
//!
//! `tick` runs the phase machine (input, countdown) and then `update`, the
//! per-frame simulation step. One call is one nominal 1/60 s frame.

use super::collision::{Rect, hits_boundary, hits_pipe};
use super::state::{GameEvent, GamePhase, GameState, Pipe};

/// Input commands for a single tick (one-shot flags, cleared by the driver)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap (space/tap)
    pub flap: bool,
    /// Pause toggle
    pub toggle_pause: bool,
    /// Explicit resume from pause
    pub resume: bool,
    /// Start from the title screen or restart after game over
    pub restart: bool,
}

/// Advance the game by one frame at wall-clock time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart {
        start_run(state, now_ms, &mut events);
    }

    // Handle pause toggle
    if input.toggle_pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    } else if input.resume && state.phase == GamePhase::Paused {
        state.phase = GamePhase::Running;
        events.push(GameEvent::Resumed);
    }

    if input.flap && state.is_running() {
        state.bird.flap(state.settings.flap_strength);
        events.push(GameEvent::Flapped);
    }

    if state.phase == GamePhase::CountingDown {
        advance_countdown(state, now_ms, &mut events);
    }

    events.extend(update(state));
    events
}

/// Begin a new run (valid only before the first game or after game over)
fn start_run(state: &mut GameState, now_ms: f64, events: &mut Vec<GameEvent>) {
    if !matches!(state.phase, GamePhase::NotStarted | GamePhase::Ended) {
        return;
    }

    state.reset_run();
    events.push(GameEvent::Started);

    if state.settings.countdown {
        state.phase = GamePhase::CountingDown;
        state.countdown_started_at = Some(now_ms);
        events.push(GameEvent::CountdownTick {
            remaining: state.countdown_remaining,
        });
        log::info!("Countdown started");
    } else {
        state.phase = GamePhase::Running;
        log::info!("Run started");
    }
}

/// Recompute the countdown from its anchor timestamp
///
/// Derived from elapsed wall-clock time, so the countdown lasts the same
/// regardless of frame rate and can never decrement twice for one step.
fn advance_countdown(state: &mut GameState, now_ms: f64, events: &mut Vec<GameEvent>) {
    let started_at = *state.countdown_started_at.get_or_insert(now_ms);
    let elapsed = (now_ms - started_at).max(0.0);
    let steps = (elapsed / state.settings.countdown_step_ms).floor();
    let start = state.settings.countdown_start;
    let remaining = if steps >= start as f64 {
        0
    } else {
        start - steps as u32
    };

    if remaining != state.countdown_remaining {
        state.countdown_remaining = remaining;
        if remaining > 0 {
            events.push(GameEvent::CountdownTick { remaining });
        }
    }

    if remaining == 0 {
        state.phase = GamePhase::Running;
        state.countdown_started_at = None;
        log::info!("Countdown finished, running");
    }
}

/// Advance the simulation by one frame; no effect unless Running
pub fn update(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    let settings = &state.settings;
    let gravity = settings.gravity;
    let animation_ticks = settings.animation_ticks;
    let frame_count = settings.bird_frame_count;
    let floor_y = settings.floor_y();
    let frame_ms = settings.frame_ms;
    let spawn_interval = settings.spawn_interval_ms;
    let pipe_speed = settings.pipe_speed;
    let pipe_width = settings.pipe_width;
    let (background_speed, foreground_speed) =
        (settings.background_speed, settings.foreground_speed);
    let canvas_width = settings.canvas_width;

    state.frames += 1;

    // Bird
    state.bird.integrate(gravity);
    state.bird.animate(animation_ticks, frame_count);

    let bird = Rect::from(&state.bird);
    if hits_boundary(&bird, floor_y) {
        end_game(state, &mut events);
        return events;
    }

    // Spawning
    state.spawn_accumulator += frame_ms;
    if state.spawn_accumulator > spawn_interval {
        let pipe = state.spawn_pipe();
        state.spawn_accumulator = 0.0;
        events.push(GameEvent::PipeSpawned);
        log::debug!(
            "Pipe spawned, gap {:.1}..{:.1}",
            pipe.gap_top,
            pipe.gap_bottom
        );
    }

    // Pipes: move, retire and score
    let passed = advance_pipes(&mut state.pipes, pipe_speed, pipe_width, bird.min.x);
    for _ in 0..passed {
        state.score.current += 1;
        events.push(GameEvent::Scored {
            total: state.score.current,
        });
    }

    if state
        .pipes
        .iter()
        .any(|pipe| hits_pipe(&bird, pipe, pipe_width))
    {
        end_game(state, &mut events);
        return events;
    }

    state
        .scenery
        .scroll(background_speed, foreground_speed, canvas_width);

    events
}

/// Move every pipe left, then drop those fully off-screen
///
/// Two passes: all pipes move first, then the collection is rebuilt from the
/// survivors, so a retired pipe is counted exactly once. Returns how many
/// retired pipes the bird (left edge at `bird_x`) had fully passed.
pub fn advance_pipes(pipes: &mut Vec<Pipe>, speed: f32, width: f32, bird_x: f32) -> u32 {
    for pipe in pipes.iter_mut() {
        pipe.x -= speed;
    }

    let (retired, live): (Vec<Pipe>, Vec<Pipe>) =
        pipes.drain(..).partition(|pipe| pipe.is_offscreen(width));
    *pipes = live;

    retired
        .iter()
        .filter(|pipe| pipe.right(width) < bird_x)
        .count() as u32
}

/// Running → Ended, at most once
fn end_game(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.phase = GamePhase::Ended;
    let score = state.score.current;
    if score > state.score.best {
        state.score.best = score;
    }
    events.push(GameEvent::GameOver { score });
    log::info!("Game over: score {} (best {})", score, state.score.best);
}
