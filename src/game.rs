//! Per-frame driver
//!
//! Owns the game state, the leaderboard and the storage backend. Each frame:
//! drain queued input, run one simulation tick, react to its events, then
//! hand a read-only view to the renderer.

use chrono::Utc;

use crate::highscores::Leaderboard;
use crate::persistence::Storage;
use crate::platform::input::{self, InputCommand, InputQueue};
use crate::renderer::{FrameView, Renderer};
use crate::settings::{Settings, SettingsError};
use crate::sim::{GameEvent, GameState, tick};

/// Game instance holding all state
pub struct Game<S: Storage> {
    state: GameState,
    leaderboard: Leaderboard,
    storage: S,
    input: InputQueue,
    show_leaderboard: bool,
}

impl<S: Storage> Game<S> {
    /// Build a game and load the persisted leaderboard
    pub fn new(settings: Settings, seed: u64, storage: S) -> Result<Self, SettingsError> {
        let capacity = settings.leaderboard_capacity;
        let mut state = GameState::new(settings, seed)?;
        let leaderboard = Leaderboard::load(&storage, capacity);
        state.score.best = leaderboard.best();
        log::info!("Game ready (seed {seed}, best {})", state.score.best);

        Ok(Self {
            state,
            leaderboard,
            storage,
            input: InputQueue::new(),
            show_leaderboard: false,
        })
    }

    /// Queue a command for the next frame
    pub fn push_input(&mut self, command: InputCommand) -> bool {
        self.input.push(command)
    }

    /// Drain input and advance one frame at wall-clock `now_ms`
    pub fn update(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let commands = self.input.drain();
        let (tick_input, ui) = input::collect(&commands);
        if let Some(change) = ui.leaderboard {
            self.show_leaderboard = change.apply(self.show_leaderboard);
        }

        let events = tick(&mut self.state, &tick_input, now_ms);
        for event in &events {
            self.on_event(*event);
        }
        events
    }

    /// Draw the current state
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let view = FrameView {
            state: &self.state,
            leaderboard: self.leaderboard.query(),
            show_leaderboard: self.show_leaderboard,
        };
        renderer.render(&view);
    }

    /// One full frame: Update then Render
    pub fn frame<R: Renderer + ?Sized>(&mut self, now_ms: f64, renderer: &mut R) -> Vec<GameEvent> {
        let events = self.update(now_ms);
        self.render(renderer);
        events
    }

    fn on_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::GameOver { score } => {
                if self
                    .leaderboard
                    .record_if_best(score, Utc::now(), &mut self.storage)
                {
                    log::info!("New best score: {score}");
                }
                self.state.score.best = self.state.score.best.max(self.leaderboard.best());
            }
            GameEvent::Paused => log::info!("Paused"),
            GameEvent::Resumed => log::info!("Resumed"),
            GameEvent::Scored { total } => log::debug!("Score: {total}"),
            _ => {}
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn show_leaderboard(&self) -> bool {
        self.show_leaderboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStorage, StorageError};
    use crate::platform::{Clock, ManualClock};
    use crate::renderer::Overlay;
    use crate::sim::GamePhase;

    /// Records what each frame showed
    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<(Option<Overlay>, bool, usize)>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, view: &FrameView<'_>) {
            self.frames
                .push((view.overlay(), view.show_leaderboard, view.leaderboard.len()));
        }
    }

    struct ReadOnlyStorage(MemoryStorage);

    impl Storage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }
    }

    const FRAME: f64 = 1000.0 / 60.0;

    /// Run frames until the phase changes away from `phase` (bounded)
    fn run_while<S: Storage>(
        game: &mut Game<S>,
        clock: &ManualClock,
        renderer: &mut RecordingRenderer,
        phase: GamePhase,
    ) {
        for _ in 0..10_000 {
            if game.state().phase != phase {
                return;
            }
            clock.advance(FRAME);
            game.frame(clock.now_ms(), renderer);
        }
        panic!("phase never left {phase:?}");
    }

    #[test]
    fn test_full_run_records_best() {
        let clock = ManualClock::new(0.0);
        let mut renderer = RecordingRenderer::default();
        let mut game = Game::new(Settings::default(), 42, MemoryStorage::new()).unwrap();

        game.frame(clock.now_ms(), &mut renderer);
        assert_eq!(renderer.frames[0].0, Some(Overlay::Ready));

        game.push_input(InputCommand::Restart);
        game.frame(clock.now_ms(), &mut renderer);
        assert_eq!(game.state().phase, GamePhase::CountingDown);
        assert_eq!(renderer.frames[1].0, Some(Overlay::Countdown(3)));

        run_while(&mut game, &clock, &mut renderer, GamePhase::CountingDown);
        assert!(clock.now_ms() >= 3000.0);
        assert_eq!(game.state().phase, GamePhase::Running);

        game.state.score.current = 4;
        run_while(&mut game, &clock, &mut renderer, GamePhase::Running);
        assert_eq!(game.state().phase, GamePhase::Ended);
        assert_eq!(game.state().score.best, 4);
        assert_eq!(game.leaderboard().top_score(), Some(4));
        assert_eq!(
            renderer.frames.last().map(|f| f.0),
            Some(Some(Overlay::GameOver { score: 4, best: 4 }))
        );

        let stored = game
            .storage()
            .get(Leaderboard::STORAGE_KEY)
            .unwrap()
            .unwrap();
        assert!(stored.contains(r#""score":4"#));
    }

    #[test]
    fn test_input_applies_at_next_frame() {
        let settings = Settings {
            countdown: false,
            ..Default::default()
        };
        let mut game = Game::new(settings, 1, MemoryStorage::new()).unwrap();
        game.push_input(InputCommand::Restart);
        assert_eq!(game.state().phase, GamePhase::NotStarted);

        game.update(0.0);
        assert_eq!(game.state().phase, GamePhase::Running);

        game.push_input(InputCommand::TogglePause);
        assert_eq!(game.state().phase, GamePhase::Running);
        let events = game.update(16.0);
        assert_eq!(events, vec![GameEvent::Paused]);

        game.push_input(InputCommand::Resume);
        game.update(32.0);
        assert_eq!(game.state().phase, GamePhase::Running);
    }

    #[test]
    fn test_leaderboard_panel_is_ui_only() {
        let mut renderer = RecordingRenderer::default();
        let mut game = Game::new(Settings::default(), 1, MemoryStorage::new()).unwrap();
        let before = game.state().bird.clone();

        game.push_input(InputCommand::OpenLeaderboard);
        game.frame(0.0, &mut renderer);
        assert!(game.show_leaderboard());
        assert_eq!(game.state().phase, GamePhase::NotStarted);
        assert_eq!(game.state().bird, before);

        game.push_input(InputCommand::CloseLeaderboard);
        game.frame(16.0, &mut renderer);
        assert!(!game.show_leaderboard());
        assert_eq!(
            renderer.frames.iter().map(|f| f.1).collect::<Vec<_>>(),
            vec![true, false]
        );
    }

    #[test]
    fn test_leaderboard_double_toggle_in_one_frame() {
        let mut game = Game::new(Settings::default(), 1, MemoryStorage::new()).unwrap();

        game.push_input(InputCommand::ToggleLeaderboard);
        game.push_input(InputCommand::ToggleLeaderboard);
        game.update(0.0);
        assert!(!game.show_leaderboard());

        game.push_input(InputCommand::ToggleLeaderboard);
        game.update(16.0);
        assert!(game.show_leaderboard());

        game.push_input(InputCommand::ToggleLeaderboard);
        game.push_input(InputCommand::ToggleLeaderboard);
        game.push_input(InputCommand::ToggleLeaderboard);
        game.update(32.0);
        assert!(!game.show_leaderboard());
    }

    #[test]
    fn test_loads_previous_best() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                Leaderboard::STORAGE_KEY,
                r#"[{"score":11,"date":"2024-05-01T12:00:00Z"}]"#,
            )
            .unwrap();
        let game = Game::new(Settings::default(), 1, storage).unwrap();
        assert_eq!(game.state().score.best, 11);
        assert_eq!(game.leaderboard().query().len(), 1);
    }

    #[test]
    fn test_unwritable_storage_does_not_stop_the_game() {
        let settings = Settings {
            countdown: false,
            ..Default::default()
        };
        let mut game = Game::new(settings, 1, ReadOnlyStorage(MemoryStorage::new())).unwrap();
        let clock = ManualClock::new(0.0);
        let mut renderer = RecordingRenderer::default();

        game.push_input(InputCommand::Restart);
        game.frame(0.0, &mut renderer);
        game.state.score.current = 2;
        run_while(&mut game, &clock, &mut renderer, GamePhase::Running);
        assert_eq!(game.state().phase, GamePhase::Ended);
        assert_eq!(game.leaderboard().top_score(), Some(2));

        // Restart works as usual afterwards
        game.push_input(InputCommand::Restart);
        game.frame(clock.now_ms(), &mut renderer);
        assert_eq!(game.state().phase, GamePhase::Running);
        assert_eq!(game.state().score.current, 0);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            floor_height: 470.0,
            ..Default::default()
        };
        assert!(Game::new(settings, 1, MemoryStorage::new()).is_err());
    }
}
