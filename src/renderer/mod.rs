//! Rendering module
//!
//! Renderers only ever see a read-only `FrameView`; they cannot mutate the
//! simulation. Painting happens on a software `Canvas` in logical playfield
//! coordinates, and the terminal presenter puts it on screen.

pub mod assets;
pub mod canvas;
pub mod scene;
pub mod terminal;

pub use assets::{AssetId, Assets, Sprite};
pub use canvas::{Canvas, Rgb};
pub use scene::paint_frame;
pub use terminal::{TerminalRenderer, install_panic_hook};

use crate::highscores::LeaderboardEntry;
use crate::sim::{GamePhase, GameState};

/// What the renderer is allowed to see
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub state: &'a GameState,
    pub leaderboard: &'a [LeaderboardEntry],
    pub show_leaderboard: bool,
}

impl FrameView<'_> {
    pub fn overlay(&self) -> Option<Overlay> {
        Overlay::for_state(self.state)
    }
}

/// Screen drawn on top of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Title screen, waiting for the start gesture
    Ready,
    Countdown(u32),
    Paused,
    GameOver { score: u32, best: u32 },
}

impl Overlay {
    /// Overlay for the current phase (None while running)
    pub fn for_state(state: &GameState) -> Option<Self> {
        match state.phase {
            GamePhase::NotStarted => Some(Overlay::Ready),
            GamePhase::CountingDown => Some(Overlay::Countdown(state.countdown_remaining)),
            GamePhase::Running => None,
            GamePhase::Paused => Some(Overlay::Paused),
            GamePhase::Ended => Some(Overlay::GameOver {
                score: state.score.current,
                best: state.score.best,
            }),
        }
    }
}

/// Paints one frame from read-only state
pub trait Renderer {
    /// Draw the frame; failures are handled inside (never propagated)
    fn render(&mut self, view: &FrameView<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_overlay_per_phase() {
        let mut state = GameState::new(Settings::default(), 1).unwrap();
        assert_eq!(Overlay::for_state(&state), Some(Overlay::Ready));

        state.phase = GamePhase::CountingDown;
        state.countdown_remaining = 2;
        assert_eq!(Overlay::for_state(&state), Some(Overlay::Countdown(2)));

        state.phase = GamePhase::Running;
        assert_eq!(Overlay::for_state(&state), None);

        state.phase = GamePhase::Paused;
        assert_eq!(Overlay::for_state(&state), Some(Overlay::Paused));

        state.phase = GamePhase::Ended;
        state.score.current = 3;
        state.score.best = 8;
        assert_eq!(
            Overlay::for_state(&state),
            Some(Overlay::GameOver { score: 3, best: 8 })
        );
    }
}
