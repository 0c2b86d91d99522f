//! Discrete input commands
//!
//! Event handlers never touch game state directly. They push commands into a
//! bounded queue which the driver drains once at the start of each frame.

use std::collections::VecDeque;

use crate::sim::TickInput;

/// Maximum queued commands between two frames
pub const MAX_PENDING_COMMANDS: usize = 32;

/// A player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Flap,
    TogglePause,
    Resume,
    /// Start gesture on the title screen, or restart after game over
    Restart,
    OpenLeaderboard,
    CloseLeaderboard,
    ToggleLeaderboard,
}

/// Bounded FIFO of pending commands
#[derive(Debug, Clone)]
pub struct InputQueue {
    pending: VecDeque<InputCommand>,
    capacity: usize,
    dropped: u64,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::with_capacity(MAX_PENDING_COMMANDS)
    }
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Queue a command; returns false (and drops it) when the queue is full
    pub fn push(&mut self, command: InputCommand) -> bool {
        if self.pending.len() >= self.capacity {
            self.dropped += 1;
            log::warn!("Input queue full, dropping {:?}", command);
            return false;
        }
        self.pending.push_back(command);
        true
    }

    /// Take every pending command in arrival order
    pub fn drain(&mut self) -> Vec<InputCommand> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Commands rejected because the queue was full
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Net change to the leaderboard panel over one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelChange {
    /// Force open (true) or closed (false)
    Set(bool),
    /// Flip whatever is currently shown
    Toggle,
}

impl PanelChange {
    /// Resolve against the panel's current visibility
    pub fn apply(self, open: bool) -> bool {
        match self {
            PanelChange::Set(value) => value,
            PanelChange::Toggle => !open,
        }
    }
}

/// UI-only effects of a drained batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiInput {
    pub leaderboard: Option<PanelChange>,
}

/// Fold a batch of commands into one tick's input plus UI changes
///
/// Toggles pair up: two pause (or leaderboard) toggles in the same frame
/// cancel out.
pub fn collect(commands: &[InputCommand]) -> (TickInput, UiInput) {
    let mut input = TickInput::default();
    let mut ui = UiInput::default();
    for command in commands {
        match command {
            InputCommand::Flap => input.flap = true,
            InputCommand::TogglePause => input.toggle_pause = !input.toggle_pause,
            InputCommand::Resume => input.resume = true,
            InputCommand::Restart => input.restart = true,
            InputCommand::OpenLeaderboard => ui.leaderboard = Some(PanelChange::Set(true)),
            InputCommand::CloseLeaderboard => ui.leaderboard = Some(PanelChange::Set(false)),
            InputCommand::ToggleLeaderboard => {
                ui.leaderboard = match ui.leaderboard {
                    None => Some(PanelChange::Toggle),
                    Some(PanelChange::Toggle) => None,
                    Some(PanelChange::Set(open)) => Some(PanelChange::Set(!open)),
                }
            }
        }
    }
    (input, ui)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo_and_drains() {
        let mut queue = InputQueue::new();
        queue.push(InputCommand::Restart);
        queue.push(InputCommand::Flap);
        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.drain(),
            vec![InputCommand::Restart, InputCommand::Flap]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut queue = InputQueue::with_capacity(2);
        assert!(queue.push(InputCommand::Flap));
        assert!(queue.push(InputCommand::Flap));
        assert!(!queue.push(InputCommand::TogglePause));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped(), 1);
    }

    #[test]
    fn test_collect_flags() {
        let (input, ui) = collect(&[
            InputCommand::Flap,
            InputCommand::Flap,
            InputCommand::OpenLeaderboard,
        ]);
        assert!(input.flap);
        assert!(!input.restart);
        assert_eq!(ui.leaderboard, Some(PanelChange::Set(true)));

        let (input, ui) = collect(&[InputCommand::TogglePause, InputCommand::TogglePause]);
        assert!(!input.toggle_pause);
        assert_eq!(ui.leaderboard, None);

        let (_, ui) = collect(&[InputCommand::OpenLeaderboard, InputCommand::CloseLeaderboard]);
        assert_eq!(ui.leaderboard, Some(PanelChange::Set(false)));
    }

    #[test]
    fn test_leaderboard_toggles_fold_in_order() {
        let toggle = InputCommand::ToggleLeaderboard;

        let (_, ui) = collect(&[toggle]);
        assert_eq!(ui.leaderboard.map(|c| c.apply(false)), Some(true));
        assert_eq!(ui.leaderboard.map(|c| c.apply(true)), Some(false));

        // Open then close within one frame leaves the panel as it was
        let (_, ui) = collect(&[toggle, toggle]);
        assert_eq!(ui.leaderboard, None);

        let (_, ui) = collect(&[InputCommand::OpenLeaderboard, toggle]);
        assert_eq!(ui.leaderboard, Some(PanelChange::Set(false)));

        let (_, ui) = collect(&[toggle, InputCommand::CloseLeaderboard]);
        assert_eq!(ui.leaderboard, Some(PanelChange::Set(false)));
    }
}
