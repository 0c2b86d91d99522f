//! Flappy entry point
//!
//! Runs in the terminal: crossterm input, half-block rendering, file-backed
//! leaderboard and settings. Logs go to a file in the data directory since
//! the screen belongs to the game.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseEventKind};
use glam::Vec2;

use flappy::persistence::FileStorage;
use flappy::platform::{Clock, FramePacer, InputCommand, SystemClock};
use flappy::renderer::{Assets, TerminalRenderer, install_panic_hook};
use flappy::{Game, Settings};

const DATA_DIR_ENV: &str = "FLAPPY_DATA_DIR";
const DEFAULT_DATA_DIR: &str = ".flappy";
const TARGET_FPS: u32 = 60;

fn data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

fn init_logging(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("flappy.log"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Map a key to a game command; `None` for keys the game ignores
fn key_command(code: KeyCode) -> Option<InputCommand> {
    match code {
        KeyCode::Char(' ') | KeyCode::Up => Some(InputCommand::Flap),
        KeyCode::Enter => Some(InputCommand::Restart),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputCommand::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputCommand::Resume),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(InputCommand::ToggleLeaderboard),
        _ => None,
    }
}

fn is_quit(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}

fn main() -> io::Result<()> {
    let dir = data_dir();
    init_logging(&dir)?;
    log::info!("Flappy starting (data dir {})", dir.display());

    let mut storage = FileStorage::new(&dir);
    let settings = Settings::load(&storage);
    if !Settings::is_stored(&storage) {
        settings.save(&mut storage);
    }
    let logical = Vec2::new(settings.canvas_width, settings.canvas_height);

    let mut game = Game::new(settings, seed(), storage)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let clock = SystemClock::new();
    let mut pacer = FramePacer::new(TARGET_FPS);

    install_panic_hook();
    // Dropping the renderer restores the terminal on every exit path
    let mut renderer = TerminalRenderer::enter(logical, Assets::builtin())?;

    'frames: loop {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if is_quit(key.code) {
                        break 'frames;
                    }
                    if let Some(command) = key_command(key.code) {
                        game.push_input(command);
                    }
                }
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(_) = mouse.kind {
                        game.push_input(InputCommand::Restart);
                    }
                }
                Event::Resize(cols, rows) => renderer.resize(cols, rows),
                _ => {}
            }
        }

        game.frame(clock.now_ms(), &mut renderer);
        pacer.wait();
    }

    renderer.leave()?;
    log::info!("Flappy exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_command(KeyCode::Char(' ')), Some(InputCommand::Flap));
        assert_eq!(key_command(KeyCode::Up), Some(InputCommand::Flap));
        assert_eq!(key_command(KeyCode::Enter), Some(InputCommand::Restart));
        assert_eq!(key_command(KeyCode::Char('p')), Some(InputCommand::TogglePause));
        assert_eq!(key_command(KeyCode::Char('r')), Some(InputCommand::Resume));
        assert_eq!(key_command(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_leaderboard_key_always_toggles() {
        assert_eq!(
            key_command(KeyCode::Char('l')),
            Some(InputCommand::ToggleLeaderboard)
        );
        assert_eq!(
            key_command(KeyCode::Char('L')),
            Some(InputCommand::ToggleLeaderboard)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(KeyCode::Esc));
        assert!(is_quit(KeyCode::Char('q')));
        assert!(!is_quit(KeyCode::Char(' ')));
    }
}
