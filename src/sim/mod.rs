//! Simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic for a
//! given seed and input sequence:
//! - One fixed timestep per Update
//! - Seeded RNG only
//! - Wall-clock time enters only through `tick`'s `now_ms` (countdown)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, hits_boundary, hits_pipe};
pub use state::{Bird, GameEvent, GamePhase, GameState, Pipe, Scenery, Score};
pub use tick::{TickInput, advance_pipes, tick, update};
