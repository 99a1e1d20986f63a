//! Core isolation game logic: board representation, player identities, move
//! generation, and the game state with its move transitions.

mod board;
pub mod moves;
mod player;
mod position;
mod state;

pub use board::Board;
pub use player::{Player, PlayerKind, Side};
pub use position::{Position, MAX_COLUMNS, MAX_ROWS};
pub use state::GameState;
