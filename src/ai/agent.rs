use crate::error::{AgentError, GameError};
use crate::game::{GameState, PlayerKind, Position};

/// Universal interface for anything that picks moves: a person at the
/// terminal or a search.
pub trait Agent {
    /// Choose a destination for the active player.
    ///
    /// Only called while the active player still has a legal move. Returning
    /// [`AgentError::Resigned`] concedes the game.
    fn decide(&mut self, state: &GameState) -> Result<Position, AgentError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Human agents get their rejected moves reported back and are asked
    /// again; a rejected move from a computer agent aborts the game.
    fn kind(&self) -> PlayerKind;

    /// Called when the move returned by `decide` was rejected.
    fn on_rejected(&mut self, _position: Position, _error: &GameError) {}
}
