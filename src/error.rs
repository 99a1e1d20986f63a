use std::path::PathBuf;

use crate::game::Position;

/// Errors raised by the game engine: board access and move application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("position {position:?} is outside the {width}x{height} board")]
    OutOfBounds {
        position: (usize, usize),
        width: usize,
        height: usize,
    },

    #[error("illegal move to {0}")]
    IllegalMove(Position),

    #[error("cell {0} is already occupied")]
    CellOccupied(Position),

    #[error("position {0} is assigned to a player but not occupied")]
    PositionNotOccupied(Position),

    #[error("unknown player type '{0}' (expected 'human' or 'computer')")]
    InvalidPlayerType(String),

    #[error("invalid coordinate '{0}' (expected a column letter and row number, e.g. B3)")]
    InvalidCoordinate(String),

    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("game is already over")]
    GameOver,
}

/// Errors an agent can report instead of a move.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("player resigned")]
    Resigned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a game in progress.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("automated player {agent} produced a rejected move {position}: {source}")]
    AgentDefect {
        agent: String,
        position: Position,
        source: GameError,
    },

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("game is not in progress")]
    NotInProgress,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid game setup: {0}")]
    Game(#[from] GameError),
}
