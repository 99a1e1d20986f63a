use std::path::Path;

use tracing::warn;

use crate::ai::{Agent, Algorithm, HeuristicKind, HumanAgent, SearchAgent};
use crate::error::ConfigError;
use crate::game::{Board, Player, PlayerKind, MAX_COLUMNS, MAX_ROWS};

/// Board dimensions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: 7,
            height: 7,
        }
    }
}

/// One seat at the board. `kind` is kept as a string so an unknown role is
/// reported as an invalid player type rather than a TOML error.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub kind: String,
}

impl PlayerConfig {
    fn new(name: &str, kind: PlayerKind) -> Self {
        PlayerConfig {
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn to_player(&self) -> Result<Player, ConfigError> {
        Ok(Player::parse(self.name.clone(), &self.kind)?)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig::new("Player", PlayerKind::Human)
    }
}

/// Settings for computer players.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub depth: usize,
    /// Ignore `depth` and search every line to the end of the game.
    pub exhaustive: bool,
    pub heuristic: HeuristicKind,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            algorithm: Algorithm::AlphaBeta,
            depth: 4,
            exhaustive: false,
            heuristic: HeuristicKind::Mobility,
        }
    }
}

impl SearchConfig {
    pub fn depth_limit(&self) -> Option<usize> {
        (!self.exhaustive).then_some(self.depth)
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed for choosing the first player; random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub board: BoardConfig,
    pub player_one: PlayerConfig,
    pub player_two: PlayerConfig,
    pub search: SearchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            seed: None,
            board: BoardConfig::default(),
            player_one: PlayerConfig::new("Computer", PlayerKind::Computer),
            player_two: PlayerConfig::new("Player", PlayerKind::Human),
            search: SearchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width == 0 || self.board.width > MAX_COLUMNS {
            return Err(ConfigError::Validation(format!(
                "board.width must be in [1, {MAX_COLUMNS}]"
            )));
        }
        if self.board.height == 0 || self.board.height > MAX_ROWS {
            return Err(ConfigError::Validation(format!(
                "board.height must be in [1, {MAX_ROWS}]"
            )));
        }
        if self.board.width * self.board.height < 2 {
            return Err(ConfigError::Validation(
                "board must have room for both players".into(),
            ));
        }
        if self.search.depth == 0 {
            return Err(ConfigError::Validation(
                "search.depth must be >= 1".into(),
            ));
        }
        self.player_one.to_player()?;
        self.player_two.to_player()?;

        Ok(())
    }

    pub fn build_board(&self) -> Result<Board, ConfigError> {
        Ok(Board::new(self.board.width, self.board.height)?)
    }

    /// Decision maker for a configured player: a terminal prompt for humans,
    /// a search for computers.
    pub fn build_agent(&self, player: &Player) -> Box<dyn Agent> {
        match player.kind() {
            PlayerKind::Human => Box::new(HumanAgent::stdio(player.name())),
            PlayerKind::Computer => Box::new(
                SearchAgent::new(
                    player.name(),
                    self.search.algorithm,
                    self.search.depth_limit(),
                )
                .with_heuristic(self.search.heuristic.build()),
            ),
        }
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
