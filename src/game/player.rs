use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// One of the two seats at the board. The search utility is defined relative
/// to this labeling: `PlayerOne` maximizes, `PlayerTwo` minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::PlayerOne, Side::PlayerTwo];

    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::PlayerOne => Side::PlayerTwo,
            Side::PlayerTwo => Side::PlayerOne,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::PlayerOne => 0,
            Side::PlayerTwo => 1,
        }
    }

    /// Marker used when printing the board
    pub fn marker(self) -> char {
        match self {
            Side::PlayerOne => '1',
            Side::PlayerTwo => '2',
        }
    }
}

/// Who makes the decisions for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Computer,
}

impl FromStr for PlayerKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "computer" | "ai" | "automated" => Ok(PlayerKind::Computer),
            _ => Err(GameError::InvalidPlayerType(s.to_string())),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => f.write_str("human"),
            PlayerKind::Computer => f.write_str("computer"),
        }
    }
}

/// Player identity: a name and a role. Carries no behavior.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    name: String,
    kind: PlayerKind,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Player {
            name: name.into(),
            kind,
        }
    }

    /// Build a player from a role string such as `"human"` or `"computer"`.
    pub fn parse(name: impl Into<String>, kind: &str) -> Result<Self, GameError> {
        Ok(Player::new(name, kind.parse()?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_side() {
        assert_eq!(Side::PlayerOne.other(), Side::PlayerTwo);
        assert_eq!(Side::PlayerTwo.other(), Side::PlayerOne);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Human".parse::<PlayerKind>().unwrap(), PlayerKind::Human);
        assert_eq!("computer".parse::<PlayerKind>().unwrap(), PlayerKind::Computer);
        assert_eq!("AI".parse::<PlayerKind>().unwrap(), PlayerKind::Computer);
    }

    #[test]
    fn test_invalid_kind_is_rejected() {
        assert_eq!(
            Player::parse("Frank", "spectator"),
            Err(GameError::InvalidPlayerType("spectator".to_string()))
        );
    }

    #[test]
    fn test_player_display() {
        let player = Player::new("Frank", PlayerKind::Human);
        assert_eq!(player.to_string(), "Frank (human)");
    }
}
