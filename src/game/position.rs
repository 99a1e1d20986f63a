use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

/// Widest board that can still be addressed with a single column letter.
pub const MAX_COLUMNS: usize = 26;

/// Tallest board accepted; keeps row labels to two digits.
pub const MAX_ROWS: usize = 99;

/// A cell coordinate, 0-based. `row` counts down from the top, `col` from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Column letter used in human notation (`A` for column 0).
    pub fn column_letter(col: usize) -> char {
        debug_assert!(col < MAX_COLUMNS);
        (b'A' + col as u8) as char
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.col < MAX_COLUMNS {
            write!(f, "{}{}", Self::column_letter(self.col), self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Parses human notation: a column letter followed by a 1-based row number,
/// e.g. `B3` is row 2, column 1.
impl FromStr for Position {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || GameError::InvalidCoordinate(trimmed.to_string());

        let mut chars = trimmed.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        if !letter.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let col = (letter.to_ascii_uppercase() as u8 - b'A') as usize;

        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let row: usize = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(Position::new(row - 1, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_human_notation() {
        assert_eq!("A1".parse::<Position>().unwrap(), Position::new(0, 0));
        assert_eq!("b3".parse::<Position>().unwrap(), Position::new(2, 1));
        assert_eq!(" C12 ".parse::<Position>().unwrap(), Position::new(11, 2));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "1A", "A", "A0", "AA1", "A-1", "A+1", "B +2", "?3"] {
            assert!(
                matches!(input.parse::<Position>(), Err(GameError::InvalidCoordinate(_))),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn test_display_matches_parse() {
        let pos = Position::new(4, 3);
        assert_eq!(pos.to_string(), "D5");
        assert_eq!(pos.to_string().parse::<Position>().unwrap(), pos);
    }
}
