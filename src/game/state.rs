use std::fmt;

use rand::Rng;

use crate::error::GameError;

use super::moves;
use super::{Board, Player, Position, Side};

/// Full game position: the board, both players, where each stands, and whose
/// turn it is. Search explores clones; a clone shares nothing with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    players: [Player; 2],
    positions: [Option<Position>; 2],
    active: Side,
    last_move: Option<Position>,
    terminal: bool,
}

impl GameState {
    /// Start a game on `board` with `first` to move.
    pub fn new(board: Board, player_one: Player, player_two: Player, first: Side) -> Self {
        let mut state = GameState {
            board,
            players: [player_one, player_two],
            positions: [None, None],
            active: first,
            last_move: None,
            terminal: false,
        };
        state.refresh_terminal();
        state
    }

    /// Start a game with the first mover drawn from `rng`.
    pub fn with_random_first<R: Rng>(
        board: Board,
        player_one: Player,
        player_two: Player,
        rng: &mut R,
    ) -> Self {
        let first = if rng.random_bool(0.5) {
            Side::PlayerOne
        } else {
            Side::PlayerTwo
        };
        Self::new(board, player_one, player_two, first)
    }

    /// Build a mid-game position. Every assigned position must already be
    /// occupied on `board`, and the two players cannot share a cell.
    pub fn from_parts(
        board: Board,
        player_one: Player,
        player_two: Player,
        positions: [Option<Position>; 2],
        active: Side,
    ) -> Result<Self, GameError> {
        for pos in positions.into_iter().flatten() {
            if board.is_free(pos)? {
                return Err(GameError::PositionNotOccupied(pos));
            }
        }
        if let [Some(one), Some(two)] = positions {
            if one == two {
                return Err(GameError::CellOccupied(one));
            }
        }
        let mut state = GameState {
            board,
            players: [player_one, player_two],
            positions,
            active,
            last_move: None,
            terminal: false,
        };
        state.refresh_terminal();
        Ok(state)
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn position(&self, side: Side) -> Option<Position> {
        self.positions[side.index()]
    }

    /// Side whose move is awaited
    pub fn active_side(&self) -> Side {
        self.active
    }

    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    /// Number of cells occupied so far.
    pub fn move_count(&self) -> usize {
        self.board.cell_count() - self.board.free_count()
    }

    /// True when the side to move has no legal destination.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// The side that won, once the game is over.
    pub fn winner(&self) -> Option<Side> {
        self.terminal.then(|| self.active.other())
    }

    /// Legal destinations for the active side.
    pub fn legal_moves(&self) -> Vec<Position> {
        moves::legal_moves(&self.board, self.position(self.active))
    }

    /// Legal destinations for either side, regardless of whose turn it is.
    pub fn legal_moves_for(&self, side: Side) -> Vec<Position> {
        moves::legal_moves(&self.board, self.position(side))
    }

    /// Number of legal destinations for `side`.
    pub fn mobility(&self, side: Side) -> usize {
        moves::count_moves(&self.board, self.position(side))
    }

    /// Utility of a terminal state relative to the fixed labeling: the stuck
    /// side has lost, so `-inf` when PlayerOne is stuck and `+inf` when
    /// PlayerTwo is. Non-terminal states yield `0.0`.
    pub fn utility(&self) -> f64 {
        if !self.terminal {
            return 0.0;
        }
        match self.active {
            Side::PlayerOne => f64::NEG_INFINITY,
            Side::PlayerTwo => f64::INFINITY,
        }
    }

    /// Apply a move and return the new state, leaving `self` untouched.
    pub fn apply_move(&self, position: Position) -> Result<GameState, GameError> {
        let mut next = self.clone();
        next.apply_move_mut(position)?;
        Ok(next)
    }

    /// Apply a move in place. On error the state is unchanged.
    pub fn apply_move_mut(&mut self, position: Position) -> Result<(), GameError> {
        if self.terminal {
            return Err(GameError::GameOver);
        }
        if !self.board.contains(position) {
            return Err(GameError::OutOfBounds {
                position: (position.row, position.col),
                width: self.board.width(),
                height: self.board.height(),
            });
        }
        if !self.legal_moves().contains(&position) {
            return Err(GameError::IllegalMove(position));
        }

        self.board.occupy(position)?;
        self.advance(position);
        Ok(())
    }

    /// Successor state for a move taken from `legal_moves()`. Skips the
    /// legality check; search only ever feeds it generated moves.
    pub(crate) fn successor(&self, position: Position) -> GameState {
        let mut next = self.clone();
        next.board.occupy_unchecked(position);
        next.advance(position);
        next
    }

    fn advance(&mut self, position: Position) {
        self.positions[self.active.index()] = Some(position);
        self.last_move = Some(position);
        self.active = self.active.other();
        self.refresh_terminal();
    }

    fn refresh_terminal(&mut self) {
        self.terminal = !moves::has_legal_move(&self.board, self.position(self.active));
    }

    fn side_at(&self, pos: Position) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|&side| self.position(side) == Some(pos))
    }
}

/// Board view labelled with column letters and row numbers. `1`/`2` mark the
/// players, `#` other occupied cells, `.` free cells.
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.board.width();
        let label_width = self.board.height().to_string().len();

        write!(f, "{:label_width$}", "")?;
        for col in 0..width {
            write!(f, " {}", Position::column_letter(col))?;
        }
        writeln!(f)?;

        for row in 0..self.board.height() {
            write!(f, "{:>label_width$}", row + 1)?;
            for col in 0..width {
                let pos = Position::new(row, col);
                let mark = match self.side_at(pos) {
                    Some(side) => side.marker(),
                    None if self.board.is_free_unchecked(pos) => '.',
                    None => '#',
                };
                write!(f, " {mark}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PlayerKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn players() -> (Player, Player) {
        (
            Player::new("P1", PlayerKind::Computer),
            Player::new("P2", PlayerKind::Human),
        )
    }

    fn new_game(width: usize, height: usize) -> GameState {
        let (p1, p2) = players();
        GameState::new(Board::new(width, height).unwrap(), p1, p2, Side::PlayerOne)
    }

    #[test]
    fn test_initial_state() {
        let state = new_game(3, 2);
        assert_eq!(state.active_side(), Side::PlayerOne);
        assert_eq!(state.active_player().name(), "P1");
        assert!(!state.is_terminal());
        assert_eq!(state.legal_moves().len(), 6);
        assert_eq!(state.position(Side::PlayerOne), None);
        assert_eq!(state.last_move(), None);
    }

    #[test]
    fn test_apply_move() {
        let state = new_game(3, 2);
        let new_state = state.apply_move(Position::new(1, 2)).unwrap();

        assert_eq!(new_state.active_side(), Side::PlayerTwo);
        assert_eq!(new_state.position(Side::PlayerOne), Some(Position::new(1, 2)));
        assert_eq!(new_state.last_move(), Some(Position::new(1, 2)));
        assert!(!new_state.board().is_free(Position::new(1, 2)).unwrap());
        assert_eq!(new_state.move_count(), 1);
        // Original untouched
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn test_forced_sequence_reaches_terminal() {
        let mut state = new_game(3, 2);
        let sequence = [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)];

        for (i, &cell) in sequence.iter().enumerate() {
            assert!(!state.is_terminal(), "terminal too early at move {i}");
            state.apply_move_mut(cell.into()).unwrap();
        }

        assert!(state.is_terminal());
        assert_eq!(state.active_side(), Side::PlayerOne);
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.winner(), Some(Side::PlayerTwo));
        assert_eq!(state.utility(), f64::NEG_INFINITY);
        assert_eq!(state.apply_move(Position::new(0, 0)), Err(GameError::GameOver));
    }

    #[test]
    fn test_illegal_move_leaves_state_unchanged() {
        let mut state = new_game(4, 4);
        state.apply_move_mut(Position::new(0, 0)).unwrap();
        state.apply_move_mut(Position::new(3, 3)).unwrap();
        let before = state.clone();

        // Occupied
        assert_eq!(
            state.apply_move_mut(Position::new(3, 3)),
            Err(GameError::IllegalMove(Position::new(3, 3)))
        );
        // Free but not on a line from (0, 0)
        assert_eq!(
            state.apply_move_mut(Position::new(1, 2)),
            Err(GameError::IllegalMove(Position::new(1, 2)))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_out_of_bounds_move() {
        let state = new_game(3, 2);
        assert!(matches!(
            state.apply_move(Position::new(2, 0)),
            Err(GameError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_utility_player_two_stuck() {
        let mut board = Board::new(2, 1).unwrap();
        board.occupy(Position::new(0, 0)).unwrap();
        board.occupy(Position::new(0, 1)).unwrap();
        let (p1, p2) = players();
        let state = GameState::from_parts(
            board,
            p1,
            p2,
            [Some(Position::new(0, 0)), Some(Position::new(0, 1))],
            Side::PlayerTwo,
        )
        .unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.utility(), f64::INFINITY);
        assert_eq!(state.winner(), Some(Side::PlayerOne));
    }

    #[test]
    fn test_from_parts_requires_occupied_positions() {
        let board = Board::new(3, 3).unwrap();
        let (p1, p2) = players();
        let result = GameState::from_parts(
            board,
            p1,
            p2,
            [Some(Position::new(1, 1)), None],
            Side::PlayerTwo,
        );
        assert_eq!(result, Err(GameError::PositionNotOccupied(Position::new(1, 1))));
    }

    #[test]
    fn test_from_parts_rejects_shared_cell() {
        let mut board = Board::new(3, 3).unwrap();
        board.occupy(Position::new(1, 1)).unwrap();
        let (p1, p2) = players();
        let result = GameState::from_parts(
            board,
            p1,
            p2,
            [Some(Position::new(1, 1)), Some(Position::new(1, 1))],
            Side::PlayerOne,
        );
        assert_eq!(result, Err(GameError::CellOccupied(Position::new(1, 1))));
    }

    #[test]
    fn test_clone_is_isolated() {
        let state = new_game(3, 3);
        let mut clone = state.clone();
        clone.apply_move_mut(Position::new(1, 1)).unwrap();

        assert!(state.board().is_free(Position::new(1, 1)).unwrap());
        assert_eq!(state.position(Side::PlayerOne), None);
        assert_eq!(state.active_side(), Side::PlayerOne);
    }

    #[test]
    fn test_random_first_is_seeded() {
        let (p1, p2) = players();
        let board = Board::new(3, 3).unwrap();
        let first = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            GameState::with_random_first(board.clone(), p1.clone(), p2.clone(), &mut rng)
                .active_side()
        };
        assert_eq!(first(7), first(7));
        let sides: Vec<Side> = (0..32).map(first).collect();
        assert!(sides.contains(&Side::PlayerOne));
        assert!(sides.contains(&Side::PlayerTwo));
    }

    #[test]
    fn test_display() {
        let mut state = new_game(3, 2);
        state.apply_move_mut(Position::new(0, 0)).unwrap();
        state.apply_move_mut(Position::new(1, 2)).unwrap();
        state.apply_move_mut(Position::new(0, 1)).unwrap();
        let rendered = state.to_string();
        assert_eq!(rendered, "  A B C\n1 # 1 .\n2 . . 2\n");
    }
}
