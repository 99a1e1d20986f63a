//! Legal-move generation: from a position a player slides like a queen, one
//! cell at a time, until the board edge or the first occupied cell.

use super::board::Board;
use super::position::Position;

/// Walk directions as `(drow, dcol)`. The order fixes the order of generated
/// moves, which keeps search results reproducible.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
];

/// Legal destinations for a player standing on `from`. A player without a
/// position yet may land on any free cell.
pub fn legal_moves(board: &Board, from: Option<Position>) -> Vec<Position> {
    let Some(origin) = from else {
        return board.all_free_cells();
    };

    let mut moves = Vec::new();
    for dir in DIRECTIONS {
        let mut current = origin;
        while let Some(next) = board.offset(current, dir) {
            if !board.is_free_unchecked(next) {
                break;
            }
            moves.push(next);
            current = next;
        }
    }
    moves
}

/// Same answer as `!legal_moves(board, from).is_empty()` without allocating.
pub fn has_legal_move(board: &Board, from: Option<Position>) -> bool {
    match from {
        None => board.free_count() > 0,
        Some(origin) => DIRECTIONS.iter().any(|&dir| {
            board
                .offset(origin, dir)
                .is_some_and(|next| board.is_free_unchecked(next))
        }),
    }
}

/// Number of legal destinations from `from`.
pub fn count_moves(board: &Board, from: Option<Position>) -> usize {
    let Some(origin) = from else {
        return board.free_count();
    };

    DIRECTIONS
        .iter()
        .map(|&dir| {
            let mut count = 0;
            let mut current = origin;
            while let Some(next) = board.offset(current, dir) {
                if !board.is_free_unchecked(next) {
                    break;
                }
                count += 1;
                current = next;
            }
            count
        })
        .sum()
}
