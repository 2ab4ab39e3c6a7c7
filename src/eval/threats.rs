//! Threat counting and two-ply forcing patterns.
//!
//! All functions here enumerate their own columns and only simulate drops
//! into columns that still have room, so none of them can fail.

use crate::board::{Board, Piece};

use super::lines::{creates_win, has_line};

/// Columns in which dropping `piece` wins immediately, ascending.
pub fn winning_moves(board: &Board, piece: Piece) -> Vec<usize> {
    board
        .valid_moves()
        .into_iter()
        .filter(|&col| matches!(creates_win(board, col, piece), Ok(true)))
        .collect()
}

/// Number of columns in which dropping `piece` wins immediately.
pub fn count_winning_moves(board: &Board, piece: Piece) -> usize {
    board
        .valid_moves()
        .into_iter()
        .filter(|&col| matches!(creates_win(board, col, piece), Ok(true)))
        .count()
}

/// Returns true if dropping `piece` into `column` leaves `piece` with at
/// least two immediate wins on the next turn.
pub fn creates_fork(board: &Board, column: usize, piece: Piece) -> bool {
    match board.drop_piece(column, piece) {
        Ok(next) => count_winning_moves(&next, piece) >= 2,
        Err(_) => false,
    }
}

/// Returns true if dropping `piece` into `column` sets up a win in that
/// same column that survives a second stacked drop.
///
/// After the first drop, another `piece` in `column` must win. Stacking a
/// second `piece` there must then still leave a win on a third drop, or a
/// completed line when the column has no room left. The opponent's
/// replies elsewhere between the drops are not considered.
pub fn creates_stacked_threat(board: &Board, column: usize, piece: Piece) -> bool {
    let Ok(first) = board.drop_piece(column, piece) else {
        return false;
    };
    if first.is_column_full(column) || !matches!(creates_win(&first, column, piece), Ok(true)) {
        return false;
    }
    let Ok(second) = first.drop_piece(column, piece) else {
        return false;
    };
    if second.is_column_full(column) {
        return has_line(&second, piece);
    }
    matches!(creates_win(&second, column, piece), Ok(true))
}

/// Returns true if some single drop gives `piece` a fork or a stacked
/// threat.
pub fn can_force_win(board: &Board, piece: Piece) -> bool {
    let moves = board.valid_moves();
    moves.iter().any(|&col| creates_fork(board, col, piece))
        || moves
            .iter()
            .any(|&col| creates_stacked_threat(board, col, piece))
}
