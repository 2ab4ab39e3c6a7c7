//! Line scanning.
//!
//! Checks the whole board for a run of `connect_count` equal pieces along
//! rows, columns and both diagonals. Every window is examined, not only
//! those touching the last drop, so the answer depends on the board alone.

use crate::board::{Board, BoardError, Piece};

/// Scan directions as (row step, column step): right, down, down-right, up-right.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Moves `steps` cells from `start` in direction `delta`, staying within
/// `0..limit`.
#[inline]
fn offset(start: usize, delta: isize, steps: usize, limit: usize) -> Option<usize> {
    let pos = match delta {
        0 => Some(start),
        d if d > 0 => start.checked_add(steps),
        _ => start.checked_sub(steps),
    }?;
    (pos < limit).then_some(pos)
}

/// Returns true if the window starting at (row, col) and stepping by
/// (dr, dc) fits on the board and holds `piece` in every cell.
#[inline]
fn window_is_line(board: &Board, row: usize, col: usize, (dr, dc): (isize, isize), piece: Piece) -> bool {
    let span = board.connect_count() - 1;
    if offset(row, dr, span, board.rows()).is_none() || offset(col, dc, span, board.columns()).is_none() {
        return false;
    }
    (0..=span).all(|i| {
        match (offset(row, dr, i, board.rows()), offset(col, dc, i, board.columns())) {
            (Some(r), Some(c)) => board.get(r, c) == Some(piece),
            _ => false,
        }
    })
}

/// Returns true if `piece` has a complete line anywhere on the board.
pub fn has_line(board: &Board, piece: Piece) -> bool {
    let k = board.connect_count();
    if k > board.rows() && k > board.columns() {
        return false;
    }
    for row in 0..board.rows() {
        for col in 0..board.columns() {
            if board.get(row, col) != Some(piece) {
                continue;
            }
            if DIRECTIONS
                .iter()
                .any(|&dir| window_is_line(board, row, col, dir, piece))
            {
                return true;
            }
        }
    }
    false
}

/// Returns true if dropping `piece` into `column` leaves a board on which
/// `piece` has a line.
pub fn creates_win(board: &Board, column: usize, piece: Piece) -> Result<bool, BoardError> {
    let next = board.drop_piece(column, piece)?;
    Ok(has_line(&next, piece))
}
