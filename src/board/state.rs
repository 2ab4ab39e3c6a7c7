//! Board representation.
//!
//! A `Board` is a row-major grid of `Option<Piece>` with row 0 at the top,
//! matching the harness layout. Pieces only ever enter through
//! `drop_piece`, which lands them on the lowest empty cell of a column, so
//! every column is filled bottom-up.

use super::config::Config;
use super::piece::Piece;

/// Errors raised by board construction and move simulation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {column} out of range for a board with {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("expected {expected} cells, got {got}")]
    CellCount { expected: usize, got: usize },

    #[error("piece at row {row}, column {column} has an empty cell below it")]
    Floating { row: usize, column: usize },
}

/// A fixed-size grid of cells plus the game geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    config: Config,
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// Creates an empty board.
    pub fn empty(config: Config) -> Self {
        Board {
            config,
            cells: vec![None; config.cell_count()],
        }
    }

    /// Builds a board from row-major cells (top row first).
    ///
    /// Rejects a wrong cell count and any piece resting on an empty cell.
    pub fn from_cells(config: Config, cells: Vec<Option<Piece>>) -> Result<Self, BoardError> {
        if cells.len() != config.cell_count() {
            return Err(BoardError::CellCount {
                expected: config.cell_count(),
                got: cells.len(),
            });
        }
        let board = Board { config, cells };
        for column in 0..config.columns() {
            for row in 0..config.rows() - 1 {
                if board.get(row, column).is_some() && board.get(row + 1, column).is_none() {
                    return Err(BoardError::Floating { row, column });
                }
            }
        }
        Ok(board)
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows()
    }

    pub fn columns(&self) -> usize {
        self.config.columns()
    }

    pub fn connect_count(&self) -> usize {
        self.config.connect_count()
    }

    /// Returns the cell at (row, column). Panics if out of bounds.
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<Piece> {
        assert!(
            row < self.rows() && column < self.columns(),
            "cell ({}, {}) outside {}x{} board",
            row,
            column,
            self.rows(),
            self.columns()
        );
        self.cells[row * self.columns() + column]
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Option<Piece>] {
        &self.cells
    }

    /// A column is full when its top cell is occupied.
    #[inline]
    pub fn is_column_full(&self, column: usize) -> bool {
        self.get(0, column).is_some()
    }

    /// Columns that can still take a piece, in ascending order.
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..self.columns())
            .filter(|&c| !self.is_column_full(c))
            .collect()
    }

    /// Returns true if no column can take a piece.
    pub fn is_full(&self) -> bool {
        (0..self.columns()).all(|c| self.is_column_full(c))
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Returns the row a piece dropped in `column` would land on.
    pub fn landing_row(&self, column: usize) -> Result<usize, BoardError> {
        if column >= self.columns() {
            return Err(BoardError::ColumnOutOfRange {
                column,
                columns: self.columns(),
            });
        }
        (0..self.rows())
            .rev()
            .find(|&row| self.get(row, column).is_none())
            .ok_or(BoardError::ColumnFull(column))
    }

    /// Returns a copy of the board with `piece` dropped into `column`.
    ///
    /// `self` is left unchanged.
    pub fn drop_piece(&self, column: usize, piece: Piece) -> Result<Board, BoardError> {
        let row = self.landing_row(column)?;
        let mut next = self.clone();
        let idx = row * next.columns() + column;
        next.cells[idx] = Some(piece);
        Ok(next)
    }

    /// Returns the board flipped left to right.
    pub fn mirrored(&self) -> Board {
        let columns = self.columns();
        let cells = (0..self.rows())
            .flat_map(|row| (0..columns).rev().map(move |col| (row, col)))
            .map(|(row, col)| self.get(row, col))
            .collect();
        Board {
            config: self.config,
            cells,
        }
    }
}

/// Free-function form of `Board::drop_piece`.
pub fn simulate_drop(board: &Board, column: usize, piece: Piece) -> Result<Board, BoardError> {
    board.drop_piece(column, piece)
}
