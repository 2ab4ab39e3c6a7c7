//! Board diagram encoding and decoding.
//!
//! A diagram lists the rows from top to bottom, separated by `/` (newlines
//! are accepted too). Each row has one character per column: `.` for an
//! empty cell, `x` for player one and `o` for player two.
//!
//! Example, the classic board after two moves:
//! `......./......./......./......./...o.../...x...`

use crate::board::{Board, BoardError, Config, ConfigError, Piece};

/// Errors that can occur during diagram parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagramError {
    #[error("empty diagram")]
    Empty,

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, got: usize },

    #[error("invalid cell character '{0}'")]
    InvalidCell(char),

    #[error("invalid geometry: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid position: {0}")]
    Board(#[from] BoardError),
}

/// Parses a cell character: `.` is empty, otherwise a piece.
fn parse_cell(c: char) -> Result<Option<Piece>, DiagramError> {
    if c == '.' {
        return Ok(None);
    }
    Piece::from_diagram_char(c)
        .map(Some)
        .ok_or(DiagramError::InvalidCell(c))
}

/// Parses a diagram into a board with the given run length.
///
/// Rows and columns are taken from the diagram itself.
pub fn parse_diagram(s: &str, connect_count: usize) -> Result<Board, DiagramError> {
    let rows: Vec<&str> = s
        .split(['/', '\n'])
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .collect();
    let Some(first) = rows.first() else {
        return Err(DiagramError::Empty);
    };
    let columns = first.chars().count();

    let mut cells = Vec::with_capacity(rows.len() * columns);
    for (i, row) in rows.iter().enumerate() {
        let got = row.chars().count();
        if got != columns {
            return Err(DiagramError::RaggedRow {
                row: i,
                expected: columns,
                got,
            });
        }
        for c in row.chars() {
            cells.push(parse_cell(c)?);
        }
    }

    let config = Config::new(rows.len(), columns, connect_count)?;
    Ok(Board::from_cells(config, cells)?)
}

/// Encodes a board as a `/`-separated diagram.
pub fn encode_diagram(board: &Board) -> String {
    let mut out = String::with_capacity(board.rows() * (board.columns() + 1));
    for row in 0..board.rows() {
        if row > 0 {
            out.push('/');
        }
        for col in 0..board.columns() {
            out.push(board.get(row, col).map_or('.', Piece::diagram_char));
        }
    }
    out
}
