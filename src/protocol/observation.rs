//! Harness observation adapter.
//!
//! The game harness describes a position as a flat, row-major list of
//! cell marks (top row first; 0 empty, 1 player one, 2 player two), the
//! acting player's mark, and the board geometry. This module turns that
//! JSON into a `Board` and a `Piece`, and back.

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError, Config, ConfigError, Piece};

/// Errors that can occur while decoding an observation.
#[derive(Debug, thiserror::Error)]
pub enum ObservationError {
    #[error("malformed observation JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid mark {0}, expected 1 or 2")]
    InvalidMark(u8),

    #[error("invalid cell value {value} at index {index}")]
    InvalidCell { index: usize, value: u8 },

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
}

/// Board geometry as sent by the harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigInput {
    pub rows: i64,
    pub columns: i64,
    #[serde(alias = "connect_count")]
    pub inarow: i64,
}

impl From<Config> for ConfigInput {
    fn from(config: Config) -> Self {
        ConfigInput {
            rows: config.rows() as i64,
            columns: config.columns() as i64,
            inarow: config.connect_count() as i64,
        }
    }
}

/// An observation exactly as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationInput {
    pub board: Vec<u8>,
    pub mark: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigInput>,
}

/// A decoded observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub board: Board,
    pub mark: Piece,
}

/// Builds a board from flat harness cells.
pub fn board_from_flat(config: Config, cells: &[u8]) -> Result<Board, ObservationError> {
    let cells = cells
        .iter()
        .enumerate()
        .map(|(index, &value)| match value {
            0 => Ok(None),
            v => Piece::from_mark(v)
                .map(Some)
                .ok_or(ObservationError::InvalidCell { index, value }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Board::from_cells(config, cells)?)
}

impl ObservationInput {
    /// Validates the wire form. A missing config means the standard board.
    pub fn decode(&self) -> Result<Observation, ObservationError> {
        let config = match &self.config {
            Some(c) => Config::from_signed(c.rows, c.columns, c.inarow)?,
            None => Config::standard(),
        };
        let mark = Piece::from_mark(self.mark).ok_or(ObservationError::InvalidMark(self.mark))?;
        let board = board_from_flat(config, &self.board)?;
        Ok(Observation { board, mark })
    }

    /// Builds the wire form of a position.
    pub fn encode(board: &Board, mark: Piece) -> Self {
        ObservationInput {
            board: board
                .cells()
                .iter()
                .map(|c| c.map_or(0, Piece::mark))
                .collect(),
            mark: mark.mark(),
            config: Some(board.config().into()),
        }
    }
}

/// Parses and validates an observation from JSON.
pub fn parse_observation(json: &str) -> Result<Observation, ObservationError> {
    let input: ObservationInput = serde_json::from_str(json)?;
    input.decode()
}

/// Serializes a position as observation JSON.
pub fn encode_observation(board: &Board, mark: Piece) -> Result<String, ObservationError> {
    Ok(serde_json::to_string(&ObservationInput::encode(board, mark))?)
}
