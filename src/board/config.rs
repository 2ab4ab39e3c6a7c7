//! Board geometry and win length.

use serde::Serialize;

/// Errors raised when building a `Config`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got 0")]
    Zero { field: &'static str },

    #[error("{field} must be positive, got {value}")]
    Negative { field: &'static str, value: i64 },

    #[error("a {rows}x{columns} board is too large")]
    TooLarge { rows: usize, columns: usize },
}

/// Rows, columns and the run length needed to win.
///
/// Fields must be positive and the cell count must fit in memory. A
/// `connect_count` larger than a board dimension is allowed; no window
/// exists along that dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Config {
    rows: usize,
    columns: usize,
    connect_count: usize,
}

impl Config {
    /// Builds a config, rejecting zero in any field and boards whose cell
    /// count overflows.
    pub fn new(rows: usize, columns: usize, connect_count: usize) -> Result<Config, ConfigError> {
        if rows == 0 {
            return Err(ConfigError::Zero { field: "rows" });
        }
        if columns == 0 {
            return Err(ConfigError::Zero { field: "columns" });
        }
        if connect_count == 0 {
            return Err(ConfigError::Zero { field: "connect_count" });
        }
        match rows.checked_mul(columns) {
            Some(cells) if cells <= isize::MAX as usize => {}
            _ => return Err(ConfigError::TooLarge { rows, columns }),
        }
        Ok(Config {
            rows,
            columns,
            connect_count,
        })
    }

    /// Builds a config from signed wire values.
    pub fn from_signed(rows: i64, columns: i64, connect_count: i64) -> Result<Config, ConfigError> {
        let check = |field: &'static str, value: i64| -> Result<usize, ConfigError> {
            usize::try_from(value).map_err(|_| ConfigError::Negative { field, value })
        };
        Config::new(
            check("rows", rows)?,
            check("columns", columns)?,
            check("connect_count", connect_count)?,
        )
    }

    /// The classic 6x7 board with four in a row.
    pub const fn standard() -> Config {
        Config {
            rows: 6,
            columns: 7,
            connect_count: 4,
        }
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn columns(&self) -> usize {
        self.columns
    }

    pub const fn connect_count(&self) -> usize {
        self.connect_count
    }

    /// Number of cells on the board.
    pub const fn cell_count(&self) -> usize {
        self.rows * self.columns
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::standard()
    }
}
