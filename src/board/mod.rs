//! Board representation and game geometry.
//!
//! Contains the piece identities, the validated board configuration and
//! the gravity-respecting grid that every evaluation works on.

pub mod config;
pub mod piece;
pub mod state;

pub use config::{Config, ConfigError};
pub use piece::{Piece, ALL_PIECES};
pub use state::{simulate_drop, Board, BoardError};
