//! ConnectX engine library.
//!
//! Exposes the board model, line and threat scanning, the rule cascade,
//! protocol parsing and the match arena for use by integration tests and
//! the binary entry points.

pub mod arena;
pub mod board;
pub mod engine;
pub mod eval;
pub mod protocol;
pub mod search;
