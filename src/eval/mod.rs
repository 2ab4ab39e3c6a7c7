//! Move evaluation primitives.
//!
//! Line detection after a simulated drop, immediate-win counting, and the
//! two-ply fork and stacked-threat patterns the decision cascade is built on.

pub mod lines;
pub mod threats;

pub use lines::{creates_win, has_line};
pub use threats::{
    can_force_win, count_winning_moves, creates_fork, creates_stacked_threat, winning_moves,
};
