//! The decision cascade.
//!
//! Checks a fixed sequence of tiers and plays the first column any tier
//! produces: win now, block now, then (among moves that do not hand the
//! opponent an immediate win) own fork, own stacked threat, deny the
//! opponent's fork, deny the opponent's stacked threat, and finally a
//! fallback pick governed by a `Selection` policy.
//!
//! When every valid move hands the opponent a win, tiers 4-7 have nothing
//! to scan and the fallback picks among all valid moves. A
//! `FirstWhenNarrow` policy takes the middle move in that case.
//!
//! Every tier scans columns in ascending order, so all tiers except the
//! fallback are deterministic. The fallback is deterministic too unless the
//! selection is `Random`, in which case it draws from the caller's RNG.

use rand::Rng;

use crate::board::{Board, BoardError, Piece};
use crate::eval::{can_force_win, count_winning_moves, creates_fork, creates_stacked_threat, creates_win};

use super::selection::Selection;

/// Errors returned by `Cascade::choose_move`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The board is full. Callers must not ask for a move in this state.
    #[error("no valid moves: the board is full")]
    NoValidMoves,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// The tier that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    WinNow,
    BlockNow,
    SelfFork,
    SelfStacked,
    DenyFork,
    DenyStacked,
    Fallback,
}

impl Tier {
    /// Short name used in `info` output.
    pub const fn name(self) -> &'static str {
        match self {
            Tier::WinNow => "win-now",
            Tier::BlockNow => "block-now",
            Tier::SelfFork => "self-fork",
            Tier::SelfStacked => "self-stacked",
            Tier::DenyFork => "deny-fork",
            Tier::DenyStacked => "deny-stacked",
            Tier::Fallback => "fallback",
        }
    }
}

/// A chosen column and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub column: usize,
    pub tier: Tier,
    /// Size of the move set the tier scanned or picked from.
    pub candidates: usize,
}

/// Which tiers run before the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeDepth {
    /// No heuristics: the fallback picks among all valid moves.
    FallbackOnly,
    /// Win-now and block-now only.
    Tactical,
    /// Every tier.
    Full,
}

/// Knobs distinguishing one cascade variant from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeOptions {
    pub depth: CascadeDepth,
    pub selection: Selection,
    /// Drop fallback candidates after which the opponent can force a win.
    /// Ignored if it would leave nothing.
    pub forcing_filter: bool,
}

impl Default for CascadeOptions {
    fn default() -> Self {
        CascadeOptions {
            depth: CascadeDepth::Full,
            selection: Selection::Middle,
            forcing_filter: false,
        }
    }
}

/// A configured decision cascade. Holds no state between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cascade {
    options: CascadeOptions,
}

/// Returns the first column in `columns` satisfying `pred`.
fn first_matching(columns: &[usize], mut pred: impl FnMut(usize) -> bool) -> Option<usize> {
    columns.iter().copied().find(|&col| pred(col))
}

/// Returns the valid moves that do not leave the opponent an immediate
/// win. Empty when every move loses.
fn safe_moves(board: &Board, valid: &[usize], me: Piece) -> Result<Vec<usize>, BoardError> {
    let mut safe = Vec::with_capacity(valid.len());
    for &col in valid {
        let after = board.drop_piece(col, me)?;
        if count_winning_moves(&after, me.other()) == 0 {
            safe.push(col);
        }
    }
    Ok(safe)
}

/// Returns the valid moves that do not leave `opponent` an immediate win.
///
/// If every valid move loses, all valid moves are returned instead, so the
/// result is only empty when the board is full.
pub fn good_moves(board: &Board, me: Piece) -> Result<Vec<usize>, BoardError> {
    let valid = board.valid_moves();
    let safe = safe_moves(board, &valid, me)?;
    if safe.is_empty() {
        return Ok(valid);
    }
    Ok(safe)
}

impl Cascade {
    pub fn new(options: CascadeOptions) -> Self {
        Cascade { options }
    }

    pub fn options(&self) -> CascadeOptions {
        self.options
    }

    /// Picks a column for `me` to play.
    ///
    /// The board must have at least one valid move; a full board yields
    /// `SearchError::NoValidMoves`.
    pub fn choose_move(
        &self,
        board: &Board,
        me: Piece,
        rng: &mut impl Rng,
    ) -> Result<Decision, SearchError> {
        let valid = board.valid_moves();
        if valid.is_empty() {
            return Err(SearchError::NoValidMoves);
        }
        let opponent = me.other();

        if self.options.depth == CascadeDepth::FallbackOnly {
            return pick(self.options.selection, &valid, rng);
        }

        for &col in &valid {
            if creates_win(board, col, me)? {
                return Ok(decision(col, Tier::WinNow, valid.len()));
            }
        }
        for &col in &valid {
            if creates_win(board, col, opponent)? {
                return Ok(decision(col, Tier::BlockNow, valid.len()));
            }
        }

        if self.options.depth == CascadeDepth::Tactical {
            return pick(self.options.selection, &valid, rng);
        }

        let good = safe_moves(board, &valid, me)?;
        if good.is_empty() {
            return pick(self.options.selection.unfiltered(), &valid, rng);
        }
        let tiers: [(Tier, Piece, fn(&Board, usize, Piece) -> bool); 4] = [
            (Tier::SelfFork, me, creates_fork),
            (Tier::SelfStacked, me, creates_stacked_threat),
            (Tier::DenyFork, opponent, creates_fork),
            (Tier::DenyStacked, opponent, creates_stacked_threat),
        ];
        for (tier, piece, check) in tiers {
            if let Some(col) = first_matching(&good, |col| check(board, col, piece)) {
                return Ok(decision(col, tier, good.len()));
            }
        }

        if self.options.forcing_filter {
            let mut safer = Vec::with_capacity(good.len());
            for &col in &good {
                let after = board.drop_piece(col, me)?;
                if !can_force_win(&after, opponent) {
                    safer.push(col);
                }
            }
            if !safer.is_empty() {
                return pick(self.options.selection, &safer, rng);
            }
        }
        pick(self.options.selection, &good, rng)
    }
}

/// Runs the fallback tier over `candidates`.
fn pick(selection: Selection, candidates: &[usize], rng: &mut impl Rng) -> Result<Decision, SearchError> {
    selection
        .pick(candidates, rng)
        .map(|col| decision(col, Tier::Fallback, candidates.len()))
        .ok_or(SearchError::NoValidMoves)
}

fn decision(column: usize, tier: Tier, candidates: usize) -> Decision {
    Decision {
        column,
        tier,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Config;
    use crate::protocol::diagram::parse_diagram;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn board(diagram: &str) -> Board {
        parse_diagram(diagram, 4).unwrap()
    }

    fn full(selection: Selection) -> Cascade {
        Cascade::new(CascadeOptions {
            depth: CascadeDepth::Full,
            selection,
            forcing_filter: false,
        })
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn wins_when_a_line_can_be_completed() {
        let b = board("......./......./......./......./ooo..../xxx....");
        let d = full(Selection::Middle).choose_move(&b, Piece::One, &mut rng()).unwrap();
        assert_eq!((d.column, d.tier), (3, Tier::WinNow));
    }

    #[test]
    fn win_beats_block() {
        // x can finish row 5 at column 3; o can finish column 6.
        let b = board("......./......./......./......o/......o/xxx...o");
        let d = full(Selection::Middle).choose_move(&b, Piece::One, &mut rng()).unwrap();
        assert_eq!((d.column, d.tier), (3, Tier::WinNow));
        let d = full(Selection::Middle).choose_move(&b, Piece::Two, &mut rng()).unwrap();
        assert_eq!((d.column, d.tier), (6, Tier::WinNow));
    }

    #[test]
    fn blocks_only_when_no_win_exists() {
        // o's row 4 is not yet playable, so o must stop x's row 5.
        let b = board("......./......./......./......./ooo..../xxx....");
        let d = full(Selection::First).choose_move(&b, Piece::Two, &mut rng()).unwrap();
        assert_eq!((d.column, d.tier), (3, Tier::BlockNow));
    }

    #[test]
    fn blocks_opponent_three() {
        let b = board("......./......./......./......./x....../xooo.x.");
        let d = full(Selection::First).choose_move(&b, Piece::One, &mut rng()).unwrap();
        assert_eq!((d.column, d.tier), (4, Tier::BlockNow));
    }

    #[test]
    fn tactical_depth_blocks_then_takes_first() {
        let cascade = Cascade::new(CascadeOptions {
            depth: CascadeDepth::Tactical,
            selection: Selection::First,
            forcing_filter: false,
        });
        let b = board("......./......./......./......./x....../xooo.x.");
        assert_eq!(cascade.choose_move(&b, Piece::One, &mut rng()).unwrap().column, 4);
        let b = board("......./......./......./......./..oo.../..xx...");
        let d = cascade.choose_move(&b, Piece::One, &mut rng()).unwrap();
        assert_eq!((d.column, d.tier), (0, Tier::Fallback));
    }

    #[test]
    fn good_moves_drop_columns_that_lose() {
        // x threatens row 4 at column 4; o playing there lets x complete it.
        let b = board("......./......./......./......./oxxx.../xoox.o.");
        assert_eq!(good_moves(&b, Piece::Two).unwrap(), vec![0, 1, 2, 3, 5, 6]);
        let d = full(Selection::Middle).choose_move(&b, Piece::Two, &mut rng()).unwrap();
        assert_ne!(d.column, 4);
        assert_eq!((d.column, d.tier), (3, Tier::DenyStacked));
    }

    #[test]
    fn good_moves_keep_everything_when_all_lose() {
        // 2x2, connect 2: whatever o plays, x completes a line above or beside it.
        let config = Config::new(2, 2, 2).unwrap();
        let b = Board::empty(config).drop_piece(0, Piece::One).unwrap();
        assert_eq!(good_moves(&b, Piece::Two).unwrap(), vec![0, 1]);
    }

    #[test]
    fn every_move_losing_skips_to_the_middle_valid_move() {
        // 3x5, connect 3: each of x's moves lets o win in the cell above it.
        let b = parse_diagram(".x..o/.o..x/oxo.x", 3).unwrap();
        assert_eq!(b.valid_moves(), vec![0, 2, 3]);
        assert_eq!(good_moves(&b, Piece::One).unwrap(), vec![0, 2, 3]);

        let edge = full(Selection::FirstWhenNarrow(5))
            .choose_move(&b, Piece::One, &mut rng())
            .unwrap();
        assert_eq!((edge.column, edge.tier, edge.candidates), (2, Tier::Fallback, 3));
        let mid = full(Selection::Middle).choose_move(&b, Piece::One, &mut rng()).unwrap();
        assert_eq!(mid.column, 2);
        let first = full(Selection::First).choose_move(&b, Piece::One, &mut rng()).unwrap();
        assert_eq!((first.column, first.tier), (0, Tier::Fallback));
    }

    #[test]
    fn narrow_safe_set_still_takes_the_first_move() {
        let b = Board::empty(Config::new(6, 4, 4).unwrap());
        let d = full(Selection::FirstWhenNarrow(5))
            .choose_move(&b, Piece::One, &mut rng())
            .unwrap();
        assert_eq!((d.column, d.tier, d.candidates), (0, Tier::Fallback, 4));
    }

    #[test]
    fn plays_own_fork() {
        let b = board("......./......./......./......./..oo.../..xx...");
        let d = full(Selection::Middle).choose_move(&b, Piece::One, &mut rng()).unwrap();
        assert_eq!((d.column, d.tier), (1, Tier::SelfFork));
    }

    #[test]
    fn plays_own_stacked_threat() {
        let b = board("......./......./......./xxx..../xoo...o/oxxo..o");
        let d = full(Selection::Middle).choose_move(&b, Piece::One, &mut rng()).unwrap();
        assert_eq!((d.column, d.tier), (0, Tier::SelfStacked));
    }

    #[test]
    fn denies_opponent_fork() {
        let b = board("......./......./......./......./..xx.../..oo...");
        let d = full(Selection::Middle).choose_move(&b, Piece::One, &mut rng()).unwrap();
        assert_eq!((d.column, d.tier), (1, Tier::DenyFork));
    }

    #[test]
    fn empty_board_uses_selection() {
        let b = Board::empty(Config::standard());
        let mid = full(Selection::Middle).choose_move(&b, Piece::One, &mut rng()).unwrap();
        assert_eq!((mid.column, mid.tier, mid.candidates), (3, Tier::Fallback, 7));
        let first = full(Selection::First).choose_move(&b, Piece::One, &mut rng()).unwrap();
        assert_eq!(first.column, 0);
        let edge = full(Selection::FirstWhenNarrow(5))
            .choose_move(&b, Piece::One, &mut rng())
            .unwrap();
        assert_eq!(edge.column, 3);
    }

    #[test]
    fn forcing_filter_changes_fallback() {
        let b = board("......./......./......./..oo.../..xx.../x.xoox.");
        let plain = full(Selection::Middle).choose_move(&b, Piece::Two, &mut rng()).unwrap();
        assert_eq!((plain.column, plain.tier), (3, Tier::Fallback));
        let filtered = Cascade::new(CascadeOptions {
            forcing_filter: true,
            ..CascadeOptions::default()
        })
        .choose_move(&b, Piece::Two, &mut rng())
        .unwrap();
        assert_eq!((filtered.column, filtered.tier, filtered.candidates), (4, Tier::Fallback, 6));
    }

    #[test]
    fn fallback_only_ignores_wins() {
        let cascade = Cascade::new(CascadeOptions {
            depth: CascadeDepth::FallbackOnly,
            selection: Selection::First,
            forcing_filter: false,
        });
        let b = board("......./......./......./......./ooo..../xxx....");
        let d = cascade.choose_move(&b, Piece::One, &mut rng()).unwrap();
        assert_eq!((d.column, d.tier), (0, Tier::Fallback));
    }

    #[test]
    fn full_board_is_an_error() {
        let config = Config::new(1, 2, 2).unwrap();
        let b = Board::empty(config)
            .drop_piece(0, Piece::One)
            .unwrap()
            .drop_piece(1, Piece::Two)
            .unwrap();
        assert_eq!(
            Cascade::default().choose_move(&b, Piece::One, &mut rng()),
            Err(SearchError::NoValidMoves)
        );
    }

    #[test]
    fn deterministic_selection_is_idempotent() {
        let b = board("......./......./......./......./.x.x.../.oxox.o");
        let cascade = full(Selection::Middle);
        let a = cascade.choose_move(&b, Piece::Two, &mut SmallRng::seed_from_u64(1)).unwrap();
        let c = cascade.choose_move(&b, Piece::Two, &mut SmallRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn random_selection_is_reproducible_and_valid() {
        let b = Board::empty(Config::standard());
        let cascade = full(Selection::Random);
        let run = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..10)
                .map(|_| cascade.choose_move(&b, Piece::One, &mut rng).unwrap().column)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(5), run(5));
        assert!(run(5).iter().all(|&c| c < 7));
    }
}
