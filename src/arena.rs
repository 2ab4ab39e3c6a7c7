//! Head-to-head matches between agent profiles.
//!
//! Plays full games between two profiles, alternating who moves first,
//! and tallies wins and draws. Games can run concurrently on a rayon pool;
//! each game gets its own RNG derived from the match seed, so a seeded
//! match gives the same results at any thread count.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::board::{Board, Config, Piece};
use crate::eval::has_line;
use crate::protocol::diagram::encode_diagram;
use crate::search::{Profile, SearchError};

/// Errors that can abort a match.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("agent failed to move: {0}")]
    Search(#[from] SearchError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub agent1: Profile,
    pub agent2: Profile,
    /// Number of games. Agent 1 moves first in the first half.
    pub rounds: usize,
    /// Board geometry for every game.
    pub game: Config,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            agent1: Profile::Mid,
            agent2: Profile::Rules,
            rounds: 50,
            game: Config::standard(),
            seed: 0,
            threads: 4,
            quiet: false,
        }
    }
}

/// Result of one game from the match's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Agent1,
    Agent2,
    Draw,
}

/// A complete game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub agent1_first: bool,
    /// Columns played, in order.
    pub moves: Vec<usize>,
    /// Final position as a diagram.
    pub final_diagram: String,
    pub outcome: Outcome,
}

/// Aggregated match results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub agent1: Profile,
    pub agent2: Profile,
    pub rounds: usize,
    pub agent1_wins: usize,
    pub agent2_wins: usize,
    pub draws: usize,
}

impl MatchSummary {
    /// Tallies a set of game records.
    pub fn from_games(config: &MatchConfig, games: &[GameRecord]) -> Self {
        let count = |o: Outcome| games.iter().filter(|g| g.outcome == o).count();
        MatchSummary {
            agent1: config.agent1,
            agent2: config.agent2,
            rounds: games.len(),
            agent1_wins: count(Outcome::Agent1),
            agent2_wins: count(Outcome::Agent2),
            draws: count(Outcome::Draw),
        }
    }

    fn rate(&self, n: usize) -> f64 {
        n as f64 / self.rounds.max(1) as f64
    }

    pub fn agent1_win_rate(&self) -> f64 {
        self.rate(self.agent1_wins)
    }

    pub fn agent2_win_rate(&self) -> f64 {
        self.rate(self.agent2_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }
}

/// Plays one game. Returns the columns played, the final board and the
/// winning piece (`None` for a draw).
pub fn play_game(
    first: Profile,
    second: Profile,
    config: Config,
    rng: &mut impl Rng,
) -> Result<(Vec<usize>, Board, Option<Piece>), SearchError> {
    let agents = [(first.cascade(), Piece::One), (second.cascade(), Piece::Two)];
    let mut board = Board::empty(config);
    let mut moves = Vec::with_capacity(config.cell_count());

    for turn in 0.. {
        if board.is_full() {
            break;
        }
        let (cascade, piece) = &agents[turn % 2];
        let decision = cascade.choose_move(&board, *piece, rng)?;
        board = board.drop_piece(decision.column, *piece)?;
        moves.push(decision.column);
        if has_line(&board, *piece) {
            return Ok((moves, board, Some(*piece)));
        }
    }
    Ok((moves, board, None))
}

/// Plays game `index` of the match.
fn play_indexed(config: &MatchConfig, index: usize) -> Result<GameRecord, SearchError> {
    let mut rng = if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(index as u64))
    } else {
        SmallRng::from_entropy()
    };
    let agent1_first = index < config.rounds / 2;
    let (first, second) = if agent1_first {
        (config.agent1, config.agent2)
    } else {
        (config.agent2, config.agent1)
    };

    let (moves, board, winner) = play_game(first, second, config.game, &mut rng)?;
    let outcome = match (winner, agent1_first) {
        (None, _) => Outcome::Draw,
        (Some(Piece::One), true) | (Some(Piece::Two), false) => Outcome::Agent1,
        (Some(Piece::One), false) | (Some(Piece::Two), true) => Outcome::Agent2,
    };
    Ok(GameRecord {
        game_id: index,
        agent1_first,
        moves,
        final_diagram: encode_diagram(&board),
        outcome,
    })
}

/// Plays every game of the match, in game order.
pub fn run_games(config: &MatchConfig) -> Result<Vec<GameRecord>, ArenaError> {
    use rayon::prelude::*;

    let completed = AtomicUsize::new(0);
    let play = |i: usize| -> Result<GameRecord, SearchError> {
        let start = Instant::now();
        let game = play_indexed(config, i)?;
        if !config.quiet {
            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
            eprintln!(
                "Game {}/{}: {:?} in {} moves ({:.1}ms)",
                n,
                config.rounds,
                game.outcome,
                game.moves.len(),
                start.elapsed().as_secs_f64() * 1000.0,
            );
        }
        Ok(game)
    };

    if config.threads <= 1 {
        return Ok((0..config.rounds).map(play).collect::<Result<Vec<_>, _>>()?);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let games = pool.install(|| {
        (0..config.rounds)
            .into_par_iter()
            .map(play)
            .collect::<Result<Vec<_>, _>>()
    })?;
    Ok(games)
}

/// Plays a match and tallies the results.
pub fn run_match(config: &MatchConfig) -> Result<MatchSummary, ArenaError> {
    let games = run_games(config)?;
    Ok(MatchSummary::from_games(config, &games))
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints the match summary to stderr.
pub fn print_summary(summary: &MatchSummary) {
    eprintln!(
        "=== {} vs {} ({} games) ===",
        summary.agent1.name(),
        summary.agent2.name(),
        summary.rounds
    );
    eprintln!("Agent 1 Win Percentage: {:.2}", summary.agent1_win_rate());
    eprintln!("Agent 2 Win Percentage: {:.2}", summary.agent2_win_rate());
    eprintln!("Percentage of Draws: {:.2}", summary.draw_rate());
}
