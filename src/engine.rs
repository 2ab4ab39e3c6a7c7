//! Engine state management.
//!
//! Holds the current board, the acting piece, engine options and the RNG
//! used by randomized fallbacks, and runs the decision cascade for the
//! `go` command.

use std::collections::HashMap;
use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Board, Piece};
use crate::protocol::diagram::parse_diagram;
use crate::protocol::observation::parse_observation;
use crate::search::{Decision, Profile, SearchError};

/// Default run length for `position` diagrams.
const DEFAULT_CONNECT_COUNT: usize = 4;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub position: Option<Board>,
    pub mark: Option<Piece>,
    pub options: HashMap<String, String>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates a new engine with no position or mark.
    pub fn new() -> Self {
        Engine {
            position: None,
            mark: None,
            options: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Resets the position and mark for a new game.
    pub fn new_game(&mut self) {
        self.position = None;
        self.mark = None;
    }

    /// Sets the board from a diagram. Returns an error message on failure.
    pub fn set_position(&mut self, diagram: &str, connect_count: Option<usize>) -> Result<(), String> {
        let k = connect_count.unwrap_or_else(|| self.connect_count());
        match parse_diagram(diagram, k) {
            Ok(board) => {
                self.position = Some(board);
                Ok(())
            }
            Err(e) => Err(format!("failed to parse diagram: {}", e)),
        }
    }

    /// Sets board, mark and geometry from observation JSON.
    pub fn observe(&mut self, json: &str) -> Result<(), String> {
        match parse_observation(json) {
            Ok(obs) => {
                self.position = Some(obs.board);
                self.mark = Some(obs.mark);
                Ok(())
            }
            Err(e) => Err(format!("failed to parse observation: {}", e)),
        }
    }

    pub fn set_mark(&mut self, piece: Piece) {
        self.mark = Some(piece);
    }

    /// Sets an engine option. Setting `Seed` reseeds the RNG immediately.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        if name == "Profile" {
            let v = value.as_deref().unwrap_or("");
            if Profile::from_name(v).is_none() {
                eprintln!("unknown profile '{}', using {}", v, Profile::default().name());
            }
        }
        if name == "Seed" {
            let seed = value.as_deref().and_then(|v| v.parse::<u64>().ok());
            self.rng = match seed {
                Some(s) if s != 0 => SmallRng::seed_from_u64(s),
                _ => SmallRng::from_entropy(),
            };
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Returns the configured profile, or the default if unset or unknown.
    pub fn profile(&self) -> Profile {
        self.options
            .get("Profile")
            .and_then(|v| Profile::from_name(v))
            .unwrap_or_default()
    }

    /// Returns the configured run length for diagrams.
    fn connect_count(&self) -> usize {
        self.options
            .get("InARow")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&k| k > 0)
            .unwrap_or(DEFAULT_CONNECT_COUNT)
    }

    /// Handles the CXI handshake: writes id, options, protocol_version, and cxiok.
    pub fn handle_cxi<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name connectx")?;
        writeln!(out, "id author connectx")?;
        writeln!(
            out,
            "option name Profile type combo default {} var basic var rules var first var mid var mid-edge var better-mid var random",
            Profile::default().name()
        )?;
        writeln!(out, "option name Seed type spin default 0 min 0 max 18446744073709551615")?;
        writeln!(
            out,
            "option name InARow type spin default {} min 1 max 64",
            DEFAULT_CONNECT_COUNT
        )?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "cxiok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Runs the configured cascade on the current position.
    pub fn decide(&mut self) -> Result<Decision, String> {
        let board = self.position.as_ref().ok_or("no position set")?;
        let mark = self.mark.ok_or("no mark set")?;
        let cascade = self.profile().cascade();
        cascade
            .choose_move(board, mark, &mut self.rng)
            .map_err(|e: SearchError| e.to_string())
    }

    /// Handles the `go` command: an `info` line, then `bestmove`.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let decision = match self.decide() {
            Ok(d) => d,
            Err(e) => {
                eprintln!("go: {}", e);
                return Ok(());
            }
        };
        writeln!(
            out,
            "info tier {} candidates {} profile {}",
            decision.tier.name(),
            decision.candidates,
            self.profile().name()
        )?;
        writeln!(out, "bestmove {}", decision.column)?;
        out.flush()
    }
}
