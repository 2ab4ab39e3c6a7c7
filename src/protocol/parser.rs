//! CXI command parser.
//!
//! Parses incoming engine-protocol lines into structured `Command`
//! variants that the engine main loop can dispatch on.

use crate::board::Piece;

/// A parsed harness-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the protocol handshake.
    Cxi,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset engine state for a new game.
    NewGame,

    /// Set the board from a diagram, with an optional run length.
    Position {
        diagram: String,
        connect_count: Option<usize>,
    },

    /// Set the board, mark and geometry from observation JSON.
    Observe { json: String },

    /// Set the acting piece.
    SetMark { piece: Piece },

    /// Choose a column for the current position.
    Go,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "cxi" => Some(Command::Cxi),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "go" => Some(Command::Go),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "observe" => parse_observe(trimmed),
        "setmark" => parse_setmark(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`. Option ids are single words;
/// the value may contain spaces.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    match tokens {
        [_, "name", name] => Some(Command::SetOption {
            name: name.to_string(),
            value: None,
        }),
        [_, "name", name, "value", value @ ..] => Some(Command::SetOption {
            name: name.to_string(),
            value: (!value.is_empty()).then(|| value.join(" ")),
        }),
        _ => {
            eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
            None
        }
    }
}

/// Parses `position <diagram> [inarow <k>]`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed position: expected 'position <diagram> [inarow <k>]'");
        return None;
    }
    let diagram = tokens[1].to_string();
    let connect_count = match tokens.get(2..) {
        Some(["inarow", k]) => match k.parse::<usize>() {
            Ok(v) => Some(v),
            Err(_) => {
                eprintln!("invalid inarow value: '{}'", k);
                return None;
            }
        },
        Some([]) | None => None,
        Some(rest) => {
            eprintln!("unexpected position arguments: '{}'", rest.join(" "));
            return None;
        }
    };
    Some(Command::Position {
        diagram,
        connect_count,
    })
}

/// Parses `observe <json>`; everything after the keyword is the payload.
fn parse_observe(full_line: &str) -> Option<Command> {
    let json = full_line
        .strip_prefix("observe")
        .unwrap_or("")
        .trim();
    if json.is_empty() {
        eprintln!("malformed observe: expected 'observe <json>'");
        return None;
    }
    Some(Command::Observe {
        json: json.to_string(),
    })
}

/// Parses `setmark <1|2>`.
fn parse_setmark(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed setmark: expected 'setmark <1|2>'");
        return None;
    }
    match tokens[1].parse::<u8>().ok().and_then(Piece::from_mark) {
        Some(piece) => Some(Command::SetMark { piece }),
        None => {
            eprintln!("invalid mark: '{}'", tokens[1]);
            None
        }
    }
}
