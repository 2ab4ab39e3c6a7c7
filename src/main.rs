//! connectx -- a rule-based ConnectX engine speaking a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! following the CXI (ConnectX Interface) convention.

use std::io::{self, BufRead, Write};

use connectx::engine::Engine;
use connectx::protocol::parser::{parse_command, Command};

/// Runs the main CXI loop, reading commands from stdin and writing
/// responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    if let Err(e) = run(&mut engine, stdin.lock(), &mut out) {
        eprintln!("output error: {}", e);
        std::process::exit(1);
    }
}

fn run<R: BufRead, W: Write>(engine: &mut Engine, input: R, out: &mut W) -> io::Result<()> {
    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Cxi => engine.handle_cxi(out)?,
            Command::IsReady => engine.handle_isready(out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame => engine.new_game(),
            Command::Position {
                diagram,
                connect_count,
            } => {
                if let Err(e) = engine.set_position(&diagram, connect_count) {
                    eprintln!("{}", e);
                }
            }
            Command::Observe { json } => {
                if let Err(e) = engine.observe(&json) {
                    eprintln!("{}", e);
                }
            }
            Command::SetMark { piece } => engine.set_mark(piece),
            Command::Go => engine.handle_go(out)?,
            Command::Quit => break,
        }
    }
    out.flush()
}
