//! Head-to-head match CLI.
//!
//! Plays a series of games between two agent profiles and reports win and
//! draw percentages.
//!
//! Usage:
//!   cargo run --release --bin arena -- [OPTIONS]
//!
//! Options:
//!   --agent1 NAME   First profile (default: mid)
//!   --agent2 NAME   Second profile (default: rules)
//!   --rounds N      Number of games (default: 50)
//!   --rows N        Board rows (default: 6)
//!   --columns N     Board columns (default: 7)
//!   --inarow N      Pieces in a row needed to win (default: 4)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --games FILE    Write every game as JSONL to FILE
//!   --json          Print the summary as JSON on stdout
//!   --quiet         Suppress per-game progress

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use connectx::arena::{self, MatchConfig, MatchSummary};
use connectx::board::Config;
use connectx::search::Profile;

/// Returns the value following a flag, exiting with usage on error.
fn flag_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|v| v.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid or missing {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn profile_value(args: &[String], i: usize, flag: &str) -> Profile {
    let name: String = flag_value(args, i, flag);
    match Profile::from_name(&name) {
        Some(p) => p,
        None => {
            eprintln!("unknown profile for {}: {}", flag, name);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = MatchConfig::default();
    let (mut rows, mut columns, mut inarow) = (6usize, 7usize, 4usize);
    let mut games_path: Option<String> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--agent1" => {
                i += 1;
                config.agent1 = profile_value(&args, i, "--agent1");
            }
            "--agent2" => {
                i += 1;
                config.agent2 = profile_value(&args, i, "--agent2");
            }
            "--rounds" => {
                i += 1;
                config.rounds = flag_value(&args, i, "--rounds");
            }
            "--rows" => {
                i += 1;
                rows = flag_value(&args, i, "--rows");
            }
            "--columns" => {
                i += 1;
                columns = flag_value(&args, i, "--columns");
            }
            "--inarow" => {
                i += 1;
                inarow = flag_value(&args, i, "--inarow");
            }
            "--threads" => {
                i += 1;
                config.threads = flag_value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = flag_value(&args, i, "--seed");
            }
            "--games" => {
                i += 1;
                games_path = Some(flag_value(&args, i, "--games"));
            }
            "--json" => json = true,
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    config.game = match Config::new(rows, columns, inarow) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("invalid board: {}", e);
            process::exit(1);
        }
    };

    if !config.quiet {
        eprintln!(
            "Match: {} vs {}, {} games on {}x{} (connect {}), {} threads",
            config.agent1.name(),
            config.agent2.name(),
            config.rounds,
            rows,
            columns,
            inarow,
            config.threads
        );
    }

    let start = Instant::now();
    let games = match arena::run_games(&config) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("match failed: {}", e);
            process::exit(1);
        }
    };
    let summary = MatchSummary::from_games(&config, &games);
    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.2}s",
            games.len(),
            start.elapsed().as_secs_f64()
        );
    }
    arena::print_summary(&summary);

    if let Some(path) = games_path {
        let written = File::create(&path)
            .and_then(|f| arena::write_jsonl(&games, &mut BufWriter::new(f)));
        if let Err(e) = written {
            eprintln!("failed to write {}: {}", path, e);
            process::exit(1);
        }
        if !config.quiet {
            eprintln!("Wrote {} games to {}", games.len(), path);
        }
    }

    if json {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let written = serde_json::to_writer(&mut out, &summary)
            .map_err(io::Error::from)
            .and_then(|_| writeln!(out));
        if let Err(e) = written {
            eprintln!("failed to write summary: {}", e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: arena [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --agent1 NAME    First profile (default: mid)");
    eprintln!("  --agent2 NAME    Second profile (default: rules)");
    eprintln!("  --rounds N       Number of games (default: 50)");
    eprintln!("  --rows N         Board rows (default: 6)");
    eprintln!("  --columns N      Board columns (default: 7)");
    eprintln!("  --inarow N       Pieces in a row needed to win (default: 4)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --games FILE     Write every game as JSONL to FILE");
    eprintln!("  --json           Print the summary as JSON on stdout");
    eprintln!("  --quiet          Suppress per-game progress");
    eprintln!("  --help           Show this help");
    eprintln!();
    eprintln!("Profiles: basic, rules, first, mid, mid-edge, better-mid, random");
}
