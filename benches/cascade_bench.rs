use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use connectx::arena::{run_match, MatchConfig};
use connectx::board::Piece;
use connectx::eval::{can_force_win, count_winning_moves, creates_win};
use connectx::protocol::diagram::parse_diagram;
use connectx::search::Profile;

const EMPTY: &str = "......./......./......./......./......./.......";

/// A busy middlegame with threats for both sides.
const MIDGAME: &str = "......./......./...o.../..xx.../..oxo../.xoxxo.";

fn bench_creates_win(c: &mut Criterion) {
    let board = parse_diagram(MIDGAME, 4).unwrap();
    c.bench_function("creates_win_all_columns", |b| {
        b.iter(|| {
            (0..board.columns())
                .filter(|&col| matches!(creates_win(black_box(&board), col, Piece::One), Ok(true)))
                .count()
        })
    });
}

fn bench_count_winning_moves(c: &mut Criterion) {
    let board = parse_diagram(MIDGAME, 4).unwrap();
    c.bench_function("count_winning_moves", |b| {
        b.iter(|| count_winning_moves(black_box(&board), Piece::Two))
    });
}

fn bench_can_force_win(c: &mut Criterion) {
    let board = parse_diagram(MIDGAME, 4).unwrap();
    c.bench_function("can_force_win", |b| {
        b.iter(|| can_force_win(black_box(&board), Piece::One))
    });
}

fn bench_cascade_profiles(c: &mut Criterion) {
    let empty = parse_diagram(EMPTY, 4).unwrap();
    let midgame = parse_diagram(MIDGAME, 4).unwrap();
    let mut rng = SmallRng::seed_from_u64(7);
    for profile in [Profile::Mid, Profile::BetterMid, Profile::Rules] {
        let cascade = profile.cascade();
        c.bench_function(&format!("cascade_{}_empty", profile.name()), |b| {
            b.iter(|| cascade.choose_move(black_box(&empty), Piece::One, &mut rng))
        });
        c.bench_function(&format!("cascade_{}_midgame", profile.name()), |b| {
            b.iter(|| cascade.choose_move(black_box(&midgame), Piece::One, &mut rng))
        });
    }
}

fn bench_match(c: &mut Criterion) {
    let config = MatchConfig {
        agent1: Profile::BetterMid,
        agent2: Profile::Rules,
        rounds: 4,
        seed: 3,
        threads: 1,
        quiet: true,
        ..MatchConfig::default()
    };
    let mut group = c.benchmark_group("arena");
    group.sample_size(10);
    group.bench_function("better_mid_vs_rules_4_games", |b| {
        b.iter(|| run_match(black_box(&config)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_creates_win,
    bench_count_winning_moves,
    bench_can_force_win,
    bench_cascade_profiles,
    bench_match,
);
criterion_main!(benches);
