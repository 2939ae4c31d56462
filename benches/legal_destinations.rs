//! Criterion benchmarks for the move generation hot path.
//!
//! Run with:
//!     cargo bench --bench legal_destinations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use draughts_engine::games::draughts::moves::legal_moves;
use draughts_engine::games::draughts::{choose_move, legal_destinations, GameState};

const SEEDS: [u64; 3] = [42, 123, 999];
const CHECKPOINTS: [usize; 3] = [0, 8, 16];

struct Fixture {
    label: String,
    state: GameState,
}

/// Play seeded random games and snapshot them after a few plies.
fn build_fixtures() -> Vec<Fixture> {
    let mut fixtures = Vec::new();
    for &seed in &SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new();
        for &checkpoint in &CHECKPOINTS {
            while state.history.len() < checkpoint && !state.is_over() {
                match choose_move(&state.board, state.current_player, &mut rng) {
                    Some((from, to)) => match state.play_move(from, to) {
                        Ok(next) => state = next,
                        Err(_) => break,
                    },
                    None => break,
                }
            }
            fixtures.push(Fixture {
                label: format!("s{}_m{}", seed, state.history.len()),
                state: state.clone(),
            });
        }
    }
    fixtures
}

fn bench_legal_destinations(c: &mut Criterion) {
    let fixtures = build_fixtures();
    let mut group = c.benchmark_group("legal_destinations");

    for fixture in &fixtures {
        let player = fixture.state.current_player;
        let pieces = fixture.state.board.pieces(player);
        group.bench_with_input(BenchmarkId::new("all_pieces", &fixture.label), fixture, |b, f| {
            b.iter(|| {
                for &sq in &pieces {
                    black_box(legal_destinations(&f.state.board, sq, player));
                }
            });
        });
    }

    group.finish();
}

fn bench_legal_moves(c: &mut Criterion) {
    let fixtures = build_fixtures();
    let mut group = c.benchmark_group("legal_moves");

    for fixture in &fixtures {
        group.bench_with_input(BenchmarkId::new("legal_moves", &fixture.label), fixture, |b, f| {
            b.iter(|| legal_moves(&f.state.board, f.state.current_player));
        });
    }

    group.finish();
}

fn bench_choose_move(c: &mut Criterion) {
    let fixtures = build_fixtures();
    let mut group = c.benchmark_group("choose_move");

    for fixture in &fixtures {
        group.bench_with_input(BenchmarkId::new("choose_move", &fixture.label), fixture, |b, f| {
            let mut rng = StdRng::seed_from_u64(0);
            b.iter(|| choose_move(&f.state.board, f.state.current_player, &mut rng));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_legal_destinations, bench_legal_moves, bench_choose_move);
criterion_main!(benches);
