use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sable::engine::{evaluate, Searcher, TranspositionTable};
use sable::game::GameState;

fn bench_move_generation(c: &mut Criterion) {
    c.bench_function("generate moves startpos", |b| {
        let mut state = GameState::new();
        b.iter(|| black_box(state.generate_moves().len()))
    });
}

fn bench_evaluation(c: &mut Criterion) {
    c.bench_function("evaluate middlegame", |b| {
        let state =
            GameState::from_fen("r1bq1rk1/pp2ppbp/2np1np1/8/3NP3/2N1BP2/PPPQ2PP/R3KB1R w KQ -")
                .unwrap();
        b.iter(|| black_box(evaluate(&state)))
    });
}

fn bench_mate_in_two_search(c: &mut Criterion) {
    // The search stops as soon as the forced mate is confirmed, so this
    // measures real tree work rather than a fixed deadline.
    c.bench_function("search mate in two", |b| {
        b.iter(|| {
            let mut state = GameState::from_fen("7k/8/8/6K1/8/8/8/Q7 w - - 0 1").unwrap();
            let mut table = TranspositionTable::new(16);
            let mut searcher = Searcher::new();
            searcher.set_time_limit(Duration::from_millis(10_000));
            black_box(searcher.find_best_move(&mut state, &mut table))
        })
    });
}

criterion_group!(
    benches,
    bench_move_generation,
    bench_evaluation,
    bench_mate_in_two_search
);
criterion_main!(benches);
