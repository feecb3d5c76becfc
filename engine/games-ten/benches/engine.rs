use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use engine_core::Board;
use games_ten::{respond, BoardData, ClientMove, ProtocolConfig, TenBoard, TenMove};
use mcts::MctsConfig;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn midgame() -> TenBoard {
    let mut board = TenBoard::new();
    for (m, t) in [(4, 4), (4, 0), (0, 4), (4, 8), (8, 4), (4, 2)] {
        assert!(board.apply_move(TenMove::new(m, t)));
        board.switch_player();
    }
    board
}

fn bench_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("ten_rules");
    let board = midgame();

    group.bench_function("game_status", |b| b.iter(|| black_box(&board).game_status()));
    group.bench_function("legal_moves_for_search", |b| {
        b.iter(|| black_box(&board).legal_moves_for_search())
    });
    group.bench_function("apply_move", |b| {
        let mv = board.legal_moves()[0];
        b.iter_batched(
            || board.clone(),
            |mut next| {
                next.apply_move_unchecked(mv);
                next
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_random_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("ten_playout");
    group.bench_function("random_game", |b| {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        b.iter_batched(
            TenBoard::new,
            |mut board| {
                while !board.is_terminal() {
                    let moves = board.legal_moves_for_search();
                    let &mv = moves.choose(&mut rng).unwrap();
                    board.apply_move_unchecked(mv);
                    board.switch_player();
                }
                board
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_protocol(c: &mut Criterion) {
    let mut group = c.benchmark_group("ten_protocol");
    group.sample_size(10);
    let config = ProtocolConfig {
        mcts: MctsConfig::default()
            .with_time_budget_ms(60_000)
            .with_max_iterations(100)
            .with_seed(42),
        draw_value: 0.0,
    };
    let client_move = ClientMove::new(BoardData::initial(), TenMove::new(4, 4));

    group.bench_function("respond_100_iterations", |b| {
        b.iter(|| black_box(respond(&client_move, &config)))
    });
    group.finish();
}

criterion_group!(benches, bench_rules, bench_random_game, bench_protocol);
criterion_main!(benches);
