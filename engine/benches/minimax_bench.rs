use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tictactoe_engine::{
    Board, BotInput, Difficulty, Player, SearchEngine, SessionRng, evaluate, select_move,
};

fn bench_full_search_empty_board() {
    let mut engine = SearchEngine::new();
    black_box(engine.score(Board::new(), Player::X, 0));
}

fn bench_hard_move_empty_board() {
    let mut engine = SearchEngine::new();
    let mut rng = SessionRng::new(0);
    let mut input = BotInput::new(&mut engine, &mut rng);
    black_box(select_move(&Board::new(), Player::X, Difficulty::Hard, &mut input));
}

fn bench_hard_self_play() {
    let mut engine = SearchEngine::new();
    let mut rng = SessionRng::new(0);
    let mut input = BotInput::new(&mut engine, &mut rng);
    let mut board = Board::new();
    while !evaluate(&board).is_terminal() {
        let player = board.player_to_move();
        let Some(index) = select_move(&board, player, Difficulty::Hard, &mut input) else {
            break;
        };
        board = board.with_move(index, player);
    }
    black_box(board);
}

fn bench_uncached_search_empty_board() {
    let mut engine = SearchEngine::uncached();
    black_box(engine.score(Board::new(), Player::X, 0));
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group.bench_function("full_search_empty", |b| b.iter(bench_full_search_empty_board));
    group.bench_function("hard_move_empty", |b| b.iter(bench_hard_move_empty_board));
    group.bench_function("hard_self_play", |b| b.iter(bench_hard_self_play));

    group.sample_size(10);
    group.bench_function("uncached_search_empty", |b| b.iter(bench_uncached_search_empty_board));

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
