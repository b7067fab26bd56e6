use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use gridbots_core::{BattleConfig, Battlefield, Grid, MemorySink};

fn crowded(size: i32, count: usize, seed: u64) -> Battlefield {
    let grid = Grid::new(size, size).expect("valid grid");
    let mut battle = Battlefield::new(grid, BattleConfig::default(), seed);
    for i in 0..count {
        battle.enlist_random(format!("R{i:03}")).expect("room for robot");
    }
    battle
}

fn bench_single_round(c: &mut Criterion) {
    // Dense board so most turns find a target
    c.bench_function("single_round_16x16_64", |b| {
        b.iter_batched(
            || crowded(16, 64, 7),
            |mut battle| {
                battle.play_round();
                black_box(battle.take_events())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_full_battle(c: &mut Criterion) {
    c.bench_function("full_battle_10x10_20", |b| {
        b.iter_batched(
            || crowded(10, 20, 11),
            |mut battle| black_box(battle.run(&mut MemorySink::new())),
            BatchSize::SmallInput,
        )
    });
}

fn bench_board_render(c: &mut Criterion) {
    let battle = crowded(32, 200, 3);

    c.bench_function("board_render_32x32", |b| {
        b.iter(|| black_box(battle.board().render_text()))
    });
}

criterion_group!(benches, bench_single_round, bench_full_battle, bench_board_render);
criterion_main!(benches);
