use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockdrop::core::{Engine, EngineConfig, EngineSnapshot, FrameInput, Grid};
use blockdrop::types::PieceKind;

fn bench_frame(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();

    c.bench_function("engine_frame_16ms", |b| {
        b.iter(|| {
            if engine.is_over() {
                engine.reset();
            }
            engine.frame(black_box(16), FrameInput::default());
        })
    });
}

fn bench_gravity_step(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();

    c.bench_function("gravity_step", |b| {
        b.iter(|| {
            if engine.is_over() {
                engine.reset();
            }
            black_box(engine.gravity_step());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new(12, 22).unwrap();
            for y in 18..22 {
                for x in 1..11 {
                    grid.place(x, y, PieceKind::I);
                }
            }
            black_box(grid.clear_complete_rows());
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();
    engine.spawn_kind(PieceKind::T);
    engine.gravity_step();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            black_box(engine.move_left());
            black_box(engine.move_right());
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();
    engine.spawn_kind(PieceKind::T);
    engine.gravity_step();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(engine.rotate());
        })
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default(), 12345).unwrap();
    let mut snap = EngineSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            engine.snapshot_into(black_box(&mut snap));
        })
    });
}

criterion_group!(
    benches,
    bench_frame,
    bench_gravity_step,
    bench_line_clear,
    bench_move,
    bench_rotate,
    bench_snapshot_into
);
criterion_main!(benches);
