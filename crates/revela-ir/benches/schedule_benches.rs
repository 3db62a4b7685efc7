use criterion::{black_box, criterion_group, criterion_main, Criterion};
use revela_core::{RevelaConfig, ReferenceCorner, ViewportProfile};
use revela_ir::{compute_reveal_order, RevealSchedule, Scene, SceneBuilder};

/// A grid of alternating paths and rects, roughly the density of a street map illustration.
fn create_grid_scene(columns: usize, rows: usize) -> Scene {
    let mut builder = SceneBuilder::new(columns as f64 * 10.0, rows as f64 * 10.0);
    for row in 0..rows {
        for col in 0..columns {
            let x = col as f64 * 10.0;
            let y = row as f64 * 10.0;
            builder = if (row + col) % 2 == 0 {
                builder.path(x, y, 9.0, 9.0, 36.0)
            } else {
                builder.rect(x, y, 9.0, 9.0)
            };
        }
    }
    builder.build()
}

fn bench_reveal_order(c: &mut Criterion) {
    let scene = create_grid_scene(100, 100);
    c.bench_function("reveal_order_10k", |b| {
        b.iter(|| compute_reveal_order(black_box(&scene), ReferenceCorner::BottomRight))
    });
}

fn bench_schedule(c: &mut Criterion) {
    let scene = create_grid_scene(100, 100);
    let config = RevelaConfig::default();
    c.bench_function("schedule_10k_default", |b| {
        b.iter(|| RevealSchedule::build(black_box(&scene), &config, ViewportProfile::Default))
    });
}

criterion_group!(benches, bench_reveal_order, bench_schedule);
criterion_main!(benches);
