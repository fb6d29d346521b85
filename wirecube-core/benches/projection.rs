use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wirecube_core::projection::{Camera, Viewport};
use wirecube_core::wireframe::project_cube;
use wirecube_core::{Cube, PongScene, Scene, WireframeScene};

fn bench_project_cube(c: &mut Criterion) {
    let cube = Cube::unit();
    let camera = Camera::default();
    let viewport = Viewport::default();

    c.bench_function("project_cube", |b| {
        b.iter(|| project_cube(&cube, &camera, &viewport, black_box(0.7)))
    });
}

fn bench_wireframe_tick(c: &mut Criterion) {
    let mut scene = WireframeScene::default();

    c.bench_function("wireframe_tick", |b| {
        b.iter(|| {
            scene.update();
            black_box(scene.segments().count())
        })
    });
}

fn bench_pong_tick(c: &mut Criterion) {
    let mut game = PongScene::new();

    c.bench_function("pong_tick", |b| {
        b.iter(|| {
            game.update();
            black_box(game.ball())
        })
    });
}

criterion_group!(benches, bench_project_cube, bench_wireframe_tick, bench_pong_tick);
criterion_main!(benches);
