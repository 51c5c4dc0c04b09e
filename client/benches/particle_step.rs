use bevy::math::Vec3;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use physiosim::effects::{ParticlePool, halo_scale, highlight_intensity};
use rand::SeedableRng;
use rand::rngs::StdRng;

const FRAME_DELTA: f32 = 1.0 / 60.0;

fn bench_pool_step(c: &mut Criterion) {
    for severity in [2.0f32, 10.0, 100.0] {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pool = ParticlePool::spawn(severity, &mut rng);
        c.bench_with_input(
            BenchmarkId::new("pool_step", pool.len()),
            &severity,
            |b, severity| {
                b.iter(|| pool.step(black_box(FRAME_DELTA), *severity, &mut rng));
            },
        );
    }
}

fn bench_render_points(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let pool = ParticlePool::spawn(10.0, &mut rng);
    let anchor = Vec3::new(0.0, 1.0, 0.0);
    c.bench_function("render_points_120", |b| {
        b.iter(|| {
            pool.render_points(black_box(anchor))
                .map(|(position, opacity)| position.y * opacity)
                .sum::<f32>()
        });
    });
}

fn bench_pulse_curves(c: &mut Criterion) {
    c.bench_function("highlight_and_halo_curves", |b| {
        b.iter(|| {
            let elapsed = black_box(12.5f32);
            highlight_intensity(elapsed, 2.0) + halo_scale(elapsed, 2.0)
        });
    });
}

fn effects_benches(c: &mut Criterion) {
    bench_pool_step(c);
    bench_render_points(c);
    bench_pulse_curves(c);
}

criterion_group!(benches, effects_benches);
criterion_main!(benches);
