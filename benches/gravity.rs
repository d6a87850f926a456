use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rs_treegrav::gravity::{accel, accel_target};
use rs_treegrav::particles::SourceSet;
use rs_treegrav::tree::Octree;
use rs_treegrav::utils::{GravityConfig, Method, Vec3};

fn plummer_like(n: usize, seed: u64) -> (Vec<Vec3>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let positions = (0..n)
        .map(|_| {
            // Concentrated toward the center, like a self-gravitating cluster.
            let r: f64 = rng.random_range(0.0..1.0_f64).powi(2);
            let (x, y, z): (f64, f64, f64) = (
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            let len = (x * x + y * y + z * z).sqrt().max(1e-12);
            (r * x / len, r * y / len, r * z / len)
        })
        .collect();
    (positions, vec![1.0 / n as f64; n])
}

pub fn bench_methods(c: &mut Criterion) {
    let _ = env_logger::try_init();
    let mut group = c.benchmark_group("tree_vs_bruteforce");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(10);

    for &n in &[256usize, 1024, 4096] {
        let (positions, masses) = plummer_like(n, 42);
        let softenings = vec![0.01; n];
        debug!("benchmarking {} particles", n);

        let tree = GravityConfig::new(Some(Method::Tree), Some(0.7), None, Some(true), None);
        group.bench_with_input(BenchmarkId::new("tree", n), &n, |b, _| b.iter(|| {
            accel(&positions, &masses, Some(&softenings), &tree).unwrap()
        }));

        let brute = GravityConfig::new(Some(Method::BruteForce), None, None, Some(true), None);
        group.bench_with_input(BenchmarkId::new("bruteforce", n), &n, |b, _| b.iter(|| {
            accel(&positions, &masses, Some(&softenings), &brute).unwrap()
        }));
    }
    group.finish();
}

pub fn bench_theta(c: &mut Criterion) {
    let mut group = c.benchmark_group("opening_angle");
    group.sample_size(10);

    let (positions, masses) = plummer_like(8192, 7);
    let (targets, _) = plummer_like(1024, 8);
    for &theta in &[0.3, 0.5, 0.7, 1.0] {
        let config = GravityConfig::new(Some(Method::Tree), Some(theta), None, Some(true), None);
        group.bench_with_input(BenchmarkId::new("accel_target", theta), &theta, |b, _| b.iter(|| {
            accel_target(&targets, &positions, &masses, None, None, &config).unwrap()
        }));
    }
    group.finish();
}

pub fn bench_build(c: &mut Criterion) {
    let (positions, masses) = plummer_like(16384, 3);
    let sources = SourceSet::new(&positions, &masses, None).unwrap();
    c.bench_function("octree_build_16k", |b| b.iter(|| Octree::build(&sources, 1)));
}

criterion_group!(benches, bench_methods, bench_theta, bench_build);
criterion_main!(benches);
