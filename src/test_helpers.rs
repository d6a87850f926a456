//! Seeded particle sets and error metrics shared by the unit tests.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::utils::{norm, sub, Vec3};

/// Uniformly distributed points in the cube `[-1, 1)^3`.
pub fn random_points(n: usize, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            (
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            )
        })
        .collect()
}

/// Masses between `0.5 / n` and `1.5 / n`.
pub fn random_masses(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(0.5..1.5) / n as f64).collect()
}

/// Root-mean-square of `|approx - exact| / |exact|` over all entries.
pub fn rms_relative_error(approx: &[Vec3], exact: &[Vec3]) -> f64 {
    assert_eq!(approx.len(), exact.len());
    let sum: f64 = approx
        .iter()
        .zip(exact)
        .map(|(&a, &e)| {
            let rel = norm(sub(a, e)) / norm(e);
            rel * rel
        })
        .sum();
    (sum / exact.len() as f64).sqrt()
}

/// Asserts `|a - b| <= tolerance * |b|` for two vectors.
pub fn assert_vec_close(a: Vec3, b: Vec3, tolerance: f64) {
    let diff = norm(sub(a, b));
    assert!(
        diff <= tolerance * norm(b),
        "vectors differ: {:?} vs {:?} (|diff| = {:e})",
        a,
        b,
        diff
    );
}
