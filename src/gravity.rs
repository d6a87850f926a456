// src/gravity.rs

use log::{debug, error};
use crate::direct::BruteForce;
use crate::parallel::{Dispatcher, FieldSample, Quantity};
use crate::particles::{SourceSet, TargetSet};
use crate::tree::{Octree, TreeWalker};
use crate::utils::{GravityConfig, GravityError, Method, Vec3};

/// Computes the gravitational acceleration of every particle due to all the others.
/// # Arguments
/// * `positions` - The particle positions.
/// * `masses` - The particle masses, one per position.
/// * `softenings` - Optional softening lengths, one per position (zero when `None`).
/// * `config` - Method, opening angle, gravitational constant and parallelism.
///
/// # Returns
/// One acceleration vector per particle, in input order.
///
/// # Errors
/// Returns an error if the arrays differ in length, a mass or softening is negative,
/// a position is not finite, or a configuration value is out of range.
///
/// # Example
/// ```
/// use rs_treegrav::gravity::accel;
/// use rs_treegrav::utils::GravityConfig;
///
/// let positions = [(0.0, 0.0, 0.0), (2.0, 0.0, 0.0)];
/// let masses = [1.0, 1.0];
/// let a = accel(&positions, &masses, None, &GravityConfig::default()).unwrap();
/// assert_eq!(a, vec![(0.25, 0.0, 0.0), (-0.25, 0.0, 0.0)]);
/// ```
pub fn accel(
    positions: &[Vec3],
    masses: &[f64],
    softenings: Option<&[f64]>,
    config: &GravityConfig,
) -> Result<Vec<Vec3>, GravityError> {
    let samples = compute_self(positions, masses, softenings, config, Quantity::Acceleration)?;
    Ok(samples.iter().map(|s| s.acceleration).collect())
}

/// Computes the gravitational potential of every particle due to all the others.
///
/// Takes the same arguments as [`accel`] and returns one value per particle.
///
/// # Example
/// ```
/// use rs_treegrav::gravity::potential;
/// use rs_treegrav::utils::{GravityConfig, Method};
///
/// let positions = [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)];
/// let masses = [0.5, 0.5];
/// let config = GravityConfig::new(Some(Method::BruteForce), None, None, None, None);
/// let phi = potential(&positions, &masses, None, &config).unwrap();
/// assert_eq!(phi, vec![-0.5, -0.5]);
/// ```
pub fn potential(
    positions: &[Vec3],
    masses: &[f64],
    softenings: Option<&[f64]>,
    config: &GravityConfig,
) -> Result<Vec<f64>, GravityError> {
    let samples = compute_self(positions, masses, softenings, config, Quantity::Potential)?;
    Ok(samples.iter().map(|s| s.potential).collect())
}

/// Computes both the acceleration and the potential of every particle in one pass.
pub fn accel_and_potential(
    positions: &[Vec3],
    masses: &[f64],
    softenings: Option<&[f64]>,
    config: &GravityConfig,
) -> Result<(Vec<Vec3>, Vec<f64>), GravityError> {
    let samples = compute_self(positions, masses, softenings, config, Quantity::Both)?;
    Ok(split(&samples))
}

/// Computes the gravitational acceleration at arbitrary target points.
/// # Arguments
/// * `targets` - The points at which the field is evaluated.
/// * `positions` - The source particle positions.
/// * `masses` - The source masses, one per source position.
/// * `target_softenings` - Optional softening floor of each target.
/// * `source_softenings` - Optional softening length of each source.
/// * `config` - Method, opening angle, gravitational constant and parallelism.
///
/// # Returns
/// One acceleration vector per target, in input order. With no sources every
/// vector is zero.
///
/// # Errors
/// Same as [`accel`], with the target arrays checked as well.
///
/// # Example
/// ```
/// use rs_treegrav::gravity::accel_target;
/// use rs_treegrav::utils::GravityConfig;
///
/// let targets = [(0.0, 0.0, 4.0)];
/// let positions = [(0.0, 0.0, 0.0)];
/// let masses = [32.0];
/// let a = accel_target(&targets, &positions, &masses, None, None, &GravityConfig::default()).unwrap();
/// assert_eq!(a, vec![(0.0, 0.0, -2.0)]);
/// ```
pub fn accel_target(
    targets: &[Vec3],
    positions: &[Vec3],
    masses: &[f64],
    target_softenings: Option<&[f64]>,
    source_softenings: Option<&[f64]>,
    config: &GravityConfig,
) -> Result<Vec<Vec3>, GravityError> {
    let samples = compute_target(
        targets,
        positions,
        masses,
        target_softenings,
        source_softenings,
        config,
        Quantity::Acceleration,
    )?;
    Ok(samples.iter().map(|s| s.acceleration).collect())
}

/// Computes the gravitational potential at arbitrary target points.
///
/// Takes the same arguments as [`accel_target`] and returns one value per target.
pub fn potential_target(
    targets: &[Vec3],
    positions: &[Vec3],
    masses: &[f64],
    target_softenings: Option<&[f64]>,
    source_softenings: Option<&[f64]>,
    config: &GravityConfig,
) -> Result<Vec<f64>, GravityError> {
    let samples = compute_target(
        targets,
        positions,
        masses,
        target_softenings,
        source_softenings,
        config,
        Quantity::Potential,
    )?;
    Ok(samples.iter().map(|s| s.potential).collect())
}

/// Computes both the acceleration and the potential at arbitrary target points.
pub fn accel_and_potential_target(
    targets: &[Vec3],
    positions: &[Vec3],
    masses: &[f64],
    target_softenings: Option<&[f64]>,
    source_softenings: Option<&[f64]>,
    config: &GravityConfig,
) -> Result<(Vec<Vec3>, Vec<f64>), GravityError> {
    let samples = compute_target(
        targets,
        positions,
        masses,
        target_softenings,
        source_softenings,
        config,
        Quantity::Both,
    )?;
    Ok(split(&samples))
}

fn split(samples: &[FieldSample]) -> (Vec<Vec3>, Vec<f64>) {
    samples.iter().map(|s| (s.acceleration, s.potential)).unzip()
}

fn compute_self(
    positions: &[Vec3],
    masses: &[f64],
    softenings: Option<&[f64]>,
    config: &GravityConfig,
    quantity: Quantity,
) -> Result<Vec<FieldSample>, GravityError> {
    let result = config.validate().and_then(|_| {
        let sources = SourceSet::new(positions, masses, softenings)?;
        let targets = TargetSet::from_sources(&sources);
        evaluate(sources, &targets, true, quantity, config)
    });
    result.inspect_err(|e| error!("Error evaluating gravity: {}", e))
}

fn compute_target(
    targets: &[Vec3],
    positions: &[Vec3],
    masses: &[f64],
    target_softenings: Option<&[f64]>,
    source_softenings: Option<&[f64]>,
    config: &GravityConfig,
    quantity: Quantity,
) -> Result<Vec<FieldSample>, GravityError> {
    let result = config.validate().and_then(|_| {
        let sources = SourceSet::new(positions, masses, source_softenings)?;
        let targets = TargetSet::new(targets, target_softenings)?;
        evaluate(sources, &targets, false, quantity, config)
    });
    result.inspect_err(|e| error!("Error evaluating gravity at targets: {}", e))
}

/// Runs the configured evaluator over every target. Inputs are already validated.
fn evaluate(
    sources: SourceSet,
    targets: &TargetSet,
    self_interacting: bool,
    quantity: Quantity,
    config: &GravityConfig,
) -> Result<Vec<FieldSample>, GravityError> {
    debug!(
        "{} evaluation of {:?}: {} sources, {} targets",
        config.method,
        quantity,
        sources.len(),
        targets.len()
    );
    let dispatcher = Dispatcher::new(config.parallel, config.threads);
    match config.method {
        Method::Tree => {
            let tree = Octree::build(&sources, config.leaf_size);
            let walker = TreeWalker::new(&tree, config.theta, config.g).with_quadrupole(config.quadrupole);
            dispatcher.run(&walker, targets, self_interacting, quantity)
        }
        Method::BruteForce => {
            let direct = BruteForce::new(sources, config.g);
            dispatcher.run(&direct, targets, self_interacting, quantity)
        }
    }
}
