//! Gravitational accelerations and potentials of softened point masses.
//!
//! Fields can be evaluated at the particles themselves ([`gravity::accel`],
//! [`gravity::potential`]) or at separate target points
//! ([`gravity::accel_target`], [`gravity::potential_target`]), either by exact
//! pairwise summation or with a Barnes-Hut octree.
//!
//! # Example
//! ```
//! use rs_treegrav::gravity::accel;
//! use rs_treegrav::utils::{GravityConfig, Method};
//!
//! let positions = [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)];
//! let masses = [1.0 / 3.0; 3];
//! let config = GravityConfig::new(Some(Method::for_problem_size(masses.len())), None, None, None, None);
//! let a = accel(&positions, &masses, None, &config).unwrap();
//! assert_eq!(a.len(), 3);
//! ```
pub mod utils;
pub mod particles;
pub mod kernels;
pub mod direct;
pub mod tree;
pub mod parallel;
pub mod gravity;

pub use gravity::{
    accel, accel_and_potential, accel_and_potential_target, accel_target, potential,
    potential_target,
};
pub use utils::{GravityConfig, GravityError, Method};

#[cfg(test)]
mod test_helpers;

/// ### General helper function
/// - Asserts that two floating point numbers are approximately equal.
///
/// ### Arguments
///
/// * `a` - The first floating point number.
/// * `b` - The second floating point number.
/// * `epsilon` - The maximum difference between `a` and `b` for them to be considered equal.
/// * `optional_message` - An optional message to display if the assertion fails.
///
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64, optional_message: Option<&str>) {
    match optional_message {
        Some(message) => assert!((a - b).abs() < epsilon, "a: {:?},\nb: {:?},\nepsilon: {:?},\n message: {:?}", a, b, epsilon, message),
        None => assert!((a - b).abs() < epsilon, "Expected {} to be approximately equal to {} (epsilon: {})", a, b, epsilon),
    }
}
