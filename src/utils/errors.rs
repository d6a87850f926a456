// src/utils/errors.rs

use std::fmt;
use std::error::Error;

/// Represents the preconditions that can fail before a gravity evaluation starts.
///
/// Every variant is raised before any work is done, so a failed call never
/// returns partial results.
#[derive(Debug, Clone, PartialEq)]
pub enum GravityError {
    /// An array does not have the same length as the positions it describes.
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// Indicates a negative (or NaN) mass.
    InvalidMass { index: usize, value: f64 },
    /// Indicates a negative (or NaN) softening length, source or target side.
    InvalidSoftening { index: usize, value: f64 },
    /// A position has a NaN or infinite coordinate.
    NonFinitePosition { index: usize },
    /// The opening angle lies outside `(0, 1]`.
    InvalidTheta(f64),
    /// The gravitational constant is NaN or infinite.
    InvalidGravitationalConstant(f64),
    /// A worker count of zero was requested.
    InvalidThreadCount,
    /// A leaf capacity of zero was requested.
    InvalidLeafSize,
    /// The method selector is neither `"tree"` nor `"bruteforce"`.
    UnknownMethod(String),
    /// The worker pool could not be created.
    ThreadPool(String),
}

impl fmt::Display for GravityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GravityError::LengthMismatch { field, expected, found } => write!(
                f,
                "Length mismatch: expected {} {}, found {}",
                expected, field, found
            ),
            GravityError::InvalidMass { index, value } => {
                write!(f, "Invalid mass {} at index {}", value, index)
            }
            GravityError::InvalidSoftening { index, value } => {
                write!(f, "Invalid softening length {} at index {}", value, index)
            }
            GravityError::NonFinitePosition { index } => {
                write!(f, "Non-finite position at index {}", index)
            }
            GravityError::InvalidTheta(theta) => {
                write!(f, "Invalid opening angle {} (must lie in (0, 1])", theta)
            }
            GravityError::InvalidGravitationalConstant(g) => {
                write!(f, "Invalid gravitational constant {} (must be finite)", g)
            }
            GravityError::InvalidThreadCount => write!(f, "Worker count must be at least 1"),
            GravityError::InvalidLeafSize => write!(f, "Leaf size must be at least 1"),
            GravityError::UnknownMethod(method) => write!(
                f,
                "Unknown method {:?} (expected \"tree\" or \"bruteforce\")",
                method
            ),
            GravityError::ThreadPool(msg) => write!(f, "Thread pool error: {}", msg),
        }
    }
}

impl Error for GravityError {}
