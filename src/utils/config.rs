// src/utils/config.rs

use std::fmt;
use std::str::FromStr;
use crate::utils::{
    BRUTE_FORCE_MAX_SOURCES, DEFAULT_G, DEFAULT_LEAF_SIZE, DEFAULT_THETA,
    errors::GravityError,
};

/// Evaluation strategy, chosen once per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Barnes-Hut treecode.
    Tree,
    /// Exact pairwise summation.
    BruteForce,
}

impl Method {
    /// Picks an evaluation strategy from the number of source particles alone.
    ///
    /// Small inputs are cheaper to sum directly than to build a tree for.
    ///
    /// # Example
    /// ```
    /// use rs_treegrav::utils::Method;
    ///
    /// assert_eq!(Method::for_problem_size(10), Method::BruteForce);
    /// assert_eq!(Method::for_problem_size(100_000), Method::Tree);
    /// ```
    pub fn for_problem_size(num_sources: usize) -> Method {
        if num_sources <= BRUTE_FORCE_MAX_SOURCES {
            Method::BruteForce
        } else {
            Method::Tree
        }
    }
}

impl FromStr for Method {
    type Err = GravityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(Method::Tree),
            "bruteforce" => Ok(Method::BruteForce),
            other => Err(GravityError::UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Method::Tree => write!(f, "tree"),
            Method::BruteForce => write!(f, "bruteforce"),
        }
    }
}

/// Options shared by every gravity entry point.
///
/// # Example
/// ```
/// use rs_treegrav::utils::{GravityConfig, Method};
///
/// let config = GravityConfig::new(Some(Method::BruteForce), None, Some(6.674e-11), None, None);
/// assert_eq!(config.theta, 0.7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityConfig {
    pub method: Method,
    /// Opening angle, only used by [`Method::Tree`].
    pub theta: f64,
    /// Gravitational constant.
    pub g: f64,
    pub parallel: bool,
    /// Worker count when `parallel` is set; `None` uses every logical processor.
    pub threads: Option<usize>,
    /// Adds quadrupole corrections to approximated tree nodes.
    pub quadrupole: bool,
    pub leaf_size: usize,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            method: Method::Tree,
            theta: DEFAULT_THETA,
            g: DEFAULT_G,
            parallel: false,
            threads: None,
            quadrupole: false,
            leaf_size: DEFAULT_LEAF_SIZE,
        }
    }
}

impl GravityConfig {
    pub fn new(
        method: Option<Method>,
        theta: Option<f64>,
        g: Option<f64>,
        parallel: Option<bool>,
        threads: Option<usize>,
    ) -> Self {
        let default = GravityConfig::default();
        Self {
            method: method.unwrap_or(default.method),
            theta: theta.unwrap_or(default.theta),
            g: g.unwrap_or(default.g),
            parallel: parallel.unwrap_or(default.parallel),
            threads: threads.or(default.threads),
            ..default
        }
    }

    pub fn with_quadrupole(mut self, quadrupole: bool) -> Self {
        self.quadrupole = quadrupole;
        self
    }

    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Checks the parameters, returning the first one that is out of range.
    ///
    /// Nothing is clamped: an out-of-range value is always an error.
    pub fn validate(&self) -> Result<(), GravityError> {
        if !(self.theta > 0.0 && self.theta <= 1.0) {
            return Err(GravityError::InvalidTheta(self.theta));
        }
        if !self.g.is_finite() {
            return Err(GravityError::InvalidGravitationalConstant(self.g));
        }
        if self.threads == Some(0) {
            return Err(GravityError::InvalidThreadCount);
        }
        if self.leaf_size == 0 {
            return Err(GravityError::InvalidLeafSize);
        }
        Ok(())
    }
}
