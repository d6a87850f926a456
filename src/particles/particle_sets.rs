//! Borrowed, validated views over the caller's particle arrays.
//!
//! Validation happens once, when a set is constructed, so the evaluators can
//! index freely afterwards. The arrays are never copied or mutated.
use crate::utils::{is_finite, GravityError, Vec3};

/// Mass-carrying particles that generate the field.
#[derive(Debug, Clone, Copy)]
pub struct SourceSet<'a> {
    positions: &'a [Vec3],
    masses: &'a [f64],
    softenings: Option<&'a [f64]>,
}

impl<'a> SourceSet<'a> {
    /// Creates a source set, checking lengths, masses, softenings and positions.
    ///
    /// # Errors
    ///
    /// Returns an error if `masses` or `softenings` do not match `positions` in length,
    /// if any mass or softening is negative or NaN, or if any coordinate is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_treegrav::particles::SourceSet;
    ///
    /// let positions = [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)];
    /// let masses = [1.0, 2.0];
    /// let sources = SourceSet::new(&positions, &masses, None).expect("valid sources");
    /// assert_eq!(sources.len(), 2);
    /// assert_eq!(sources.softening(1), 0.0);
    ///
    /// assert!(SourceSet::new(&positions, &[1.0], None).is_err());
    /// ```
    pub fn new(
        positions: &'a [Vec3],
        masses: &'a [f64],
        softenings: Option<&'a [f64]>,
    ) -> Result<Self, GravityError> {
        check_length("masses", positions.len(), masses.len())?;
        if let Some(h) = softenings {
            check_length("softenings", positions.len(), h.len())?;
            check_softenings(h)?;
        }
        check_positions(positions)?;
        if let Some(index) = masses.iter().position(|m| !(*m >= 0.0)) {
            return Err(GravityError::InvalidMass { index, value: masses[index] });
        }
        Ok(Self { positions, masses, softenings })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &'a [Vec3] {
        self.positions
    }

    pub fn masses(&self) -> &'a [f64] {
        self.masses
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        self.positions[i]
    }

    #[inline]
    pub fn mass(&self, i: usize) -> f64 {
        self.masses[i]
    }

    /// Softening length of source `i`, zero when none were supplied.
    #[inline]
    pub fn softening(&self, i: usize) -> f64 {
        self.softenings.map_or(0.0, |h| h[i])
    }
}

/// Points at which the field is evaluated.
#[derive(Debug, Clone, Copy)]
pub struct TargetSet<'a> {
    positions: &'a [Vec3],
    softenings: Option<&'a [f64]>,
}

impl<'a> TargetSet<'a> {
    /// Creates a target set with optional per-target softening floors.
    ///
    /// # Errors
    ///
    /// Returns an error if `softenings` does not match `positions` in length,
    /// if a softening is negative or NaN, or if any coordinate is not finite.
    pub fn new(positions: &'a [Vec3], softenings: Option<&'a [f64]>) -> Result<Self, GravityError> {
        if let Some(h) = softenings {
            check_length("target softenings", positions.len(), h.len())?;
            check_softenings(h)?;
        }
        check_positions(positions)?;
        Ok(Self { positions, softenings })
    }

    /// Uses the source particles themselves as targets, with their own softenings.
    pub fn from_sources(sources: &SourceSet<'a>) -> Self {
        Self {
            positions: sources.positions,
            softenings: sources.softenings,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        self.positions[i]
    }

    #[inline]
    pub fn softening(&self, i: usize) -> f64 {
        self.softenings.map_or(0.0, |h| h[i])
    }
}

fn check_length(field: &'static str, expected: usize, found: usize) -> Result<(), GravityError> {
    if expected != found {
        return Err(GravityError::LengthMismatch { field, expected, found });
    }
    Ok(())
}

fn check_softenings(softenings: &[f64]) -> Result<(), GravityError> {
    match softenings.iter().position(|h| !(*h >= 0.0)) {
        Some(index) => Err(GravityError::InvalidSoftening { index, value: softenings[index] }),
        None => Ok(()),
    }
}

fn check_positions(positions: &[Vec3]) -> Result<(), GravityError> {
    match positions.iter().position(|p| !is_finite(*p)) {
        Some(index) => Err(GravityError::NonFinitePosition { index }),
        None => Ok(()),
    }
}
