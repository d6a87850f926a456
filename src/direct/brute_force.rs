use crate::kernels::effective_softening;
use crate::parallel::{FieldEvaluator, FieldSample, Quantity};
use crate::particles::SourceSet;
use crate::utils::{norm, sub, Vec3};

/// Exact pairwise summation over every source.
///
/// Sources are always visited in ascending index order, so a target's result
/// does not depend on how targets are distributed over workers.
///
/// # Examples
///
/// ```
/// use rs_treegrav::direct::BruteForce;
/// use rs_treegrav::parallel::{FieldEvaluator, Quantity};
/// use rs_treegrav::particles::SourceSet;
///
/// let positions = [(0.0, 0.0, 0.0), (2.0, 0.0, 0.0)];
/// let masses = [1.0, 1.0];
/// let sources = SourceSet::new(&positions, &masses, None).expect("valid sources");
/// let direct = BruteForce::new(sources, 1.0);
///
/// // Field felt by particle 0, leaving out its own contribution.
/// let sample = direct.evaluate((0.0, 0.0, 0.0), 0.0, Some(0), Quantity::Both);
/// assert_eq!(sample.acceleration, (0.25, 0.0, 0.0));
/// assert_eq!(sample.potential, -0.5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BruteForce<'a> {
    sources: SourceSet<'a>,
    g: f64,
}

impl<'a> BruteForce<'a> {
    pub fn new(sources: SourceSet<'a>, g: f64) -> Self {
        Self { sources, g }
    }

    pub fn sources(&self) -> &SourceSet<'a> {
        &self.sources
    }
}

impl FieldEvaluator for BruteForce<'_> {
    fn evaluate(
        &self,
        position: Vec3,
        h_target: f64,
        skip: Option<usize>,
        quantity: Quantity,
    ) -> FieldSample {
        let mut sample = FieldSample::ZERO;
        for j in 0..self.sources.len() {
            if skip == Some(j) {
                continue;
            }
            let dx = sub(position, self.sources.position(j));
            let r = norm(dx);
            let h = effective_softening(h_target, self.sources.softening(j));
            // Coincident and unsoftened: no finite contribution exists.
            if r == 0.0 && h == 0.0 {
                continue;
            }
            sample.add_point_mass(dx, r, h, self.sources.mass(j), quantity);
        }
        sample.scaled(self.g)
    }
}
