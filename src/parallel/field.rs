use crate::kernels::{force_kernel, potential_kernel};
use crate::utils::{add, scale, Vec3, ZERO};

/// Which quantities an evaluation has to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Acceleration,
    Potential,
    Both,
}

impl Quantity {
    #[inline]
    pub fn wants_acceleration(self) -> bool {
        matches!(self, Quantity::Acceleration | Quantity::Both)
    }

    #[inline]
    pub fn wants_potential(self) -> bool {
        matches!(self, Quantity::Potential | Quantity::Both)
    }
}

/// Acceleration and potential accumulated at one target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldSample {
    pub acceleration: Vec3,
    pub potential: f64,
}

impl FieldSample {
    pub const ZERO: FieldSample = FieldSample { acceleration: ZERO, potential: 0.0 };

    /// Adds the softened contribution of a mass `mass` at separation `dx`
    /// (target minus source), `r = |dx|`, with softening `h` and `G = 1`.
    #[inline]
    pub fn add_point_mass(&mut self, dx: Vec3, r: f64, h: f64, mass: f64, quantity: Quantity) {
        if quantity.wants_acceleration() {
            self.acceleration = add(self.acceleration, scale(dx, -mass * force_kernel(r, h)));
        }
        if quantity.wants_potential() {
            self.potential -= mass * potential_kernel(r, h);
        }
    }

    /// Applies the gravitational constant to the accumulated sums.
    #[inline]
    pub fn scaled(self, g: f64) -> FieldSample {
        FieldSample {
            acceleration: scale(self.acceleration, g),
            potential: self.potential * g,
        }
    }
}

/// Computes the field of a fixed source configuration at one point at a time.
///
/// Implementations are read-only after construction so one instance can be
/// shared by every worker.
pub trait FieldEvaluator: Sync {
    /// Evaluates the field at `position`.
    ///
    /// `h_target` is the target's own softening floor. `skip` is the source
    /// index of the target itself when sources are evaluated on themselves,
    /// so the self pair is left out.
    fn evaluate(
        &self,
        position: Vec3,
        h_target: f64,
        skip: Option<usize>,
        quantity: Quantity,
    ) -> FieldSample;
}
