//! Barnes-Hut traversal of an [`Octree`].
//!
//! Each target walks the tree with its own explicit stack. A node is either
//! summed exactly (leaves), accepted as a single point mass at its center of
//! mass (distant internal nodes), or opened so its children are examined.
use crate::kernels::effective_softening;
use crate::parallel::{FieldEvaluator, FieldSample, Quantity};
use crate::tree::{Octree, OctreeNode, ROOT};
use crate::utils::{add, dot, mat_vec, norm, scale, sub, Vec3};

/// Work done for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkStats {
    /// Internal nodes replaced by their multipole.
    pub nodes_accepted: usize,
    /// Internal nodes whose children had to be examined.
    pub nodes_opened: usize,
    /// Particle-particle kernel evaluations in leaves.
    pub particles_summed: usize,
}

/// Evaluates the field of an [`Octree`] with the Barnes-Hut opening-angle criterion.
///
/// # Examples
///
/// ```
/// use rs_treegrav::parallel::{FieldEvaluator, Quantity};
/// use rs_treegrav::particles::SourceSet;
/// use rs_treegrav::tree::{Octree, TreeWalker};
///
/// let positions = [(1.0, 1.0, 1.0), (-1.0, -1.0, 1.0), (1.0, -1.0, -1.0), (-1.0, 1.0, -1.0)];
/// let masses = [1.0; 4];
/// let sources = SourceSet::new(&positions, &masses, None).expect("valid sources");
/// let tree = Octree::build(&sources, 1);
/// let walker = TreeWalker::new(&tree, 0.5, 1.0);
///
/// // Far away, the whole cluster acts as a 4-unit mass at the origin.
/// let (sample, stats) = walker.evaluate_with_stats((100.0, 0.0, 0.0), 0.0, None, Quantity::Both);
/// assert_eq!(stats.nodes_accepted, 1);
/// assert!((sample.potential + 0.04).abs() < 1e-12);
///
/// // At the center every particle is summed exactly.
/// let sample = walker.evaluate((0.0, 0.0, 0.0), 0.0, None, Quantity::Acceleration);
/// assert!(sample.acceleration.0.abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeWalker<'t> {
    tree: &'t Octree,
    theta: f64,
    g: f64,
    quadrupole: bool,
}

impl<'t> TreeWalker<'t> {
    pub fn new(tree: &'t Octree, theta: f64, g: f64) -> Self {
        Self { tree, theta, g, quadrupole: false }
    }

    pub fn with_quadrupole(mut self, quadrupole: bool) -> Self {
        self.quadrupole = quadrupole;
        self
    }

    /// Returns true if `node` may stand in for its particles at a target `d` away
    /// from its center of mass, with effective softening `h`.
    ///
    /// Both radii are widened by the node's center-of-mass offset, so the target
    /// is always outside the cube and no member can be much closer than `d`
    /// suggests. The second radius keeps the node clear of the softened region.
    #[inline]
    pub fn accepts(&self, node: &OctreeNode, d: f64, h: f64) -> bool {
        let side = node.side();
        d > side / self.theta + node.com_offset && d > h + 0.6 * side + node.com_offset
    }

    /// Same as [`FieldEvaluator::evaluate`], also reporting how much work the walk did.
    pub fn evaluate_with_stats(
        &self,
        position: Vec3,
        h_target: f64,
        skip: Option<usize>,
        quantity: Quantity,
    ) -> (FieldSample, WalkStats) {
        let mut sample = FieldSample::ZERO;
        let mut stats = WalkStats::default();
        if self.tree.is_empty() {
            return (sample, stats);
        }

        let mut stack = Vec::with_capacity(8 * 16);
        stack.push(ROOT);
        while let Some(index) = stack.pop() {
            let node = self.tree.node(index);
            if node.is_leaf() {
                stats.particles_summed += self.sum_leaf(&mut sample, node, position, h_target, skip, quantity);
                continue;
            }

            let dx = sub(position, node.center_of_mass);
            let d = norm(dx);
            let h = effective_softening(h_target, node.max_softening);
            if self.accepts(node, d, h) {
                sample.add_point_mass(dx, d, h, node.mass, quantity);
                if self.quadrupole {
                    add_quadrupole(&mut sample, &node.quadrupole, dx, d, quantity);
                }
                stats.nodes_accepted += 1;
            } else {
                // Reversed so that octant 0 is popped first.
                stack.extend(node.child_indices().rev());
                stats.nodes_opened += 1;
            }
        }
        (sample.scaled(self.g), stats)
    }

    fn sum_leaf(
        &self,
        sample: &mut FieldSample,
        node: &OctreeNode,
        position: Vec3,
        h_target: f64,
        skip: Option<usize>,
        quantity: Quantity,
    ) -> usize {
        let mut summed = 0;
        for k in node.start..node.end {
            if skip == Some(self.tree.original_index(k)) {
                continue;
            }
            let dx = sub(position, self.tree.position(k));
            let r = norm(dx);
            let h = effective_softening(h_target, self.tree.softening(k));
            if r == 0.0 && h == 0.0 {
                continue;
            }
            sample.add_point_mass(dx, r, h, self.tree.mass(k), quantity);
            summed += 1;
        }
        summed
    }
}

impl FieldEvaluator for TreeWalker<'_> {
    fn evaluate(
        &self,
        position: Vec3,
        h_target: f64,
        skip: Option<usize>,
        quantity: Quantity,
    ) -> FieldSample {
        self.evaluate_with_stats(position, h_target, skip, quantity).0
    }
}

/// Quadrupole correction for an accepted node, `d = position - com`, `r = |d|`, `G = 1`.
///
/// phi = -(dᵀQd) / (2 r⁵), a = Qd / r⁵ - 5 (dᵀQd) d / (2 r⁷)
fn add_quadrupole(sample: &mut FieldSample, q: &[[f64; 3]; 3], d: Vec3, r: f64, quantity: Quantity) {
    let qd = mat_vec(q, d);
    let dqd = dot(d, qd);
    let r2 = r * r;
    let r5inv = 1.0 / (r2 * r2 * r);
    if quantity.wants_acceleration() {
        let radial = scale(d, -2.5 * dqd * r5inv / r2);
        sample.acceleration = add(sample.acceleration, add(scale(qd, r5inv), radial));
    }
    if quantity.wants_potential() {
        sample.potential -= 0.5 * dqd * r5inv;
    }
}
