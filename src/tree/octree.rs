use log::debug;
use crate::particles::SourceSet;
use crate::utils::{
    add, norm, point_quadrupole, scale, sub, Vec3, BOUNDARY_PADDING, MAX_TREE_DEPTH, ZERO,
};

/// Marks an octant with no particles; such children are never materialised.
pub const NO_CHILD: usize = usize::MAX;

/// Index of the root node in [`Octree::nodes`].
pub const ROOT: usize = 0;

/// Represents an axis-aligned cube in 3D space.
///
/// # Examples
///
/// ```
/// use rs_treegrav::tree::Cube;
///
/// let cube = Cube { center: (0.0, 0.0, 0.0), half_width: 1.0 };
/// assert_eq!(cube.side(), 2.0);
///
/// // Octant bits are set for coordinates strictly above the center: x -> 1, y -> 2, z -> 4.
/// assert_eq!(cube.octant((0.5, -0.5, 0.5)), 5);
/// assert_eq!(cube.octant((0.0, 0.0, 0.0)), 0);
///
/// let child = cube.child(5);
/// assert_eq!(child.center, (0.5, -0.5, 0.5));
/// assert_eq!(child.half_width, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cube {
    pub center: Vec3,
    pub half_width: f64,
}

impl Cube {
    /// Smallest padded cube, centered on the bounding box, that encloses every position.
    ///
    /// The cube is grown by a relative [`BOUNDARY_PADDING`] so that particles on the
    /// bounding box itself lie strictly inside. A set with no spatial extent gets a
    /// unit cube.
    pub fn bounding(positions: &[Vec3]) -> Cube {
        if positions.is_empty() {
            return Cube { center: ZERO, half_width: 0.5 };
        }
        let inf = f64::INFINITY;
        let (min, max) = positions.iter().fold(
            ((inf, inf, inf), (-inf, -inf, -inf)),
            |(lo, hi), p| {
                (
                    (lo.0.min(p.0), lo.1.min(p.1), lo.2.min(p.2)),
                    (hi.0.max(p.0), hi.1.max(p.1), hi.2.max(p.2)),
                )
            },
        );
        let center = scale(add(min, max), 0.5);
        let extent = (max.0 - min.0).max(max.1 - min.1).max(max.2 - min.2);
        let half_width = if extent > 0.0 {
            0.5 * extent * (1.0 + BOUNDARY_PADDING)
        } else {
            0.5
        };
        Cube { center, half_width }
    }

    #[inline]
    pub fn side(&self) -> f64 {
        2.0 * self.half_width
    }

    /// Returns the octant (0-7) of the point relative to the center.
    #[inline]
    pub fn octant(&self, p: Vec3) -> usize {
        let mut octant = 0;
        if p.0 > self.center.0 {
            octant |= 1;
        }
        if p.1 > self.center.1 {
            octant |= 2;
        }
        if p.2 > self.center.2 {
            octant |= 4;
        }
        octant
    }

    /// Returns the sub-cube occupying `octant`.
    pub fn child(&self, octant: usize) -> Cube {
        let q = 0.5 * self.half_width;
        let offset = |bit: usize| if octant & bit != 0 { q } else { -q };
        Cube {
            center: add(self.center, (offset(1), offset(2), offset(4))),
            half_width: q,
        }
    }

    /// Closed containment test.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        let d = sub(p, self.center);
        d.0.abs() <= self.half_width && d.1.abs() <= self.half_width && d.2.abs() <= self.half_width
    }

    /// False once halving no longer moves the child center in floating point.
    pub fn can_subdivide(&self) -> bool {
        self.half_width > 0.0 && self.child(0).center != self.center
    }
}

/// One cell of the octree.
///
/// The node's particles are `start..end` in the tree's walk order, a range shared
/// with (and partitioned among) its descendants. Aggregates are computed once,
/// bottom-up, while the tree is built.
#[derive(Clone, Debug, PartialEq)]
pub struct OctreeNode {
    pub cube: Cube,
    pub mass: f64,
    pub center_of_mass: Vec3,
    /// Distance from the center of mass to the cube center.
    pub com_offset: f64,
    /// Largest softening length among the node's particles.
    pub max_softening: f64,
    /// Traceless quadrupole tensor about the center of mass.
    pub quadrupole: [[f64; 3]; 3],
    /// Child node per octant, or [`NO_CHILD`].
    pub children: [usize; 8],
    pub start: usize,
    pub end: usize,
    pub depth: u32,
}

impl OctreeNode {
    fn new(cube: Cube, start: usize, end: usize, depth: u32) -> Self {
        Self {
            cube,
            mass: 0.0,
            center_of_mass: cube.center,
            com_offset: 0.0,
            max_softening: 0.0,
            quadrupole: [[0.0; 3]; 3],
            children: [NO_CHILD; 8],
            start,
            end,
            depth,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(|&c| c == NO_CHILD)
    }

    /// Number of particles in the subtree.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn side(&self) -> f64 {
        self.cube.side()
    }

    /// Iterates over the node's existing children.
    pub fn child_indices(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.children.iter().copied().filter(|&c| c != NO_CHILD)
    }
}

/// Barnes-Hut octree over a set of source particles, stored as an arena of nodes.
///
/// Nodes refer to their children by index into one `Vec`, and the source data is
/// copied in depth-first order so that every node's particles are contiguous.
/// The tree is built in one pass and is read-only afterwards.
///
/// # Examples
///
/// ```
/// use rs_treegrav::particles::SourceSet;
/// use rs_treegrav::tree::Octree;
///
/// let positions = [(-1.0, -1.0, -1.0), (1.0, 1.0, 1.0), (1.0, -1.0, 1.0)];
/// let masses = [1.0, 2.0, 1.0];
/// let sources = SourceSet::new(&positions, &masses, None).expect("valid sources");
///
/// let tree = Octree::build(&sources, 1);
/// let root = tree.root().expect("non-empty tree");
/// assert_eq!(root.mass, 4.0);
/// assert_eq!(tree.leaf_count(), 3);
///
/// // Building from no particles gives an empty tree instead of failing.
/// let empty = SourceSet::new(&[], &[], None).expect("valid sources");
/// assert!(Octree::build(&empty, 1).root().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Octree {
    nodes: Vec<OctreeNode>,
    /// Walk position -> original source index.
    order: Vec<usize>,
    positions: Vec<Vec3>,
    masses: Vec<f64>,
    softenings: Vec<f64>,
    merged_leaves: usize,
}

/// Running sums for a node's monopole.
struct MomentSums {
    mass: f64,
    weighted: Vec3,
    unweighted: Vec3,
    count: f64,
    max_softening: f64,
}

impl MomentSums {
    fn new() -> Self {
        Self { mass: 0.0, weighted: ZERO, unweighted: ZERO, count: 0.0, max_softening: 0.0 }
    }

    fn add(&mut self, mass: f64, position: Vec3, count: usize, softening: f64) {
        self.mass += mass;
        self.weighted = add(self.weighted, scale(position, mass));
        self.unweighted = add(self.unweighted, scale(position, count as f64));
        self.count += count as f64;
        self.max_softening = self.max_softening.max(softening);
    }

    /// Mass-weighted mean; massless cells fall back to the plain centroid.
    fn center_of_mass(&self) -> Vec3 {
        if self.mass > 0.0 {
            scale(self.weighted, 1.0 / self.mass)
        } else {
            scale(self.unweighted, 1.0 / self.count)
        }
    }
}

impl Octree {
    /// Builds the tree, splitting any cell holding more than `leaf_size` particles.
    ///
    /// Particles that cannot be separated (identical positions, or a cell too small
    /// to halve, or [`MAX_TREE_DEPTH`] reached) end up together in one leaf.
    pub fn build(sources: &SourceSet, leaf_size: usize) -> Octree {
        let n = sources.len();
        let mut tree = Octree {
            nodes: Vec::with_capacity(2 * n),
            order: (0..n).collect(),
            positions: Vec::new(),
            masses: Vec::new(),
            softenings: Vec::new(),
            merged_leaves: 0,
        };
        if n == 0 {
            debug!("built empty octree");
            return tree;
        }

        let root_cube = Cube::bounding(sources.positions());
        tree.build_node(sources, 0, n, root_cube, 0, leaf_size.max(1));

        tree.positions = tree.order.iter().map(|&i| sources.position(i)).collect();
        tree.masses = tree.order.iter().map(|&i| sources.mass(i)).collect();
        tree.softenings = tree.order.iter().map(|&i| sources.softening(i)).collect();

        debug!(
            "built octree: {} particles, {} nodes, {} leaves, depth {}",
            n,
            tree.node_count(),
            tree.leaf_count(),
            tree.max_depth()
        );
        if tree.merged_leaves > 0 {
            debug!(
                "{} leaves hold particles that could not be separated",
                tree.merged_leaves
            );
        }
        tree
    }

    fn build_node(
        &mut self,
        sources: &SourceSet,
        start: usize,
        end: usize,
        cube: Cube,
        depth: u32,
        leaf_size: usize,
    ) -> usize {
        let index = self.nodes.len();
        self.nodes.push(OctreeNode::new(cube, start, end, depth));

        let count = end - start;
        if count <= leaf_size || depth >= MAX_TREE_DEPTH || !cube.can_subdivide() {
            if count > leaf_size {
                self.merged_leaves += 1;
            }
            self.finish_leaf(sources, index);
            return index;
        }

        // Distribute particles to octants
        let mut buckets: [Vec<usize>; 8] = Default::default();
        for &i in &self.order[start..end] {
            buckets[cube.octant(sources.position(i))].push(i);
        }

        let mut ranges = [(0, 0); 8];
        let mut cursor = start;
        for (octant, bucket) in buckets.iter().enumerate() {
            self.order[cursor..cursor + bucket.len()].copy_from_slice(bucket);
            ranges[octant] = (cursor, cursor + bucket.len());
            cursor += bucket.len();
        }

        for (octant, &(lo, hi)) in ranges.iter().enumerate() {
            if lo == hi {
                continue;
            }
            let child = self.build_node(sources, lo, hi, cube.child(octant), depth + 1, leaf_size);
            self.nodes[index].children[octant] = child;
        }

        self.finish_internal(index);
        index
    }

    fn finish_leaf(&mut self, sources: &SourceSet, index: usize) {
        let (start, end) = (self.nodes[index].start, self.nodes[index].end);
        let members = &self.order[start..end];

        let mut sums = MomentSums::new();
        for &i in members {
            sums.add(sources.mass(i), sources.position(i), 1, sources.softening(i));
        }
        let com = if members.len() == 1 {
            sources.position(members[0])
        } else {
            sums.center_of_mass()
        };

        let mut quadrupole = [[0.0; 3]; 3];
        for &i in members {
            accumulate(&mut quadrupole, &point_quadrupole(sources.mass(i), sub(sources.position(i), com)));
        }

        let node = &mut self.nodes[index];
        node.mass = sums.mass;
        node.center_of_mass = com;
        node.com_offset = norm(sub(com, node.cube.center));
        node.max_softening = sums.max_softening;
        node.quadrupole = quadrupole;
    }

    fn finish_internal(&mut self, index: usize) {
        let children: Vec<usize> = self.nodes[index].child_indices().collect();

        let mut sums = MomentSums::new();
        for &c in &children {
            let child = &self.nodes[c];
            sums.add(child.mass, child.center_of_mass, child.len(), child.max_softening);
        }
        let com = sums.center_of_mass();

        // Parallel-axis shift of every child's tensor onto the new center.
        let mut quadrupole = [[0.0; 3]; 3];
        for &c in &children {
            let child = &self.nodes[c];
            accumulate(&mut quadrupole, &child.quadrupole);
            accumulate(&mut quadrupole, &point_quadrupole(child.mass, sub(child.center_of_mass, com)));
        }

        let node = &mut self.nodes[index];
        node.mass = sums.mass;
        node.center_of_mass = com;
        node.com_offset = norm(sub(com, node.cube.center));
        node.max_softening = sums.max_softening;
        node.quadrupole = quadrupole;
    }

    pub fn root(&self) -> Option<&OctreeNode> {
        self.nodes.first()
    }

    #[inline]
    pub fn node(&self, index: usize) -> &OctreeNode {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    /// Number of source particles.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn max_depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Leaves that hold more than the requested number of particles.
    pub fn merged_leaves(&self) -> usize {
        self.merged_leaves
    }

    pub fn total_mass(&self) -> f64 {
        self.root().map_or(0.0, |root| root.mass)
    }

    /// Original source indices in depth-first (walk) order.
    pub fn walk_order(&self) -> &[usize] {
        &self.order
    }

    /// Original source index of the particle at walk position `k`.
    #[inline]
    pub fn original_index(&self, k: usize) -> usize {
        self.order[k]
    }

    #[inline]
    pub fn position(&self, k: usize) -> Vec3 {
        self.positions[k]
    }

    #[inline]
    pub fn mass(&self, k: usize) -> f64 {
        self.masses[k]
    }

    #[inline]
    pub fn softening(&self, k: usize) -> f64 {
        self.softenings[k]
    }
}

fn accumulate(total: &mut [[f64; 3]; 3], term: &[[f64; 3]; 3]) {
    for (row, term_row) in total.iter_mut().zip(term.iter()) {
        for (v, t) in row.iter_mut().zip(term_row.iter()) {
            *v += t;
        }
    }
}
