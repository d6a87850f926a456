/// Default Barnes-Hut opening angle.
pub const DEFAULT_THETA: f64 = 0.7;

/// Gravitational constant in solver units.
pub const DEFAULT_G: f64 = 1.0;

/// Maximum number of particles held by a leaf before it is split.
pub const DEFAULT_LEAF_SIZE: usize = 1;

/// Depth at which subdivision stops and any remaining particles share a leaf.
pub const MAX_TREE_DEPTH: u32 = 64;

/// Relative growth applied to the root cube so boundary particles sit strictly inside.
pub const BOUNDARY_PADDING: f64 = 1e-8;

/// Largest source count for which brute force is the automatic choice.
pub const BRUTE_FORCE_MAX_SOURCES: usize = 1000;
