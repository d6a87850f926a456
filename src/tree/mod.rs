mod octree;
mod tree_walk;

pub use octree::*;
pub use tree_walk::*;
