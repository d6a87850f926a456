mod particle_sets;

pub use particle_sets::*;

#[cfg(test)]
mod particle_sets_tests;
