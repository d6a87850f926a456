mod softening;

pub use softening::*;
