mod constants;
mod config;
mod errors;
mod math_helpers;

pub use constants::*;
pub use config::*;
pub use errors::*;
pub use math_helpers::*;

#[cfg(test)]
mod config_tests;
