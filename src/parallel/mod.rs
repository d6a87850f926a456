mod dispatcher;
mod field;

pub use dispatcher::*;
pub use field::*;

#[cfg(test)]
mod dispatcher_tests;
