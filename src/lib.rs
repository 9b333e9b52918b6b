pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;

pub use error::{RelGuardError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VIOLATIONS: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
