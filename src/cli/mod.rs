//! Command-line interface module.

mod args;
pub mod build;
pub mod list;
pub mod stage;

pub use args::{Cli, Commands};
