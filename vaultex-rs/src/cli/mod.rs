//! CLI command implementations.

pub mod args;
pub mod output;

pub mod export;
pub mod tags;

pub use args::{Cli, Commands};
pub use output::Output;
