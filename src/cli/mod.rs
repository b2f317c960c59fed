//! CLI module
//!
//! Argument parsing, configuration loading, and command dispatch.

pub mod args;
pub mod commands;
pub mod errors;

pub use commands::{run, Config};
pub use errors::{CliError, CliResult};
