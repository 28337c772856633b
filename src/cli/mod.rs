//! Command-line interface module
//!
//! - `qtexport init` - Create a new project with a sample manifest
//! - `qtexport check` - Load a project and summarize it
//! - `qtexport print` - Print the generated build file
//! - `qtexport export` - Write the generated build file if it changed

mod commands;
mod writer;

pub use commands::{run, Cli, CliError, Commands};
pub use writer::{write_if_changed, WriteOutcome};
