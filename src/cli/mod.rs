//! CLI layer: argument parsing, command dispatch and rendering
//!
//! This is the caller of the engine: it collects edit requests, validates
//! nothing beyond syntax, and renders the resulting forest.

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod render;
pub mod script;

pub use args::{Cli, Commands};
pub use error::{CliError, CliResult};
