// movconv-cli/src/lib.rs
//
// Library portion of the movconv CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::{BatchArgs, Cli, CodecArgs, Commands, InteractiveArgs};
pub use commands::{run_batch, run_batch_with, run_interactive};
pub use error::{CliErrorContext, CliResult, suggestion_for};
