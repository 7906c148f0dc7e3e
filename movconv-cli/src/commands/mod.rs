//! Command implementations for the CLI.

/// One blocking pass over the input directory.
pub mod batch;
pub mod interactive;

pub use batch::{run_batch, run_batch_with};
pub use interactive::run_interactive;
