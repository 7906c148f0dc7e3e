//! Implementation of the `interactive` subcommand.
//!
//! A terminal control surface with Start and Stop controls over a background
//! worker. Conversions run one at a time on the worker thread while the
//! foreground keeps accepting commands.

pub mod picker;
pub mod state;
pub mod surface;

pub use state::{ControlState, Controls, Effect, Field, RunState};
pub use surface::{InteractiveSurface, SurfaceEvent, spawn_stdin_reader};

use crate::cli::InteractiveArgs;
use crate::error::CliResult;

use movconv_core::{FfmpegConverter, VideoConverter};

use std::sync::Arc;
use std::sync::mpsc;

/// Runs the interactive surface on stdin with the production converter.
pub fn run_interactive(args: InteractiveArgs) -> CliResult<()> {
    let config = args.to_core_config()?;
    let converter: Arc<dyn VideoConverter> = Arc::new(FfmpegConverter::from_config(&config));

    let (tx, rx) = mpsc::channel();
    spawn_stdin_reader(tx.clone())?;

    InteractiveSurface::new(ControlState::new(config), converter, tx, rx).run()
}
