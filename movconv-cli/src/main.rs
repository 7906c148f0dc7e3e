// movconv-cli/src/main.rs
//
// Entry point for the movconv binary.
//
// Responsibilities:
// - Parsing command-line arguments.
// - Setting up logging and color.
// - Dispatching to the `batch` or `interactive` command.
// - Reporting errors and exiting non-zero on failure.

use clap::Parser;
use movconv_cli::logging::init_logging;
use movconv_cli::{Cli, Commands, run_batch, run_interactive, suggestion_for};
use movconv_core::terminal;
use std::process;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    terminal::set_color(!cli.no_color && console::colors_enabled());

    let result = match cli.command {
        Commands::Batch(args) => run_batch(args),
        Commands::Interactive(args) => run_interactive(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        terminal::print_error("Conversion stopped", suggestion_for(&e));
        process::exit(1);
    }
}
