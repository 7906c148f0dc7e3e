// ============================================================================
// movconv-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup for the CLI
//
// All console output, including the styled terminal sections from
// movconv-core, goes through the `log` macros. Info lines are printed bare so
// they read as normal program output; other levels carry a tag.
//
// USAGE:
// - default: info
// - --verbose: debug
// - RUST_LOG=...: overrides both

use env_logger::{Builder, Env, Target};
use log::{Level, LevelFilter};
use std::io::Write;

/// Initializes the global logger. Call once, early in `main`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::from_env(Env::default().default_filter_or(default_level.as_str()))
        .target(Target::Stdout)
        .format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "[{}] {}", level, record.args()),
        })
        .init();

    log::debug!("Logger initialized with default level: {}", default_level);
}

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}
