// movconv-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use movconv_core::config::{DEFAULT_AUDIO_CODEC, DEFAULT_VIDEO_CODEC};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "movconv: batch .mov to .mp4 converter",
    long_about = "Converts .mov files to .mp4 using ffmpeg, either as a one-shot batch \
                  or from an interactive terminal control surface."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG overrides this)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Disable colored output (NO_COLOR is also honored)
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts every .mov file in ROOT/data into ROOT/output, stopping at the first failure
    Batch(BatchArgs),
    /// Starts the interactive control surface with start/stop controls
    Interactive(InteractiveArgs),
}

/// Encoder settings shared by both commands.
#[derive(Args, Debug, Clone)]
pub struct CodecArgs {
    /// ffmpeg video codec for the .mp4 output
    #[arg(long, value_name = "CODEC", env = "MOVCONV_VIDEO_CODEC", default_value = DEFAULT_VIDEO_CODEC)]
    pub video_codec: String,

    /// ffmpeg audio codec for the .mp4 output
    #[arg(long, value_name = "CODEC", env = "MOVCONV_AUDIO_CODEC", default_value = DEFAULT_AUDIO_CODEC)]
    pub audio_codec: String,
}

#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Anchor directory; input defaults to ROOT/data and output to ROOT/output
    #[arg(long, value_name = "ROOT", env = "MOVCONV_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Optional: Override the input directory
    #[arg(short = 'i', long = "input", value_name = "INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Optional: Override the output directory (must already exist)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub codecs: CodecArgs,
}

#[derive(Parser, Debug)]
pub struct InteractiveArgs {
    /// Anchor directory for the initial field values (ROOT/data, ROOT/output)
    #[arg(long, value_name = "ROOT", env = "MOVCONV_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Optional: Initial input directory
    #[arg(short = 'i', long = "input", value_name = "INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Optional: Initial output directory (created on start if absent)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub codecs: CodecArgs,
}
