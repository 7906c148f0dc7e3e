//! Core library for batch converting `.mov` files to `.mp4` using ffmpeg and ffprobe.
//!
//! This crate provides `.mov` discovery, the ffmpeg-backed converter, and the
//! batch scanner in its blocking and cancellable forms.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use movconv_core::{CoreConfig, FfmpegConverter, run_blocking};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(
//!     PathBuf::from("/path/to/input"),
//!     PathBuf::from("/path/to/output"),
//! );
//! config.validate().unwrap();
//!
//! let converter = FfmpegConverter::from_config(&config);
//! let report = run_blocking(&converter, &config).unwrap();
//! println!("Converted {} file(s)", report.converted_count());
//! ```

pub mod batch;
pub mod config;
pub mod converter;
pub mod discovery;
pub mod error;
pub mod external;
pub mod job;
pub mod terminal;
pub mod utils;

// Re-exports for public API
pub use batch::{
    BatchEvent, BatchReport, BatchStatus, CancellationToken, plan_jobs, prepare_output_dir,
    run_blocking, run_cancellable, spawn_worker,
};
pub use config::CoreConfig;
pub use converter::{FfmpegConverter, VideoConverter, validate_input};
pub use discovery::find_mov_files;
pub use error::{CoreError, CoreResult};
pub use job::{ConversionJob, ConversionOutcome, output_file_name};
pub use utils::{format_bytes, format_duration};
