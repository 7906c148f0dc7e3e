// ============================================================================
// movconv-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for movconv-core
//
// Every fallible operation in the library returns `CoreResult<T>`. Conversion
// errors are deliberately coarse: whatever goes wrong inside ffprobe/ffmpeg is
// logged with context and surfaced as a single `ConversionFailed`.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Custom error types for movconv-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported input type (expected a .mov file): {}", .0.display())]
    UnsupportedInput(PathBuf),

    #[error("Conversion failed: {}", .0.display())]
    ConversionFailed(PathBuf),

    #[error("Input directory not found: {}", .0.display())]
    InputDirNotFound(PathBuf),

    #[error("Input path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("No .mov files found")]
    NoFilesFound,

    #[error("Required dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("{cmd} exited with {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("ffprobe output error: {0}")]
    FfprobeParse(String),

    #[error("Background worker error: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for movconv-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a `CommandStart` error for a process that could not be launched.
pub fn command_start_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds a `CommandFailed` error for a process that exited unsuccessfully.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}
