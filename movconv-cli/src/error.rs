// ============================================================================
// movconv-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reuses the core error type so every failure, wherever it starts,
// reaches `main` as a `CoreError`.

// ---- Internal crate imports ----
use movconv_core::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::fmt;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Extension trait for adding context to errors in the CLI.
///
/// Similar to anyhow's `context`, but the result stays a `CoreError`.
pub trait CliErrorContext<T> {
    /// Add context to an error.
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", context, core_error))
        })
    }
}

/// One-line suggestion for the errors a user can fix themselves.
pub fn suggestion_for(err: &CoreError) -> Option<&'static str> {
    match err {
        CoreError::InputDirNotFound(_) | CoreError::NotADirectory(_) => {
            Some("Check the input directory (see --root and --input)")
        }
        CoreError::DependencyNotFound(_) => Some("Install ffmpeg and ffprobe and make sure they are on PATH"),
        CoreError::ConversionFailed(_) => Some("Run with --verbose to see the ffmpeg error output"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn context_is_prefixed() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = result.cli_context("Failed to read stdin").unwrap_err();
        assert_eq!(err.to_string(), "Failed to read stdin: IO error: gone");
    }

    #[test]
    fn suggestions_cover_user_errors() {
        assert!(suggestion_for(&CoreError::InputDirNotFound(PathBuf::from("data"))).is_some());
        assert!(suggestion_for(&CoreError::NoFilesFound).is_none());
    }
}
