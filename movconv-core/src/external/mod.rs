// ============================================================================
// movconv-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates everything that talks to the external toolchain.
// Each tool sits behind a trait so the converter can be driven by mocks in
// tests and by ffmpeg-sidecar / the ffprobe crate in production.
//
// KEY COMPONENTS:
// - FfprobeExecutor: frame rate lookup for an input file
// - FfmpegSpawner / FfmpegProcess: launching and draining an encode
// - Dependency checking for the ffmpeg and ffprobe binaries

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Traits and implementations for spawning ffmpeg and building encode commands
pub mod ffmpeg_executor;

/// Traits and implementations for querying stream properties with ffprobe
pub mod ffprobe_executor;

/// Send-safe test doubles for the two executors
#[cfg(all(unix, any(test, feature = "test-mocks")))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{
    FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner, build_convert_command,
    run_ffmpeg,
};
pub use ffprobe_executor::{CrateFfprobeExecutor, FfprobeExecutor, parse_frame_rate};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be started.
///
/// The command is run with `-version` and its output discarded; only a
/// failure to launch counts as missing.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

/// Checks for both ffmpeg and ffprobe.
pub fn check_dependencies() -> CoreResult<()> {
    check_dependency("ffmpeg")?;
    check_dependency("ffprobe")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_reported_by_name() {
        match check_dependency("movconv-surely-missing-binary") {
            Err(CoreError::DependencyNotFound(name)) => {
                assert_eq!(name, "movconv-surely-missing-binary")
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
