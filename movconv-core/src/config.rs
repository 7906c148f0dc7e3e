// ============================================================================
// movconv-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration passed into the batch scanner at call
// time. Nothing here is process-global: each front end builds a `CoreConfig`
// from its own arguments and hands it down.
//
// KEY COMPONENTS:
// - CoreConfig: Directories, codecs and output-directory policy
// - Default constants: Codec names and the anchor-relative subdirectories

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Default ffmpeg video encoder for the `.mp4` output.
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";

/// Default ffmpeg audio encoder for the `.mp4` output.
pub const DEFAULT_AUDIO_CODEC: &str = "aac";

/// Input subdirectory used by the batch command, relative to its root.
pub const DEFAULT_INPUT_SUBDIR: &str = "data";

/// Output subdirectory used by the batch command, relative to its root.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "output";

/// Extension of the files picked up by discovery (compared case-insensitively).
pub const INPUT_EXTENSION: &str = "mov";

/// Extension given to converted files.
pub const OUTPUT_EXTENSION: &str = "mp4";

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Configuration for one batch run.
///
/// # Examples
///
/// ```rust
/// use movconv_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let config = CoreConfig::new(PathBuf::from("/videos/in"), PathBuf::from("/videos/out"));
/// assert_eq!(config.video_codec, "libx264");
/// assert!(!config.create_output_dir);
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Path Configuration ----

    /// Directory scanned (non-recursively) for `.mov` files
    pub input_dir: PathBuf,

    /// Directory where converted `.mp4` files are written
    pub output_dir: PathBuf,

    // ---- Encoder Settings ----

    /// ffmpeg video codec identifier passed to `-c:v`
    pub video_codec: String,

    /// ffmpeg audio codec identifier passed to `-c:a`
    pub audio_codec: String,

    // ---- Processing Options ----

    /// Create `output_dir` before converting when it does not exist.
    /// The batch command leaves this off and expects the directory to exist.
    pub create_output_dir: bool,
}

impl CoreConfig {
    /// Creates a configuration with default codecs.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            create_output_dir: false,
        }
    }

    /// Creates the batch command's configuration: `<root>/data` → `<root>/output`.
    pub fn from_root(root: &Path) -> Self {
        Self::new(
            root.join(DEFAULT_INPUT_SUBDIR),
            root.join(DEFAULT_OUTPUT_SUBDIR),
        )
    }

    /// Checks values that would otherwise only fail deep inside ffmpeg.
    pub fn validate(&self) -> CoreResult<()> {
        if self.video_codec.trim().is_empty() {
            return Err(CoreError::OperationFailed(
                "Video codec must not be empty".to_string(),
            ));
        }
        if self.audio_codec.trim().is_empty() {
            return Err(CoreError::OperationFailed(
                "Audio codec must not be empty".to_string(),
            ));
        }
        if self.input_dir == self.output_dir {
            log::warn!(
                "Input and output directory are the same: {}",
                self.input_dir.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_root_uses_fixed_subdirs() {
        let config = CoreConfig::from_root(Path::new("/project"));
        assert_eq!(config.input_dir, PathBuf::from("/project/data"));
        assert_eq!(config.output_dir, PathBuf::from("/project/output"));
        assert_eq!(config.audio_codec, DEFAULT_AUDIO_CODEC);
    }

    #[test]
    fn validate_rejects_blank_codec() {
        let mut config = CoreConfig::new(PathBuf::from("in"), PathBuf::from("out"));
        assert!(config.validate().is_ok());

        config.video_codec = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(CoreError::OperationFailed(_))
        ));
    }
}
