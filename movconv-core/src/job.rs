//! Conversion jobs and their outcomes.
//!
//! A job pairs one discovered `.mov` file with the `.mp4` path it is written
//! to. Jobs live only for the duration of a batch.

use crate::config::OUTPUT_EXTENSION;

use std::path::{Path, PathBuf};
use std::time::Duration;

/// One source-file-to-target-file conversion unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl ConversionJob {
    /// Builds the job for `input_path`, placing the target in `output_dir`.
    pub fn for_input(input_path: PathBuf, output_dir: &Path) -> Self {
        let output_path = output_dir.join(output_file_name(&input_path));
        Self {
            input_path,
            output_path,
        }
    }

    /// Input file name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.input_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input_path.display().to_string())
    }
}

/// Derives the target file name by swapping the extension for `.mp4`.
///
/// Only the last extension is replaced and its case does not matter:
/// `clip.MOV` → `clip.mp4`, `a.b.mov` → `a.b.mp4`.
#[must_use]
pub fn output_file_name(input_path: &Path) -> PathBuf {
    // Pushed rather than set_extension: "a.b" would otherwise lose ".b".
    let mut name = input_path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    PathBuf::from(name)
}

/// Result of attempting one job. Reported to the user, then dropped.
#[derive(Debug, Clone)]
pub enum ConversionOutcome {
    Converted {
        job: ConversionJob,
        elapsed: Duration,
        input_size: u64,
        output_size: u64,
    },
    Failed {
        job: ConversionJob,
        reason: String,
    },
}

impl ConversionOutcome {
    pub fn job(&self) -> &ConversionJob {
        match self {
            ConversionOutcome::Converted { job, .. } | ConversionOutcome::Failed { job, .. } => job,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Converted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_suffix_case_insensitively() {
        assert_eq!(output_file_name(Path::new("clip.MOV")), PathBuf::from("clip.mp4"));
        assert_eq!(output_file_name(Path::new("clip.mov")), PathBuf::from("clip.mp4"));
        assert_eq!(output_file_name(Path::new("/in/Clip.MoV")), PathBuf::from("Clip.mp4"));
    }

    #[test]
    fn keeps_inner_dots() {
        assert_eq!(output_file_name(Path::new("a.b.mov")), PathBuf::from("a.b.mp4"));
    }

    #[test]
    fn job_targets_output_dir() {
        let job = ConversionJob::for_input(PathBuf::from("/in/x.mov"), Path::new("/out"));
        assert_eq!(job.output_path, PathBuf::from("/out/x.mp4"));
        assert_eq!(job.display_name(), "x.mov");
    }

    #[test]
    fn differently_cased_sources_collide() {
        let out = Path::new("/out");
        let lower = ConversionJob::for_input(PathBuf::from("/in/a.mov"), out);
        let upper = ConversionJob::for_input(PathBuf::from("/in/a.MOV"), out);
        assert_eq!(lower.output_path, upper.output_path);
    }
}
