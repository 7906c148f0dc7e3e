//! Implementation of the `batch` subcommand.
//!
//! One blocking pass over the input directory. The first failing file aborts
//! the run and the error is returned to `main`, which exits non-zero.

use crate::cli::BatchArgs;
use crate::error::CliResult;
use crate::logging::get_timestamp;

use movconv_core::{BatchStatus, FfmpegConverter, VideoConverter, run_blocking, terminal};

use log::debug;
use std::time::Instant;

/// Runs the batch command with the production converter.
pub fn run_batch(args: BatchArgs) -> CliResult<()> {
    let config = args.to_core_config()?;
    let converter = FfmpegConverter::from_config(&config);
    run_batch_with(&converter, &config)
}

/// Runs the batch command against any converter.
pub fn run_batch_with<C: VideoConverter + ?Sized>(
    converter: &C,
    config: &movconv_core::CoreConfig,
) -> CliResult<()> {
    let total_start_time = Instant::now();

    terminal::print_section("Batch conversion");
    terminal::print_status("Input", &config.input_dir.display().to_string(), false);
    terminal::print_status("Output", &config.output_dir.display().to_string(), false);
    terminal::print_status("Video codec", &config.video_codec, false);
    debug!("Run started: {}", get_timestamp());

    let report = run_blocking(converter, config)?;

    terminal::print_batch_summary(&report);
    match report.status {
        BatchStatus::NothingToDo => {}
        BatchStatus::Completed | BatchStatus::Cancelled => {
            terminal::print_success(&format!(
                "Conversion complete: {} file(s) in {}",
                report.converted_count(),
                movconv_core::format_duration(total_start_time.elapsed().as_secs_f64())
            ));
        }
    }

    debug!("Run finished: {}", get_timestamp());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use movconv_core::{ConversionJob, CoreConfig, CoreError, CoreResult};
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct CountingConverter {
        calls: AtomicUsize,
    }

    impl VideoConverter for CountingConverter {
        fn convert(&self, job: &ConversionJob) -> CoreResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            fs::write(&job.output_path, b"mp4")?;
            Ok(())
        }
    }

    #[test]
    fn converts_directory_and_ignores_other_files() {
        let root = tempdir().unwrap();
        let config = CoreConfig::from_root(root.path());
        fs::create_dir(&config.input_dir).unwrap();
        fs::create_dir(&config.output_dir).unwrap();
        for name in ["x.mov", "y.mov", "notes.txt"] {
            fs::write(config.input_dir.join(name), b"").unwrap();
        }
        let converter = CountingConverter {
            calls: AtomicUsize::new(0),
        };

        run_batch_with(&converter, &config).unwrap();

        assert_eq!(converter.calls.load(Ordering::SeqCst), 2);
        assert!(config.output_dir.join("x.mp4").exists());
        assert!(config.output_dir.join("y.mp4").exists());
        assert!(!config.output_dir.join("notes.mp4").exists());
    }

    #[test]
    fn missing_input_dir_is_an_error() {
        let root = tempdir().unwrap();
        let config = CoreConfig::from_root(root.path());
        let converter = CountingConverter {
            calls: AtomicUsize::new(0),
        };

        let err = run_batch_with(&converter, &config).unwrap_err();
        assert!(matches!(err, CoreError::InputDirNotFound(_)));
    }
}
