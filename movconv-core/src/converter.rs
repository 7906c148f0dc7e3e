// ============================================================================
// movconv-core/src/converter.rs
// ============================================================================
//
// CONVERTER: One .mov file in, one .mp4 file out
//
// The converter checks the input path, asks ffprobe for the source frame
// rate, and has ffmpeg re-encode the whole file at that rate. It owns no
// codec logic of its own.
//
// Whatever fails inside the toolchain is logged with its cause and returned
// as the single `CoreError::ConversionFailed`; callers never see the detail.

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::discovery::has_mov_extension;
use crate::error::{CoreError, CoreResult};
use crate::external::{
    CrateFfprobeExecutor, FfmpegSpawner, FfprobeExecutor, SidecarSpawner, build_convert_command,
    check_dependencies, run_ffmpeg,
};
use crate::job::ConversionJob;

// ---- External crate imports ----
use log::{debug, error, info};

// ---- Standard library imports ----
use std::path::Path;

/// Anything that can carry out a `ConversionJob`.
///
/// The batch scanner only talks to this trait, so a converter can be shared
/// with the background worker and replaced in tests.
pub trait VideoConverter: Send + Sync {
    /// Checks that the converter can run at all (e.g. its tools are installed).
    fn preflight(&self) -> CoreResult<()> {
        Ok(())
    }

    /// Converts `job.input_path` into `job.output_path`, overwriting it.
    fn convert(&self, job: &ConversionJob) -> CoreResult<()>;
}

/// Checks the preconditions every conversion has, before any tool is run.
///
/// * missing input → `CoreError::NotFound`
/// * extension other than `.mov` (any case) → `CoreError::UnsupportedInput`
pub fn validate_input(input_path: &Path) -> CoreResult<()> {
    if !input_path.exists() {
        return Err(CoreError::NotFound(input_path.to_path_buf()));
    }
    if !has_mov_extension(input_path) {
        return Err(CoreError::UnsupportedInput(input_path.to_path_buf()));
    }
    Ok(())
}

/// The ffmpeg/ffprobe-backed converter.
///
/// Generic over the two executors so tests can inject mocks.
#[derive(Debug, Clone)]
pub struct FfmpegConverter<S: FfmpegSpawner, P: FfprobeExecutor> {
    spawner: S,
    ffprobe: P,
    video_codec: String,
    audio_codec: String,
}

impl FfmpegConverter<SidecarSpawner, CrateFfprobeExecutor> {
    /// Production converter using the codecs from `config`.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(
            SidecarSpawner,
            CrateFfprobeExecutor::new(),
            &config.video_codec,
            &config.audio_codec,
        )
    }
}

impl<S: FfmpegSpawner, P: FfprobeExecutor> FfmpegConverter<S, P> {
    pub fn new(spawner: S, ffprobe: P, video_codec: &str, audio_codec: &str) -> Self {
        Self {
            spawner,
            ffprobe,
            video_codec: video_codec.to_string(),
            audio_codec: audio_codec.to_string(),
        }
    }

    fn encode(&self, job: &ConversionJob) -> CoreResult<()> {
        let frame_rate = self.ffprobe.get_frame_rate(&job.input_path)?;
        debug!(
            "Source frame rate for {}: {:.3} fps",
            job.input_path.display(),
            frame_rate
        );

        let cmd = build_convert_command(
            &job.input_path,
            &job.output_path,
            &self.video_codec,
            &self.audio_codec,
            frame_rate,
        );
        run_ffmpeg(&self.spawner, cmd)
    }
}

impl<S: FfmpegSpawner, P: FfprobeExecutor> VideoConverter for FfmpegConverter<S, P> {
    fn preflight(&self) -> CoreResult<()> {
        check_dependencies()
    }

    fn convert(&self, job: &ConversionJob) -> CoreResult<()> {
        validate_input(&job.input_path)?;

        match self.encode(job) {
            Ok(()) => {
                info!("Video saved to {}", job.output_path.display());
                Ok(())
            }
            Err(e) => {
                error!(
                    "An error occurred while converting {} to {}: {}",
                    job.input_path.display(),
                    job.output_path.display(),
                    e
                );
                Err(CoreError::ConversionFailed(job.input_path.clone()))
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::external::mocks::{MockFfmpegSpawner, MockFfprobeExecutor};
    use ffmpeg_sidecar::event::FfmpegEvent;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn mock_converter(
        spawner: &MockFfmpegSpawner,
        ffprobe: &MockFfprobeExecutor,
    ) -> FfmpegConverter<MockFfmpegSpawner, MockFfprobeExecutor> {
        FfmpegConverter::new(spawner.clone(), ffprobe.clone(), "libx264", "aac")
    }

    fn job_in(dir: &Path, name: &str) -> ConversionJob {
        let input = dir.join(name);
        fs::write(&input, b"mov bytes").unwrap();
        ConversionJob::for_input(input, dir)
    }

    #[test]
    fn missing_input_fails_before_probing() {
        let spawner = MockFfmpegSpawner::new();
        let ffprobe = MockFfprobeExecutor::new();
        let converter = mock_converter(&spawner, &ffprobe);

        let job = ConversionJob::for_input(PathBuf::from("/surely/missing/clip.mov"), Path::new("/tmp"));
        let err = converter.convert(&job).unwrap_err();

        assert!(matches!(err, CoreError::NotFound(_)));
        assert!(ffprobe.get_received_calls().is_empty());
        assert!(spawner.get_received_calls().is_empty());
    }

    #[test]
    fn non_mov_input_is_unsupported() {
        let dir = tempdir().unwrap();
        let spawner = MockFfmpegSpawner::new();
        let ffprobe = MockFfprobeExecutor::new();
        let converter = mock_converter(&spawner, &ffprobe);

        for name in ["clip.mp4", "clip.mov.txt", "clip"] {
            let job = job_in(dir.path(), name);
            let err = converter.convert(&job).unwrap_err();
            assert!(matches!(err, CoreError::UnsupportedInput(_)), "{name}: {err:?}");
        }
        assert!(ffprobe.get_received_calls().is_empty());
        assert!(spawner.get_received_calls().is_empty());
    }

    #[test]
    fn uppercase_extension_is_accepted() {
        let dir = tempdir().unwrap();
        let spawner = MockFfmpegSpawner::new();
        let ffprobe = MockFfprobeExecutor::new();
        let job = job_in(dir.path(), "CLIP.MOV");
        ffprobe.expect_frame_rate(&job.input_path, 30.0);
        spawner.add_success_expectation("libx264", b"mp4");

        mock_converter(&spawner, &ffprobe).convert(&job).unwrap();
        assert_eq!(job.output_path.file_name().unwrap(), "CLIP.mp4");
        assert!(job.output_path.exists());
    }

    #[test]
    fn passes_codecs_and_source_frame_rate() {
        let dir = tempdir().unwrap();
        let spawner = MockFfmpegSpawner::new();
        let ffprobe = MockFfprobeExecutor::new();
        let job = job_in(dir.path(), "clip.mov");
        ffprobe.expect_frame_rate(&job.input_path, 23.976);
        spawner.add_success_expectation("libx264", b"mp4");

        mock_converter(&spawner, &ffprobe).convert(&job).unwrap();

        let calls = spawner.get_received_calls();
        assert_eq!(calls.len(), 1);
        let args = &calls[0];
        let after = |flag: &str| {
            let idx = args.iter().position(|a| a == flag).unwrap();
            args[idx + 1].clone()
        };
        assert!(args.contains(&"-y".to_string()));
        assert_eq!(after("-i"), job.input_path.to_string_lossy());
        assert_eq!(after("-c:v"), "libx264");
        assert_eq!(after("-c:a"), "aac");
        assert_eq!(after("-r"), "23.976");
        assert_eq!(args.last().unwrap(), &job.output_path.to_string_lossy().to_string());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_file_name_is_converted() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let input = dir.path().join(OsStr::from_bytes(b"clip\xff.mov"));
        fs::write(&input, b"mov bytes").unwrap();
        let job = ConversionJob::for_input(input, dir.path());
        let spawner = MockFfmpegSpawner::new();
        let ffprobe = MockFfprobeExecutor::new();
        ffprobe.expect_frame_rate(&job.input_path, 25.0);
        spawner.add_success_expectation("libx264", b"mp4");

        mock_converter(&spawner, &ffprobe).convert(&job).unwrap();

        assert_eq!(
            job.output_path,
            dir.path().join(OsStr::from_bytes(b"clip\xff.mp4"))
        );
        assert_eq!(fs::read(&job.output_path).unwrap(), b"mp4");
    }

    #[test]
    fn nonzero_exit_becomes_conversion_failed() {
        let dir = tempdir().unwrap();
        let spawner = MockFfmpegSpawner::new();
        let ffprobe = MockFfprobeExecutor::new();
        let job = job_in(dir.path(), "broken.mov");
        ffprobe.expect_frame_rate(&job.input_path, 25.0);
        spawner.add_exit_error_expectation(
            "libx264",
            vec![FfmpegEvent::Error("moov atom not found".to_string())],
            1,
        );

        let err = mock_converter(&spawner, &ffprobe).convert(&job).unwrap_err();
        match err {
            CoreError::ConversionFailed(path) => assert_eq!(path, job.input_path),
            other => panic!("Unexpected error type: {:?}", other),
        }
    }

    #[test]
    fn probe_failure_becomes_conversion_failed() {
        let dir = tempdir().unwrap();
        let spawner = MockFfmpegSpawner::new();
        let ffprobe = MockFfprobeExecutor::new();
        let job = job_in(dir.path(), "noise.mov");
        ffprobe.expect_failure(&job.input_path, "Invalid data found when processing input");

        let err = mock_converter(&spawner, &ffprobe).convert(&job).unwrap_err();
        assert!(matches!(err, CoreError::ConversionFailed(_)));
        assert!(spawner.get_received_calls().is_empty());
    }

    #[test]
    fn spawn_failure_becomes_conversion_failed() {
        let dir = tempdir().unwrap();
        let spawner = MockFfmpegSpawner::new();
        let ffprobe = MockFfprobeExecutor::new();
        let job = job_in(dir.path(), "clip.mov");
        ffprobe.expect_frame_rate(&job.input_path, 25.0);
        spawner.add_spawn_error_expectation(
            "libx264",
            CoreError::DependencyNotFound("ffmpeg".to_string()),
        );

        let err = mock_converter(&spawner, &ffprobe).convert(&job).unwrap_err();
        assert!(matches!(err, CoreError::ConversionFailed(_)));
    }

    #[test]
    fn rerun_overwrites_previous_output() {
        let dir = tempdir().unwrap();
        let spawner = MockFfmpegSpawner::new();
        let ffprobe = MockFfprobeExecutor::new();
        let job = job_in(dir.path(), "clip.mov");
        ffprobe.expect_frame_rate(&job.input_path, 25.0);
        spawner.add_success_expectation("libx264", b"first");
        spawner.add_success_expectation("libx264", b"second");
        let converter = mock_converter(&spawner, &ffprobe);

        converter.convert(&job).unwrap();
        assert_eq!(fs::read(&job.output_path).unwrap(), b"first");

        converter.convert(&job).unwrap();
        assert_eq!(fs::read(&job.output_path).unwrap(), b"second");
        assert_eq!(spawner.get_received_calls().len(), 2);
    }
}
