// ============================================================================
// movconv-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning and interacting with FFmpeg
// processes, plus the single command line movconv ever runs: a full re-encode
// of one `.mov` file into an `.mp4` at the source frame rate.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
// - build_convert_command / run_ffmpeg: the conversion command and its runner

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::path::Path;
use std::process::ExitStatus;

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
///
/// Spawners are shared with the background worker, hence `Send + Sync`.
pub trait FfmpegSpawner: Send + Sync {
    type Process: FfmpegProcess;
    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {}", e);
            CoreError::OperationFailed(format!("ffmpeg event stream unavailable: {e}"))
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0.wait().map_err(|e| command_start_error("ffmpeg (wait)", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg", e))
    }
}

// --- Conversion Command ---

/// Builds the re-encode command for one file.
///
/// Equivalent to
/// `ffmpeg -y -i <input> -c:v <video_codec> -c:a <audio_codec> -r <fps> <output>`.
/// `-y` makes reruns overwrite earlier outputs.
pub fn build_convert_command(
    input_path: &Path,
    output_path: &Path,
    video_codec: &str,
    audio_codec: &str,
    frame_rate: f64,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.arg("-y");
    cmd.arg("-i");
    cmd.arg(input_path);
    cmd.args(["-c:v", video_codec]);
    cmd.args(["-c:a", audio_codec]);
    cmd.arg("-r");
    cmd.arg(format_frame_rate(frame_rate));
    cmd.arg(output_path);
    cmd
}

/// Renders a rate without float noise: 25.0 → "25", 29.97002997 → "29.97003".
fn format_frame_rate(frame_rate: f64) -> String {
    let rendered = format!("{frame_rate:.5}");
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Spawns `cmd`, drains its events and checks the exit status.
///
/// ffmpeg error lines are collected so a failure carries what ffmpeg said.
pub fn run_ffmpeg<S: FfmpegSpawner>(spawner: &S, cmd: FfmpegCommand) -> CoreResult<()> {
    log::debug!("Running ffmpeg command: {:?}", cmd);

    let mut process = spawner.spawn(cmd)?;
    let mut error_lines: Vec<String> = Vec::new();

    process.handle_events(|event| {
        match event {
            FfmpegEvent::Error(message)
            | FfmpegEvent::Log(LogLevel::Error, message)
            | FfmpegEvent::Log(LogLevel::Fatal, message) => {
                log::debug!("ffmpeg: {}", message);
                error_lines.push(message);
            }
            FfmpegEvent::Log(_, message) => log::trace!("ffmpeg: {}", message),
            _ => {}
        }
        Ok(())
    })?;

    let status = process.wait()?;
    if !status.success() {
        return Err(command_failed_error("ffmpeg", status, error_lines.join("\n")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_rate_formatting_trims_zeros() {
        assert_eq!(format_frame_rate(25.0), "25");
        assert_eq!(format_frame_rate(23.976), "23.976");
        assert_eq!(format_frame_rate(30000.0 / 1001.0), "29.97003");
    }

    #[test]
    fn convert_command_argument_order() {
        let mut cmd = build_convert_command(
            Path::new("/in/clip.mov"),
            Path::new("/out/clip.mp4"),
            "libx264",
            "aac",
            25.0,
        );
        let args: Vec<_> = cmd.as_inner().get_args().collect();
        let expected = [
            "-y", "-i", "/in/clip.mov", "-c:v", "libx264", "-c:a", "aac", "-r", "25",
            "/out/clip.mp4",
        ];
        let tail = &args[args.len() - expected.len()..];
        assert_eq!(tail, expected.map(std::ffi::OsStr::new));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_reach_ffmpeg_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        use std::path::PathBuf;

        let input = PathBuf::from("/in").join(OsStr::from_bytes(b"clip\xff.mov"));
        let output = PathBuf::from("/out").join(OsStr::from_bytes(b"clip\xff.mp4"));
        let mut cmd = build_convert_command(&input, &output, "libx264", "aac", 30.0);

        let args: Vec<&OsStr> = cmd.as_inner().get_args().collect();
        let after_i = args.iter().position(|a| *a == OsStr::new("-i")).unwrap() + 1;
        assert_eq!(args[after_i], input.as_os_str());
        assert_eq!(*args.last().unwrap(), output.as_os_str());
    }
}
