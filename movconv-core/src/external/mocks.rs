// movconv-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for this crate's own tests and, through the "test-mocks" feature,
// for downstream test suites. Shared state sits behind Arc<Mutex<..>> so the
// mocks can be moved onto the background worker like the real executors.

use super::{FfmpegProcess, FfmpegSpawner, FfprobeExecutor};
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::collections::HashMap;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Vec<FfmpegEvent>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events_to_emit.clone() {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    pub create_dummy_output: Option<Vec<u8>>,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Each spawn consumes the first expectation whose pattern appears in one of
/// the command arguments. An unexpected command panics.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Arc<Mutex<Vec<MockFfmpegExpectation>>>,
    received_calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        create_dummy_output: Option<Vec<u8>>,
    ) {
        self.expectations
            .lock()
            .unwrap()
            .push(MockFfmpegExpectation {
                arg_pattern: arg_pattern.to_string(),
                result,
                create_dummy_output,
            });
    }

    /// Expects a successful run that writes `output_contents` to the output path.
    pub fn add_success_expectation(&self, arg_pattern: &str, output_contents: &[u8]) {
        let process = MockFfmpegProcess {
            events_to_emit: Vec::new(),
            exit_status: ExitStatus::from_raw(0),
        };
        self.add_expectation(arg_pattern, Ok(process), Some(output_contents.to_vec()));
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), None);
    }

    /// Expects a run that emits `events` and exits with `exit_code`.
    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: events,
            // Raw wait status keeps the exit code in the second byte.
            exit_status: ExitStatus::from_raw(exit_code << 8),
        };
        self.add_expectation(arg_pattern, Ok(process), None);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.lock().unwrap().clone()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .as_inner()
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        let output_path: Option<PathBuf> = cmd.as_inner().get_args().last().map(PathBuf::from);
        self.received_calls.lock().unwrap().push(args.clone());

        let expectation = {
            let mut expectations = self.expectations.lock().unwrap();
            let found_index = expectations
                .iter()
                .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));
            match found_index {
                Some(index) => expectations.remove(index),
                None => panic!("MockFfmpegSpawner: No expectation found for command args: {:?}", args),
            }
        };
        log::info!(
            "MockFfmpegSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );

        if let (Ok(_), Some(contents)) = (&expectation.result, &expectation.create_dummy_output) {
            match &output_path {
                Some(path) => {
                    if let Err(e) = std::fs::write(path, contents) {
                        log::error!("MockFfmpegSpawner failed to write {:?}: {}", path, e);
                    }
                }
                None => log::warn!("MockFfmpegSpawner couldn't find output path in args."),
            }
        }
        expectation.result
    }
}

/// Mock implementation of FfprobeExecutor.
#[derive(Clone, Default)]
pub struct MockFfprobeExecutor {
    frame_rates: Arc<Mutex<HashMap<PathBuf, Result<f64, String>>>>,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the frame rate reported for `input_path`.
    pub fn expect_frame_rate(&self, input_path: &Path, frame_rate: f64) {
        self.frame_rates
            .lock()
            .unwrap()
            .insert(input_path.to_path_buf(), Ok(frame_rate));
    }

    /// Makes probing `input_path` fail with `message`.
    pub fn expect_failure(&self, input_path: &Path, message: &str) {
        self.frame_rates
            .lock()
            .unwrap()
            .insert(input_path.to_path_buf(), Err(message.to_string()));
    }

    pub fn get_received_calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn get_frame_rate(&self, input_path: &Path) -> CoreResult<f64> {
        self.calls.lock().unwrap().push(input_path.to_path_buf());
        match self.frame_rates.lock().unwrap().get(input_path) {
            Some(Ok(rate)) => Ok(*rate),
            Some(Err(message)) => Err(CoreError::FfprobeParse(message.clone())),
            None => Err(CoreError::FfprobeParse(format!(
                "MockFfprobeExecutor: No expectation set for path {}",
                input_path.display()
            ))),
        }
    }
}
