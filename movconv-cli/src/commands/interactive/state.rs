//! Start/stop state machine behind the interactive control surface.
//!
//! The state never performs I/O beyond planning a batch: every user-visible
//! consequence comes back as an [`Effect`] for the surface to carry out on the
//! foreground thread.

use movconv_core::terminal::NoticeKind;
use movconv_core::{
    BatchEvent, BatchReport, CancellationToken, ConversionJob, ConversionOutcome, CoreConfig,
    CoreError, VideoConverter, plan_jobs, prepare_output_dir,
};

use std::path::PathBuf;

/// Lifecycle of the single background batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Stopping,
}

/// Enablement of the two buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

/// The two editable directory fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Input,
    Output,
}

/// Something the surface has to do in response to a transition.
#[derive(Debug)]
pub enum Effect {
    /// Start the background worker on `jobs`, watching `token`.
    Launch {
        jobs: Vec<ConversionJob>,
        token: CancellationToken,
    },
    /// Show a modal notice.
    Notice {
        kind: NoticeKind,
        title: String,
        message: String,
    },
    /// Print a plain status line.
    Status(String),
}

fn notice(kind: NoticeKind, title: &str, message: impl Into<String>) -> Effect {
    Effect::Notice {
        kind,
        title: title.to_string(),
        message: message.into(),
    }
}

#[derive(Debug)]
pub struct ControlState {
    config: CoreConfig,
    run_state: RunState,
    token: Option<CancellationToken>,
    restart_pending: bool,
}

impl ControlState {
    pub fn new(config: CoreConfig) -> Self {
        Self {
            config,
            run_state: RunState::Idle,
            token: None,
            restart_pending: false,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn restart_pending(&self) -> bool {
        self.restart_pending
    }

    /// Start is clickable whenever no batch is actively running; Stop only
    /// while one is.
    pub fn controls(&self) -> Controls {
        Controls {
            start_enabled: self.run_state != RunState::Running,
            stop_enabled: self.run_state == RunState::Running,
        }
    }

    pub fn dir(&self, field: Field) -> &PathBuf {
        match field {
            Field::Input => &self.config.input_dir,
            Field::Output => &self.config.output_dir,
        }
    }

    /// Edits a directory field. Takes effect on the next start.
    pub fn set_dir(&mut self, field: Field, dir: PathBuf) -> Vec<Effect> {
        let label = match field {
            Field::Input => "Input",
            Field::Output => "Output",
        };
        let line = format!("{label} directory set to {}", dir.display());
        match field {
            Field::Input => self.config.input_dir = dir,
            Field::Output => self.config.output_dir = dir,
        }
        vec![Effect::Status(line)]
    }

    /// Start button.
    ///
    /// From `Idle` this validates the directories and launches a batch. From
    /// `Stopping` the request is remembered and honored once the old worker
    /// has finished, so two workers never overlap.
    pub fn request_start(&mut self, converter: &dyn VideoConverter) -> Vec<Effect> {
        match self.run_state {
            RunState::Running => vec![Effect::Status(
                "Start is disabled while a batch is running".to_string(),
            )],
            RunState::Stopping => {
                self.restart_pending = true;
                vec![Effect::Status(
                    "Start queued: waiting for the current file to finish".to_string(),
                )]
            }
            RunState::Idle => self.launch(converter),
        }
    }

    fn launch(&mut self, converter: &dyn VideoConverter) -> Vec<Effect> {
        let jobs = match plan_jobs(&self.config) {
            Ok(jobs) => jobs,
            Err(e @ (CoreError::InputDirNotFound(_) | CoreError::NotADirectory(_))) => {
                return vec![notice(NoticeKind::Error, "Invalid input directory", e.to_string())];
            }
            Err(e) => return vec![notice(NoticeKind::Error, "Error", e.to_string())],
        };

        if jobs.is_empty() {
            return vec![notice(
                NoticeKind::Info,
                "No files found",
                format!("No .mov files found in {}", self.config.input_dir.display()),
            )];
        }

        if let Err(e) = prepare_output_dir(&self.config) {
            return vec![notice(NoticeKind::Error, "Invalid output directory", e.to_string())];
        }
        if let Err(e) = converter.preflight() {
            return vec![notice(NoticeKind::Error, "Cannot start", e.to_string())];
        }

        let token = CancellationToken::new();
        self.token = Some(token.clone());
        self.run_state = RunState::Running;
        vec![
            Effect::Status(format!("Starting conversion of {} file(s)", jobs.len())),
            Effect::Launch { jobs, token },
        ]
    }

    /// Stop button. Signals the worker and returns immediately.
    pub fn request_stop(&mut self) -> Vec<Effect> {
        match self.run_state {
            RunState::Running => {
                if let Some(token) = &self.token {
                    token.cancel();
                }
                self.run_state = RunState::Stopping;
                vec![Effect::Status(
                    "Stopping after the current file finishes".to_string(),
                )]
            }
            RunState::Stopping | RunState::Idle => {
                vec![Effect::Status("Stop is disabled: no batch is running".to_string())]
            }
        }
    }

    /// The surface could not start the worker it was asked to launch.
    pub fn launch_failed(&mut self, error: &CoreError) -> Vec<Effect> {
        self.run_state = RunState::Idle;
        self.token = None;
        vec![notice(NoticeKind::Error, "Cannot start", error.to_string())]
    }

    /// Cancels any active batch, e.g. before quitting.
    pub fn cancel_active(&mut self) {
        if let Some(token) = &self.token {
            token.cancel();
        }
        self.restart_pending = false;
        if self.run_state == RunState::Running {
            self.run_state = RunState::Stopping;
        }
    }

    /// Applies an event forwarded from the background worker.
    pub fn on_worker_event(
        &mut self,
        event: BatchEvent,
        converter: &dyn VideoConverter,
    ) -> Vec<Effect> {
        match event {
            BatchEvent::JobStarted(job) => {
                vec![Effect::Status(format!("Converting {}...", job.display_name()))]
            }
            BatchEvent::JobConverted(outcome) => vec![Effect::Status(format!(
                "Video saved to {}",
                outcome.job().output_path.display()
            ))],
            BatchEvent::JobFailed(ConversionOutcome::Failed { job, reason }) => vec![notice(
                NoticeKind::Error,
                "Conversion failed",
                format!("{}: {}", job.display_name(), reason),
            )],
            BatchEvent::JobFailed(outcome) => vec![notice(
                NoticeKind::Error,
                "Conversion failed",
                outcome.job().display_name(),
            )],
            BatchEvent::Finished(report) => self.finish(&report, converter),
        }
    }

    fn finish(&mut self, report: &BatchReport, converter: &dyn VideoConverter) -> Vec<Effect> {
        // Stop during the last file leaves a Completed report behind.
        let stopped = self.run_state == RunState::Stopping || report.was_cancelled();
        self.run_state = RunState::Idle;
        self.token = None;

        let mut effects = if stopped {
            vec![Effect::Status(format!(
                "Stopped after {} file(s)",
                report.outcomes.len()
            ))]
        } else {
            vec![notice(
                NoticeKind::Completed,
                "Conversion complete",
                format!(
                    "{} converted, {} failed",
                    report.converted_count(),
                    report.failed_count()
                ),
            )]
        };

        if self.restart_pending {
            self.restart_pending = false;
            effects.extend(self.launch(converter));
        }
        effects
    }
}
