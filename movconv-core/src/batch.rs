// ============================================================================
// movconv-core/src/batch.rs
// ============================================================================
//
// BATCH SCANNER: Driving the converter over a directory
//
// This module turns an input directory into conversion jobs and runs them in
// one of two modes:
//
// - Blocking: every job runs on the caller's thread and the first failure
//   aborts the rest of the batch.
// - Cancellable: jobs run one at a time (normally on the background worker);
//   a CancellationToken is checked before each job and failures are reported
//   per file while the loop moves on.
//
// Cancellation only takes effect between files. A file that has started is
// always allowed to finish (or fail) first.

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::converter::VideoConverter;
use crate::discovery::find_mov_files;
use crate::error::{CoreError, CoreResult};
use crate::job::{ConversionJob, ConversionOutcome};

// ---- External crate imports ----
use log::{debug, info, warn};

// ---- Standard library imports ----
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Instant;

// ============================================================================
// CANCELLATION
// ============================================================================

/// Cooperative stop request shared between the front end and the worker.
///
/// Clones share one flag. A new token is created for every run, so a stale
/// worker can never observe a later run's state.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// ============================================================================
// REPORTING TYPES
// ============================================================================

/// How a batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every job was attempted.
    Completed,
    /// The input directory held no `.mov` files.
    NothingToDo,
    /// The cancellation token was observed before the jobs ran out.
    Cancelled,
}

/// Summary of one batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub status: BatchStatus,
    pub outcomes: Vec<ConversionOutcome>,
}

impl BatchReport {
    pub fn nothing_to_do() -> Self {
        Self {
            status: BatchStatus::NothingToDo,
            outcomes: Vec::new(),
        }
    }

    pub fn converted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.converted_count()
    }

    pub fn was_cancelled(&self) -> bool {
        self.status == BatchStatus::Cancelled
    }
}

/// Progress messages from a cancellable batch.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    JobStarted(ConversionJob),
    JobConverted(ConversionOutcome),
    JobFailed(ConversionOutcome),
    Finished(BatchReport),
}

// ============================================================================
// PLANNING
// ============================================================================

/// Discovers `.mov` files in `config.input_dir` and builds one job per file.
///
/// An empty directory yields an empty plan rather than an error; a missing
/// directory fails with `CoreError::InputDirNotFound`.
pub fn plan_jobs(config: &CoreConfig) -> CoreResult<Vec<ConversionJob>> {
    let files = match find_mov_files(&config.input_dir) {
        Ok(files) => files,
        Err(CoreError::NoFilesFound) => Vec::new(),
        Err(e) => return Err(e),
    };

    Ok(files
        .into_iter()
        .map(|input| ConversionJob::for_input(input, &config.output_dir))
        .collect())
}

/// Creates the output directory when the configuration asks for it.
pub fn prepare_output_dir(config: &CoreConfig) -> CoreResult<()> {
    if config.create_output_dir && !config.output_dir.exists() {
        info!("Creating output directory {}", config.output_dir.display());
        fs::create_dir_all(&config.output_dir)?;
    }
    Ok(())
}

// ============================================================================
// EXECUTION
// ============================================================================

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Runs one job and measures it.
fn run_job<C: VideoConverter + ?Sized>(
    converter: &C,
    job: &ConversionJob,
) -> CoreResult<ConversionOutcome> {
    let start = Instant::now();
    converter.convert(job)?;
    Ok(ConversionOutcome::Converted {
        job: job.clone(),
        elapsed: start.elapsed(),
        input_size: file_size(&job.input_path),
        output_size: file_size(&job.output_path),
    })
}

/// Converts every `.mov` file in `config.input_dir` on the calling thread.
///
/// The first failing job aborts the batch and its error is returned; jobs
/// after it are not attempted.
pub fn run_blocking<C: VideoConverter + ?Sized>(
    converter: &C,
    config: &CoreConfig,
) -> CoreResult<BatchReport> {
    let jobs = plan_jobs(config)?;
    if jobs.is_empty() {
        info!("No .mov files found in {}", config.input_dir.display());
        return Ok(BatchReport::nothing_to_do());
    }

    prepare_output_dir(config)?;
    converter.preflight()?;

    let mut outcomes = Vec::with_capacity(jobs.len());
    for job in &jobs {
        info!(
            "Found .mov file: {}, starting conversion...",
            job.input_path.display()
        );
        outcomes.push(run_job(converter, job)?);
    }

    Ok(BatchReport {
        status: BatchStatus::Completed,
        outcomes,
    })
}

/// Converts `jobs` one at a time, honoring `token` between files.
///
/// Failed jobs are reported through `on_event` and the loop continues. The
/// final report is both returned and sent as `BatchEvent::Finished`.
pub fn run_cancellable<C, F>(
    converter: &C,
    jobs: &[ConversionJob],
    token: &CancellationToken,
    mut on_event: F,
) -> BatchReport
where
    C: VideoConverter + ?Sized,
    F: FnMut(BatchEvent),
{
    let mut outcomes = Vec::with_capacity(jobs.len());
    let mut status = if jobs.is_empty() {
        BatchStatus::NothingToDo
    } else {
        BatchStatus::Completed
    };

    for job in jobs {
        if token.is_cancelled() {
            info!("Stop requested, {} job(s) left unprocessed", jobs.len() - outcomes.len());
            status = BatchStatus::Cancelled;
            break;
        }

        debug!("Starting {}", job.input_path.display());
        on_event(BatchEvent::JobStarted(job.clone()));

        match run_job(converter, job) {
            Ok(outcome) => {
                outcomes.push(outcome.clone());
                on_event(BatchEvent::JobConverted(outcome));
            }
            Err(e) => {
                warn!("Continuing after failure on {}: {}", job.input_path.display(), e);
                let outcome = ConversionOutcome::Failed {
                    job: job.clone(),
                    reason: e.to_string(),
                };
                outcomes.push(outcome.clone());
                on_event(BatchEvent::JobFailed(outcome));
            }
        }
    }

    let report = BatchReport { status, outcomes };
    on_event(BatchEvent::Finished(report.clone()));
    report
}

/// Runs `run_cancellable` on a dedicated background thread.
///
/// `on_event` is called from the worker thread; front ends forward the events
/// into their own channel instead of touching UI state directly.
pub fn spawn_worker<C, F>(
    converter: Arc<C>,
    jobs: Vec<ConversionJob>,
    token: CancellationToken,
    on_event: F,
) -> CoreResult<JoinHandle<BatchReport>>
where
    C: VideoConverter + ?Sized + 'static,
    F: FnMut(BatchEvent) + Send + 'static,
{
    std::thread::Builder::new()
        .name("movconv-worker".to_string())
        .spawn(move || run_cancellable(converter.as_ref(), &jobs, &token, on_event))
        .map_err(|e| CoreError::Worker(format!("failed to start background worker: {e}")))
}
