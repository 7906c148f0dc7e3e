//! Foreground event loop of the interactive control surface.
//!
//! The stdin reader thread and the background worker both feed one channel.
//! Only this loop touches [`ControlState`] or prints, so worker progress never
//! races with user commands.

use super::picker::pick_directory;
use super::state::{ControlState, Controls, Effect, Field, RunState};
use crate::error::{CliErrorContext, CliResult};

use movconv_core::{BatchEvent, BatchReport, VideoConverter, spawn_worker, terminal};

use log::{debug, info, warn};
use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;

/// Everything the foreground loop reacts to.
#[derive(Debug)]
pub enum SurfaceEvent {
    /// One line typed by the user.
    Line(String),
    /// Stdin reached end of file.
    InputClosed,
    /// Forwarded from the background worker.
    Worker(BatchEvent),
}

/// A parsed user command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    SetDir(Field, PathBuf),
    Browse(Field),
    Start,
    Stop,
    Status,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

fn parse_field(word: &str) -> Option<Field> {
    match word {
        "input" | "in" => Some(Field::Input),
        "output" | "out" => Some(Field::Output),
        _ => None,
    }
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "start" => Command::Start,
        "stop" => Command::Stop,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "browse" => match parse_field(rest) {
            Some(field) => Command::Browse(field),
            None => Command::Invalid("usage: browse input|output".to_string()),
        },
        name @ ("input" | "in" | "output" | "out") => {
            let field = match parse_field(name) {
                Some(field) => field,
                None => return Command::Invalid(format!("unknown command: {word}")),
            };
            if rest.is_empty() {
                Command::Invalid(format!("usage: {name} <directory>"))
            } else {
                Command::SetDir(field, PathBuf::from(rest))
            }
        }
        _ => Command::Invalid(format!("unknown command: {word}")),
    }
}

/// Forwards stdin lines into the surface channel on a detached thread.
pub fn spawn_stdin_reader(tx: Sender<SurfaceEvent>) -> CliResult<()> {
    std::thread::Builder::new()
        .name("movconv-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(SurfaceEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {e}");
                        break;
                    }
                }
            }
            let _ = tx.send(SurfaceEvent::InputClosed);
        })
        .cli_context("Failed to start stdin reader")?;
    Ok(())
}

fn describe_controls(controls: Controls) -> String {
    let flag = |enabled: bool| if enabled { "enabled" } else { "disabled" };
    format!(
        "Start {}, Stop {}",
        flag(controls.start_enabled),
        flag(controls.stop_enabled)
    )
}

fn print_help() {
    terminal::print_subsection("Commands");
    terminal::print_sub_item("input <dir>      set the input directory");
    terminal::print_sub_item("output <dir>     set the output directory");
    terminal::print_sub_item("browse input     pick the input directory");
    terminal::print_sub_item("browse output    pick the output directory");
    terminal::print_sub_item("start            convert every .mov file in the input directory");
    terminal::print_sub_item("stop             stop after the current file");
    terminal::print_sub_item("status           show directories and controls");
    terminal::print_sub_item("quit             stop and exit");
}

pub struct InteractiveSurface {
    state: ControlState,
    converter: Arc<dyn VideoConverter>,
    tx: Sender<SurfaceEvent>,
    rx: Receiver<SurfaceEvent>,
    worker: Option<JoinHandle<BatchReport>>,
    backlog: VecDeque<SurfaceEvent>,
}

impl InteractiveSurface {
    pub fn new(
        state: ControlState,
        converter: Arc<dyn VideoConverter>,
        tx: Sender<SurfaceEvent>,
        rx: Receiver<SurfaceEvent>,
    ) -> Self {
        Self {
            state,
            converter,
            tx,
            rx,
            worker: None,
            backlog: VecDeque::new(),
        }
    }

    /// Processes events until the user quits or stdin closes.
    pub fn run(mut self) -> CliResult<()> {
        terminal::print_section("Interactive conversion");
        self.print_status();
        print_help();

        loop {
            let event = match self.backlog.pop_front() {
                Some(event) => event,
                None => match self.rx.recv() {
                    Ok(event) => event,
                    Err(_) => break,
                },
            };

            match event {
                SurfaceEvent::Line(line) => {
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                SurfaceEvent::InputClosed => {
                    debug!("Stdin closed");
                    break;
                }
                SurfaceEvent::Worker(event) => self.handle_worker_event(event),
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Returns `false` once the loop should end.
    fn handle_line(&mut self, line: &str) -> bool {
        match parse_command(line) {
            Command::Empty => {}
            Command::Quit => return false,
            Command::Help => print_help(),
            Command::Status => self.print_status(),
            Command::Invalid(message) => terminal::print_warning(&message),
            Command::SetDir(field, dir) => {
                let effects = self.state.set_dir(field, dir);
                self.apply(effects);
            }
            Command::Browse(field) => self.browse(field),
            Command::Start => {
                let effects = self.state.request_start(self.converter.as_ref());
                self.apply(effects);
                self.print_controls();
            }
            Command::Stop => {
                let effects = self.state.request_stop();
                self.apply(effects);
                self.print_controls();
            }
        }
        true
    }

    fn handle_worker_event(&mut self, event: BatchEvent) {
        let finished = matches!(event, BatchEvent::Finished(_));
        if finished {
            // The worker returns right after sending Finished.
            if let Some(handle) = self.worker.take() {
                if handle.join().is_err() {
                    warn!("Background worker panicked");
                }
            }
        }

        let effects = self
            .state
            .on_worker_event(event, self.converter.as_ref());
        self.apply(effects);

        if finished {
            self.print_controls();
        }
    }

    /// Worker events that arrive while the picker owns stdin are queued and
    /// handled once it returns.
    fn browse(&mut self, field: Field) {
        let start = self.state.dir(field).clone();
        let rx = &self.rx;
        let backlog = &mut self.backlog;

        let picked = pick_directory(&start, || {
            loop {
                match rx.recv() {
                    Ok(SurfaceEvent::Line(line)) => return Some(line),
                    Ok(SurfaceEvent::InputClosed) => {
                        backlog.push_back(SurfaceEvent::InputClosed);
                        return None;
                    }
                    Ok(other) => backlog.push_back(other),
                    Err(_) => return None,
                }
            }
        });

        match picked {
            Some(dir) => {
                let effects = self.state.set_dir(field, dir);
                self.apply(effects);
            }
            None => terminal::print_sub_item("Selection cancelled"),
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Status(line) => terminal::print_processing(&line),
                Effect::Notice {
                    kind,
                    title,
                    message,
                } => terminal::print_notice(kind, &title, &message),
                Effect::Launch { jobs, token } => {
                    let tx = self.tx.clone();
                    let spawned = spawn_worker(
                        Arc::clone(&self.converter),
                        jobs,
                        token,
                        move |event| {
                            let _ = tx.send(SurfaceEvent::Worker(event));
                        },
                    );
                    match spawned {
                        Ok(handle) => self.worker = Some(handle),
                        Err(e) => {
                            let effects = self.state.launch_failed(&e);
                            self.apply(effects);
                        }
                    }
                }
            }
        }
    }

    fn print_controls(&self) {
        terminal::print_status("Controls", &describe_controls(self.state.controls()), false);
    }

    fn print_status(&self) {
        let state = match self.state.run_state() {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Stopping => "stopping",
        };
        terminal::print_status(
            "Input",
            &self.state.dir(Field::Input).display().to_string(),
            false,
        );
        terminal::print_status(
            "Output",
            &self.state.dir(Field::Output).display().to_string(),
            false,
        );
        terminal::print_status("State", state, self.state.run_state() != RunState::Idle);
        self.print_controls();
    }

    fn shutdown(&mut self) {
        self.state.cancel_active();
        if let Some(handle) = self.worker.take() {
            info!("Waiting for the current file to finish...");
            match handle.join() {
                Ok(report) => debug!(
                    "Worker stopped after {} of its jobs",
                    report.outcomes.len()
                ),
                Err(_) => warn!("Background worker panicked"),
            }
        }
    }
}
