//! Terminal UI components and styling for movconv.
//!
//! This module provides consistent terminal output styling using a hierarchical
//! system with minimal symbols and consistent spacing. Everything is emitted
//! through `log::info!`, so the CLI's logger decides where it ends up.

use crate::batch::{BatchReport, BatchStatus};
use crate::job::ConversionOutcome;
use crate::utils::{format_bytes, format_duration};

use console::style;
use log::info;
use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};
use unicode_width::UnicodeWidthStr;

/// Represents the visual hierarchy levels in the CLI output
#[derive(Debug, Clone, Copy)]
pub enum OutputLevel {
    /// Subsections and major operations (» Operation)
    Subsection,
    /// Progress items and sub-operations
    Progress,
    /// Key-value status information
    Status,
}

impl OutputLevel {
    /// Get the indentation for this output level
    fn indent(&self) -> &'static str {
        match self {
            OutputLevel::Subsection => "  ",
            OutputLevel::Progress => "    ",
            OutputLevel::Status => "      ",
        }
    }
}

/// Kinds of modal notice shown by the interactive surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
    Completed,
}

static USE_COLOR: AtomicBool = AtomicBool::new(true);

/// Set whether to use color in terminal output
pub fn set_color(enable: bool) {
    USE_COLOR.store(enable, Ordering::Relaxed);
}

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    USE_COLOR.load(Ordering::Relaxed) && std::env::var_os("NO_COLOR").is_none()
}

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", title.to_uppercase().cyan());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
    info!("");
}

/// Print an item at the specified hierarchy level
pub fn print_item(level: OutputLevel, symbol: Option<&str>, text: &str, bold: bool) {
    let indent = level.indent();
    let prefix = symbol.map(|sym| format!("{sym} ")).unwrap_or_default();

    if should_use_color() && bold {
        info!("{indent}{prefix}{}", style(text).bold());
    } else {
        info!("{indent}{prefix}{text}");
    }
}

/// Print a subsection or processing step
pub fn print_processing(message: &str) {
    print_item(OutputLevel::Subsection, Some("»"), message, true);
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    print_item(OutputLevel::Subsection, None, title, true);
}

/// Print a sub-item under a processing step
pub fn print_sub_item(message: &str) {
    print_item(OutputLevel::Progress, None, message, false);
}

/// Print a success message
pub fn print_success(message: &str) {
    if should_use_color() {
        info!("  ✓ {}", message.green());
    } else {
        info!("  ✓ {message}");
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    if should_use_color() {
        info!("  ⚠ {}", message.yellow());
    } else {
        info!("  ⚠ {message}");
    }
}

/// Print a status line (key-value pair)
pub fn print_status(label: &str, value: &str, highlight: bool) {
    let label_width: usize = 15;
    let padding = label_width.saturating_sub(label.width()).max(1);
    let indent = OutputLevel::Status.indent();

    if should_use_color() && highlight {
        info!("{indent}{label}:{} {}", " ".repeat(padding), value.bold());
    } else {
        info!("{indent}{label}:{} {value}", " ".repeat(padding));
    }
}

/// Print an error heading with an optional hint.
///
/// The error text itself goes to stderr from `main`.
pub fn print_error(title: &str, suggestion: Option<&str>) {
    if should_use_color() {
        info!("✗ {}", title.red().bold());
    } else {
        info!("✗ {title}");
    }

    if let Some(suggestion_text) = suggestion {
        info!("");
        info!("  Suggestion: {suggestion_text}");
    }

    info!("");
}

/// Print a boxed, dialog-style notice.
pub fn print_notice(kind: NoticeKind, title: &str, message: &str) {
    let width = title.width().max(message.width()) + 4;
    let border = "─".repeat(width);
    let pad = |text: &str| " ".repeat(width.saturating_sub(text.width() + 1));

    let plain_heading = match kind {
        NoticeKind::Info => format!("ℹ {title}"),
        NoticeKind::Error => format!("✗ {title}"),
        NoticeKind::Completed => format!("✓ {title}"),
    };
    let heading_pad = pad(&plain_heading);
    let heading = if should_use_color() {
        match kind {
            NoticeKind::Info => plain_heading.cyan().to_string(),
            NoticeKind::Error => plain_heading.red().bold().to_string(),
            NoticeKind::Completed => plain_heading.green().to_string(),
        }
    } else {
        plain_heading
    };

    info!("┌{border}┐");
    info!("│ {heading}{heading_pad}│");
    info!("│ {message}{}│", pad(message));
    info!("└{border}┘");
}

/// Print the per-file table and totals for a finished batch.
pub fn print_batch_summary(report: &BatchReport) {
    if report.status == BatchStatus::NothingToDo {
        print_warning("Nothing to do: no .mov files found");
        return;
    }

    print_section("Summary");
    for outcome in &report.outcomes {
        match outcome {
            ConversionOutcome::Converted {
                job,
                elapsed,
                input_size,
                output_size,
            } => {
                print_subsection(&job.display_name());
                print_status("Output", &job.output_path.display().to_string(), false);
                print_status("Time", &format_duration(elapsed.as_secs_f64()), false);
                print_status("Input size", &format_bytes(*input_size), false);
                print_status("Output size", &format_bytes(*output_size), true);
            }
            ConversionOutcome::Failed { job, reason } => {
                print_subsection(&job.display_name());
                print_status("Failed", reason, true);
            }
        }
    }

    info!("");
    print_status("Converted", &report.converted_count().to_string(), true);
    if report.failed_count() > 0 {
        print_status("Failed", &report.failed_count().to_string(), true);
    }
    if report.was_cancelled() {
        print_warning("Batch stopped before all files were processed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_deepen_with_each_level() {
        assert_eq!(OutputLevel::Subsection.indent(), "  ");
        assert_eq!(OutputLevel::Progress.indent(), "    ");
        assert_eq!(OutputLevel::Status.indent(), "      ");
    }

    #[test]
    fn status_line_tolerates_long_labels() {
        // Labels wider than the column still get one space of padding.
        print_status("A label well past fifteen columns", "value", false);
        print_status("Input", "/tmp", true);
    }
}
