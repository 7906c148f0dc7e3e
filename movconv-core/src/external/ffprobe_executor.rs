//! FFprobe integration for reading the source frame rate.
//!
//! The converter re-encodes at the source frame rate, so the only property
//! needed from ffprobe is the first video stream's rate.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Trait for anything that can report the frame rate of a video file.
pub trait FfprobeExecutor: Send + Sync {
    /// Returns the frame rate of the first video stream in frames per second.
    fn get_frame_rate(&self, input_path: &Path) -> CoreResult<f64>;
}

/// Production executor backed by the `ffprobe` crate.
#[derive(Debug, Clone, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl FfprobeExecutor for CrateFfprobeExecutor {
    fn get_frame_rate(&self, input_path: &Path) -> CoreResult<f64> {
        log::debug!(
            "Running ffprobe (via crate) for frame rate on: {}",
            input_path.display()
        );
        let metadata = ffprobe(input_path).map_err(|err| {
            log::error!("ffprobe failed on {}: {:?}", input_path.display(), err);
            map_ffprobe_error(err)
        })?;

        let video_stream = metadata
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| {
                CoreError::FfprobeParse(format!(
                    "No video stream found in {}",
                    input_path.display()
                ))
            })?;

        parse_frame_rate(&video_stream.r_frame_rate)
            .or_else(|| parse_frame_rate(&video_stream.avg_frame_rate))
            .ok_or_else(|| {
                CoreError::FfprobeParse(format!(
                    "Unreadable frame rate '{}' in {}",
                    video_stream.r_frame_rate,
                    input_path.display()
                ))
            })
    }
}

/// Parses an ffprobe rate such as "30000/1001", "25/1" or "29.97".
///
/// Returns `None` for unparsable, zero, or non-finite rates ("0/0" is what
/// ffprobe reports when it does not know).
#[must_use]
pub fn parse_frame_rate(frame_rate_str: &str) -> Option<f64> {
    let rate = match frame_rate_str.split_once('/') {
        Some((num, den)) => {
            let numerator: f64 = num.trim().parse().ok()?;
            let denominator: f64 = den.trim().parse().ok()?;
            if denominator == 0.0 {
                return None;
            }
            numerator / denominator
        }
        None => frame_rate_str.trim().parse().ok()?,
    };
    (rate.is_finite() && rate > 0.0).then_some(rate)
}

fn map_ffprobe_error(err: FfProbeError) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error("ffprobe", io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error("ffprobe", output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::FfprobeParse(format!("output deserialization: {err}"))
        }
        #[allow(unreachable_patterns)]
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error: {err:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fractional_and_decimal_rates() {
        assert_eq!(parse_frame_rate("25/1"), Some(25.0));
        assert_eq!(parse_frame_rate("30000/1001"), Some(30000.0 / 1001.0));
        assert_eq!(parse_frame_rate("29.97"), Some(29.97));
        assert_eq!(parse_frame_rate("60"), Some(60.0));
    }

    #[test]
    fn rejects_unknown_rates() {
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("30/0"), None);
        assert_eq!(parse_frame_rate("0"), None);
        assert_eq!(parse_frame_rate("invalid"), None);
        assert_eq!(parse_frame_rate(""), None);
    }
}
