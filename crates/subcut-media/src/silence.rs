//! Silence oracle: FFmpeg `silencedetect` pass and log parsing.
//!
//! FFmpeg reports detected silence on stderr as pairs of
//! `silence_start: <s>` / `silence_end: <s> | silence_duration: <s>` lines.
//! The parsed ranges are handed downstream exactly as reported: unsorted,
//! possibly overlapping.

use std::path::Path;

use tokio::sync::watch;
use tracing::debug;

use subcut_models::SilenceRange;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Run a silence-detection pass over the input's audio.
///
/// `noise_db` is the detection threshold in dBFS (e.g. -35.0); `min_silence`
/// is the minimum silence duration in seconds before a range is reported.
pub async fn detect_silence(
    input: impl AsRef<Path>,
    noise_db: f64,
    min_silence: f64,
    cancel: Option<watch::Receiver<bool>>,
) -> MediaResult<Vec<SilenceRange>> {
    let input = input.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    // silencedetect logs at info level; the null muxer discards the media.
    let cmd = FfmpegCommand::new(input, "-")
        .log_level("info")
        .audio_filter(format!("silencedetect=n={noise_db}dB:d={min_silence}"))
        .format("null");

    let mut runner = FfmpegRunner::new();
    if let Some(cancel) = cancel {
        runner = runner.with_cancel(cancel);
    }

    let stderr = runner.run(&cmd).await?;
    let silences = parse_silencedetect(&stderr);

    debug!(
        input = %input.display(),
        ranges = silences.len(),
        "Silence detection complete"
    );

    Ok(silences)
}

/// Parse `silencedetect` stderr output into silence ranges.
///
/// A `silence_end` without a preceding `silence_start` is dropped; a trailing
/// `silence_start` without an end (file ends in silence) is dropped as well,
/// matching the detector's pairing semantics.
pub fn parse_silencedetect(stderr: &str) -> Vec<SilenceRange> {
    let mut silences = Vec::new();
    let mut pending_start: Option<f64> = None;

    for line in stderr.lines() {
        if let Some(rest) = line.split("silence_start:").nth(1) {
            pending_start = first_float(rest);
        } else if let Some(rest) = line.split("silence_end:").nth(1) {
            if let (Some(start), Some(end)) = (pending_start.take(), first_float(rest)) {
                silences.push(SilenceRange::new(start, end));
            }
        }
    }

    silences
}

fn first_float(text: &str) -> Option<f64> {
    text.split_whitespace().next()?.parse().ok()
}
