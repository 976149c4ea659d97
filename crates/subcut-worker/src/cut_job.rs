//! The video path: subtitles to a rendered, silence-trimmed cut.

use std::path::{Path, PathBuf};

use tokio::sync::watch;
use tracing::{info, warn};

use subcut_media::{
    apply_padding, detect_silence, drop_silenced, merge_short_spans, probe_duration,
    render_cut_plan, FfmpegRunner,
};
use subcut_models::{format_srt_timestamp, CutPlan, Interval};
use subcut_transcript::parse_srt;

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};

/// A request to cut one source video.
#[derive(Debug, Clone)]
pub struct CutRequest {
    /// Source video path.
    pub input: PathBuf,
    /// Subtitle file; defaults to the input with an `.srt` extension.
    pub subtitles: Option<PathBuf>,
    /// Output path; defaults to `<stem>_cut.<ext>` next to the input.
    pub output: Option<PathBuf>,
}

impl CutRequest {
    /// Create a request with default subtitle and output paths.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            subtitles: None,
            output: None,
        }
    }

    /// Resolved subtitle path.
    pub fn subtitles_path(&self) -> PathBuf {
        self.subtitles
            .clone()
            .unwrap_or_else(|| self.input.with_extension("srt"))
    }

    /// Resolved output path.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = self
                .input
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "output".to_string());
            let name = match self.input.extension() {
                Some(ext) => format!("{stem}_cut.{}", ext.to_string_lossy()),
                None => format!("{stem}_cut"),
            };
            self.input.with_file_name(name)
        })
    }
}

/// Result summary of a completed cut.
#[derive(Debug, Clone)]
pub struct CutOutcome {
    /// Rendered output path.
    pub output: PathBuf,
    /// Number of keep-ranges in the final plan.
    pub kept_segments: usize,
    /// Total kept duration in seconds.
    pub kept_duration: f64,
    /// Source media duration in seconds.
    pub source_duration: f64,
}

/// Run the full video path for one request.
///
/// Stages, in order: subtitle parse -> merge -> probe -> pad -> silence
/// detect -> silence filter -> plan -> render. Fails fast on missing inputs;
/// fails with `NoUsableSegments` when filtering leaves nothing to keep.
pub async fn run_cut(
    request: &CutRequest,
    config: &WorkerConfig,
    cancel: Option<watch::Receiver<bool>>,
) -> WorkerResult<CutOutcome> {
    let input = request.input.as_path();
    if !input.exists() {
        return Err(WorkerError::MissingInput(input.to_path_buf()));
    }

    let subtitles = request.subtitles_path();
    if !subtitles.exists() {
        return Err(WorkerError::MissingInput(subtitles));
    }

    let output = request.output_path();

    info!(
        input = %input.display(),
        subtitles = %subtitles.display(),
        output = %output.display(),
        "Starting subtitle-driven cut"
    );

    let spans = load_subtitle_spans(&subtitles).await?;
    info!(spans = spans.len(), "Parsed subtitle spans");
    if spans.is_empty() {
        warn!(subtitles = %subtitles.display(), "Subtitle file yielded no usable spans");
        return Err(WorkerError::NoUsableSegments);
    }

    let merged = merge_short_spans(&spans, config.min_duration, config.max_gap);
    info!(groups = merged.len(), "Merged short spans");

    let duration = probe_duration(input).await?;
    info!(
        duration = %subcut_models::format_log_timestamp(duration),
        "Probed media duration"
    );
    let padded = apply_padding(&merged, config.padding, duration);

    let silences = detect_silence(
        input,
        config.silence_db,
        config.min_silence,
        cancel.clone(),
    )
    .await?;
    info!(ranges = silences.len(), "Detected silence ranges");

    let kept = drop_silenced(&padded, &silences);
    if kept.is_empty() {
        warn!("Every keep-range fell inside detected silence");
        return Err(WorkerError::NoUsableSegments);
    }
    info!(kept = kept.len(), "Final keep-ranges");
    for span in &kept {
        tracing::debug!(
            from = %format_srt_timestamp(span.start),
            to = %format_srt_timestamp(span.end),
            "Keeping range"
        );
    }

    let plan = CutPlan::new(kept, config.audio.clone());
    let kept_segments = plan.segment_count();
    let kept_duration = plan.total_duration();

    let mut runner = FfmpegRunner::new();
    if let Some(cancel) = cancel {
        runner = runner.with_cancel(cancel);
    }
    if let Some(secs) = config.job_timeout_secs {
        runner = runner.with_timeout(secs);
    }

    render_cut_plan(input, &output, &plan, &runner).await?;

    Ok(CutOutcome {
        output,
        kept_segments,
        kept_duration,
        source_duration: duration,
    })
}

/// Read and parse the subtitle file into chronological intervals.
async fn load_subtitle_spans(path: &Path) -> WorkerResult<Vec<Interval>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(parse_srt(&content)
        .into_iter()
        .map(|segment| Interval::new(segment.start, segment.end))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_subtitle_path() {
        let request = CutRequest::new("/media/talk.mp4");
        assert_eq!(request.subtitles_path(), PathBuf::from("/media/talk.srt"));
    }

    #[test]
    fn test_default_output_path() {
        let request = CutRequest::new("/media/talk.mp4");
        assert_eq!(request.output_path(), PathBuf::from("/media/talk_cut.mp4"));
    }

    #[test]
    fn test_explicit_paths_win() {
        let request = CutRequest {
            input: PathBuf::from("/media/talk.mp4"),
            subtitles: Some(PathBuf::from("/subs/other.srt")),
            output: Some(PathBuf::from("/out/final.mkv")),
        };
        assert_eq!(request.subtitles_path(), PathBuf::from("/subs/other.srt"));
        assert_eq!(request.output_path(), PathBuf::from("/out/final.mkv"));
    }

    #[tokio::test]
    async fn test_missing_input_is_fatal() {
        let request = CutRequest::new("/nonexistent/talk.mp4");
        let err = run_cut(&request, &WorkerConfig::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::MissingInput(path) if path.ends_with("talk.mp4")));
    }

    #[tokio::test]
    async fn test_missing_subtitles_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("talk.mp4");
        std::fs::write(&input, b"stub").unwrap();

        let request = CutRequest::new(&input);
        let err = run_cut(&request, &WorkerConfig::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::MissingInput(path) if path.ends_with("talk.srt")));
    }

    #[tokio::test]
    async fn test_empty_subtitles_reports_no_usable_segments() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("talk.mp4");
        std::fs::write(&input, b"stub").unwrap();
        std::fs::write(dir.path().join("talk.srt"), b"").unwrap();

        let request = CutRequest::new(&input);
        let err = run_cut(&request, &WorkerConfig::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::NoUsableSegments));
    }
}
