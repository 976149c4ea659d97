//! Worker configuration.
//!
//! Every tunable is an explicit field handed into the entry points; nothing
//! reads process-global state after construction. Defaults mirror the
//! original tool's CLI defaults.

use subcut_models::AudioFilterConfig;
use subcut_transcript::{FormatPolicy, OutputFormat, SegmenterConfig};

/// External recognizer invocation settings.
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    /// Recognizer binary name or path.
    pub bin: String,
    /// Model name passed to the recognizer.
    pub model: String,
    /// Language hint; `None` lets the recognizer auto-detect.
    pub language: Option<String>,
    /// Compute device (`cpu`, `cuda`, ...).
    pub device: String,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            bin: "whisper".to_string(),
            model: "base".to_string(),
            language: Some("zh".to_string()),
            device: "cpu".to_string(),
        }
    }
}

/// Configuration for both pipeline paths.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Spans shorter than this always fold into the previous group (seconds).
    pub min_duration: f64,
    /// Maximum gap between spans that still merges them (seconds).
    pub max_gap: f64,
    /// Symmetric margin added around each merged group (seconds).
    pub padding: f64,
    /// Silence detection threshold in dBFS.
    pub silence_db: f64,
    /// Minimum silence duration before a range is reported (seconds).
    pub min_silence: f64,
    /// Audio chain applied after concatenation.
    pub audio: AudioFilterConfig,
    /// Display block limits for the transcript path.
    pub segmenter: SegmenterConfig,
    /// Formats the transcript path emits.
    pub formats: Vec<OutputFormat>,
    /// Policy for honoring multi-format requests.
    pub format_policy: FormatPolicy,
    /// Recognizer invocation settings.
    pub recognizer: RecognizerConfig,
    /// Optional per-job timeout for transcoder runs (seconds).
    pub job_timeout_secs: Option<u64>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            min_duration: 0.4,
            max_gap: 0.3,
            padding: 0.15,
            silence_db: -35.0,
            min_silence: 0.3,
            audio: AudioFilterConfig::default(),
            segmenter: SegmenterConfig::default(),
            formats: vec![OutputFormat::Srt],
            format_policy: FormatPolicy::All,
            recognizer: RecognizerConfig::default(),
            job_timeout_secs: None,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_duration: env_f64("SUBCUT_MIN_DURATION").unwrap_or(defaults.min_duration),
            max_gap: env_f64("SUBCUT_MAX_GAP").unwrap_or(defaults.max_gap),
            padding: env_f64("SUBCUT_PADDING").unwrap_or(defaults.padding),
            silence_db: env_f64("SUBCUT_SILENCE_DB").unwrap_or(defaults.silence_db),
            min_silence: env_f64("SUBCUT_MIN_SILENCE").unwrap_or(defaults.min_silence),
            audio: defaults.audio,
            segmenter: SegmenterConfig {
                max_line_len: env_usize("SUBCUT_MAX_LINE_LEN")
                    .unwrap_or(defaults.segmenter.max_line_len),
                max_lines: env_usize("SUBCUT_MAX_LINES").unwrap_or(defaults.segmenter.max_lines),
            },
            formats: std::env::var("SUBCUT_FORMATS")
                .ok()
                .map(|raw| {
                    raw.split(',')
                        .filter_map(|part| part.parse().ok())
                        .collect::<Vec<_>>()
                })
                .filter(|formats: &Vec<OutputFormat>| !formats.is_empty())
                .unwrap_or(defaults.formats),
            format_policy: std::env::var("SUBCUT_FORMAT_POLICY")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.format_policy),
            recognizer: RecognizerConfig {
                bin: std::env::var("SUBCUT_RECOGNIZER_BIN")
                    .unwrap_or(defaults.recognizer.bin),
                model: std::env::var("SUBCUT_RECOGNIZER_MODEL")
                    .unwrap_or(defaults.recognizer.model),
                language: std::env::var("SUBCUT_RECOGNIZER_LANGUAGE")
                    .ok()
                    .or(defaults.recognizer.language),
                device: std::env::var("SUBCUT_RECOGNIZER_DEVICE")
                    .unwrap_or(defaults.recognizer.device),
            },
            job_timeout_secs: env_u64("SUBCUT_JOB_TIMEOUT_SECS").or(defaults.job_timeout_secs),
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tool_defaults() {
        let config = WorkerConfig::default();
        assert!((config.min_duration - 0.4).abs() < f64::EPSILON);
        assert!((config.max_gap - 0.3).abs() < f64::EPSILON);
        assert!((config.padding - 0.15).abs() < f64::EPSILON);
        assert!((config.silence_db - -35.0).abs() < f64::EPSILON);
        assert!((config.min_silence - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.formats, vec![OutputFormat::Srt]);
        assert_eq!(config.format_policy, FormatPolicy::All);
        assert_eq!(config.recognizer.bin, "whisper");
    }
}
