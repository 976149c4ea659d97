//! Worker error types.
//!
//! The taxonomy distinguishes inputs that were never there (`MissingInput`),
//! inputs that were fine but yielded nothing after filtering
//! (`NoUsableSegments`), and external tool failures, which are surfaced
//! verbatim. None of these are retried automatically or papered over with
//! substitute parameters; the caller decides what to do next.

use std::path::PathBuf;

use thiserror::Error;

use subcut_media::MediaError;
use subcut_transcript::TranscriptError;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("required input not found: {0}")]
    MissingInput(PathBuf),

    #[error("no usable segments left after filtering")]
    NoUsableSegments,

    #[error("recognizer failed: {0}")]
    RecognizerFailed(String),

    #[error("recognizer not found: {0}")]
    RecognizerNotFound(String),

    #[error("job failed: {0}")]
    JobFailed(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("media error: {0}")]
    Media(#[from] MediaError),

    #[error("transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl WorkerError {
    pub fn job_failed(msg: impl Into<String>) -> Self {
        Self::JobFailed(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn recognizer_failed(msg: impl Into<String>) -> Self {
        Self::RecognizerFailed(msg.into())
    }

    /// Whether the failure came from an external tool (transcoder or
    /// recognizer) rather than from this process or its inputs.
    pub fn is_external_tool_failure(&self) -> bool {
        match self {
            WorkerError::RecognizerFailed(_) | WorkerError::RecognizerNotFound(_) => true,
            WorkerError::Media(err) => err.is_external_tool_failure(),
            _ => false,
        }
    }

    /// Whether the run was cancelled by the caller.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WorkerError::Media(MediaError::Cancelled))
    }
}
