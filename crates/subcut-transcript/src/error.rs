//! Error types for transcript operations.

use thiserror::Error;

/// Result type for transcript operations.
pub type TranscriptResult<T> = Result<T, TranscriptError>;

/// Errors that can occur while parsing or emitting subtitles.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] subcut_models::TimestampError),

    #[error("writer is already closed")]
    WriterClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
