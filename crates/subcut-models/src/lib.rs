//! Shared data models for the Subcut backend.
//!
//! This crate provides Serde-serializable types for:
//! - Time intervals and silence ranges over source media
//! - Audio post-filter configuration
//! - Speech segments and subtitle blocks
//! - Declarative cut plans handed to the media adapter
//! - Job identifiers and status snapshots for the service layer
//! - Timestamp parsing/formatting utilities

pub mod audio;
pub mod interval;
pub mod job;
pub mod plan;
pub mod segment;
pub mod timestamp;

// Re-export common types
pub use audio::{AudioFilterConfig, EchoParams, SpeechNormParams};
pub use interval::{Interval, SilenceRange};
pub use job::{JobId, JobKind, JobState, JobStatus};
pub use plan::CutPlan;
pub use segment::{SpeechSegment, SubtitleBlock};
pub use timestamp::{format_log_timestamp, format_srt_timestamp, parse_srt_timestamp, TimestampError};
