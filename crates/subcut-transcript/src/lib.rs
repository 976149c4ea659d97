//! Subtitle parsing, transcript segmentation, and subtitle emission.
//!
//! This crate provides:
//! - An SRT parsing adapter that yields chronological speech spans
//! - The transcript segmenter (sentence split, character wrap, block
//!   grouping, timestamp redistribution)
//! - Incremental block writers for SRT and plain-text output
//! - Output format selection with a configurable multi-format policy

pub mod error;
pub mod output;
pub mod segmenter;
pub mod srt;
pub mod writer;

pub use error::{TranscriptError, TranscriptResult};
pub use output::{select_formats, FormatPolicy, OutputFormat};
pub use segmenter::{segment_text, segment_to_blocks, split_sentences, SegmenterConfig};
pub use srt::parse_srt;
pub use writer::{BlockWriter, PlainTextWriter, SrtWriter};
