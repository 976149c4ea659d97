//! FFmpeg CLI adapter for video processing.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with cancellation and timeout
//! - The media duration oracle (ffprobe)
//! - The silence oracle (`silencedetect` stderr parsing)
//! - Audio extraction for the recognizer feed
//! - The pure keep-range pipeline (merge, pad, silence filter) and the
//!   cut-plan renderer that hands a finished plan to FFmpeg

pub mod command;
pub mod cutting;
pub mod error;
pub mod extract;
pub mod probe;
pub mod silence;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use cutting::graph::{build_audio_chain, build_filter_graph, FilterGraph};
pub use cutting::keep::{apply_padding, drop_silenced, merge_short_spans};
pub use cutting::render::render_cut_plan;
pub use error::{MediaError, MediaResult};
pub use extract::{default_audio_output, extract_audio};
pub use probe::probe_duration;
pub use silence::detect_silence;
