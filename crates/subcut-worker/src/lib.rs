//! Pipeline orchestration for subtitle-driven video trimming.
//!
//! This crate wires the pure cutting/segmentation cores to the external
//! collaborators: it runs the video path (subtitles -> keep-ranges -> cut
//! plan -> transcoder) and the transcript path (recognizer -> segmenter ->
//! subtitle files), and tracks both as cancelable background jobs.

pub mod config;
pub mod cut_job;
pub mod error;
pub mod jobs;
pub mod transcribe_job;

pub use config::{RecognizerConfig, WorkerConfig};
pub use cut_job::{run_cut, CutOutcome, CutRequest};
pub use error::{WorkerError, WorkerResult};
pub use jobs::JobRegistry;
pub use transcribe_job::{run_transcribe, TranscribeOutcome, TranscribeRequest};
