//! Speech segments and subtitle blocks.

use serde::{Deserialize, Serialize};

/// A timed span of recognized speech produced by an external recognizer.
///
/// The text may contain multiple sentences; the segmenter is responsible for
/// splitting it into display-sized blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSegment {
    /// Recognized text.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl SpeechSegment {
    /// Create a new segment.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether this segment carries usable content: positive duration and
    /// non-empty text after trimming. Segments failing this are skipped, not
    /// fatal.
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start && !self.text.trim().is_empty()
    }
}

/// A display-sized chunk of subtitle text derived from one speech segment.
///
/// A block never spans two segments; its timestamps come from dividing the
/// parent segment's duration evenly across all blocks derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleBlock {
    /// Display lines, at most the configured maximum per block.
    pub lines: Vec<String>,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl SubtitleBlock {
    /// Block text as written to a subtitle file (lines joined with newlines).
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Block text as a single flattened line (line breaks replaced with one
    /// space), used for plain-text output.
    pub fn flattened(&self) -> String {
        self.lines.join(" ")
    }
}
