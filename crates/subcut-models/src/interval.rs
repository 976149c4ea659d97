//! Time intervals over source media.

use serde::{Deserialize, Serialize};

/// A time range of source media, in seconds.
///
/// Invariant: `end > start >= 0`. Sequences of intervals coming from subtitle
/// or recognizer sources are chronological; the adapters that produce them are
/// responsible for dropping entries that violate the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl Interval {
    /// Create a new interval.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration of this interval in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// An externally detected non-speech range, in seconds.
///
/// Ranges come straight from the silence oracle: they are not sorted and may
/// overlap each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilenceRange {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl SilenceRange {
    /// Create a new silence range.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Whether `interval` lies entirely inside this range (inclusive bounds).
    ///
    /// Partial overlap does not count: an interval straddling speech and a
    /// silence tail is still worth keeping.
    pub fn swallows(&self, interval: &Interval) -> bool {
        interval.start >= self.start && interval.end <= self.end
    }
}
