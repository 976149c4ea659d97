//! Declarative cut plans.
//!
//! A cut plan is pure data: the ordered keep-ranges that survived filtering
//! plus one audio chain description. Only the media adapter knows how to turn
//! a plan into transcoder arguments, so the algorithmic pipeline never touches
//! any external tool's calling convention.

use serde::{Deserialize, Serialize};

use crate::audio::AudioFilterConfig;
use crate::interval::Interval;

/// An ordered trim-and-concatenate plan for one source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPlan {
    /// Keep-ranges in output order (chronological source order).
    pub keeps: Vec<Interval>,
    /// Audio chain applied once to the concatenated audio.
    pub audio: AudioFilterConfig,
}

impl CutPlan {
    /// Create a new cut plan.
    pub fn new(keeps: Vec<Interval>, audio: AudioFilterConfig) -> Self {
        Self { keeps, audio }
    }

    /// Number of keep-ranges.
    pub fn segment_count(&self) -> usize {
        self.keeps.len()
    }

    /// Whether the plan contains no keep-ranges.
    pub fn is_empty(&self) -> bool {
        self.keeps.is_empty()
    }

    /// Total duration of all keep-ranges in seconds.
    pub fn total_duration(&self) -> f64 {
        self.keeps.iter().map(Interval::duration).sum()
    }
}
