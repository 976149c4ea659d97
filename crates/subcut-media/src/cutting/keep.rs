//! The pure keep-range pipeline: merge, pad, silence filter.
//!
//! All three passes are single left-to-right sweeps over chronologically
//! ordered intervals. Ordering is a caller-enforced precondition (subtitle
//! and recognizer sources are chronological) and is not re-verified here.

use subcut_models::{Interval, SilenceRange};

/// Collapse short or tightly-adjacent spans into continuous keep-ranges.
///
/// The first span always opens a group. Each subsequent span is folded into
/// the last group when its own duration is below `min_duration` OR its gap to
/// the group's end is at most `max_gap`; otherwise it opens a new group.
/// Folding never shrinks a group: a span fully inside an earlier one leaves
/// the group's end where it was. Merge decisions are never revisited.
pub fn merge_short_spans(intervals: &[Interval], min_duration: f64, max_gap: f64) -> Vec<Interval> {
    let mut merged: Vec<Interval> = Vec::new();

    for span in intervals {
        match merged.last_mut() {
            None => merged.push(*span),
            Some(group) => {
                let duration = span.end - span.start;
                let gap = span.start - group.end;

                // `<=` on the gap so exactly-touching spans always merge.
                if duration < min_duration || gap <= max_gap {
                    group.end = group.end.max(span.end);
                } else {
                    merged.push(*span);
                }
            }
        }
    }

    merged
}

/// Expand each keep-range by `padding` seconds on both sides, clamped to
/// `[0, media_duration]`.
///
/// Padding runs after merging on purpose: widening raw spans first would
/// manufacture extra merges. Each group is padded independently.
pub fn apply_padding(intervals: &[Interval], padding: f64, media_duration: f64) -> Vec<Interval> {
    intervals
        .iter()
        .map(|span| {
            Interval::new(
                (span.start - padding).max(0.0),
                (span.end + padding).min(media_duration),
            )
        })
        .collect()
}

/// Drop keep-ranges that lie entirely inside a detected silence range.
///
/// Partial overlap is not grounds for dropping: a range straddling speech and
/// a silence tail stays (padding intentionally reintroduces some silence at
/// the edges). Silence ranges arrive unsorted and possibly overlapping, so
/// each keep-range is checked against all of them.
pub fn drop_silenced(intervals: &[Interval], silences: &[SilenceRange]) -> Vec<Interval> {
    intervals
        .iter()
        .filter(|span| !silences.iter().any(|silence| silence.swallows(span)))
        .copied()
        .collect()
}
