//! SRT (SubRip) parsing adapter.
//!
//! Parsing is deliberately lenient: the timestamp line drives the state
//! machine, index lines and stray blank lines are ignored, and entries whose
//! duration is not positive are dropped before they reach the pipeline. File
//! order is preserved.

use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

use subcut_models::{parse_srt_timestamp, SpeechSegment};

fn timing_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{2}:\d{2}:\d{2}[,.]\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2}[,.]\d{3})")
            .expect("timing regex is valid")
    })
}

/// Parse SRT content into chronological speech spans.
///
/// Entries with `end <= start` or no text are dropped with a warning; that
/// enforcement belongs here so the interval pipeline never sees them.
pub fn parse_srt(content: &str) -> Vec<SpeechSegment> {
    let re = timing_line_regex();

    let mut segments = Vec::new();
    let mut current: Option<SpeechSegment> = None;

    for line in content.lines() {
        let line = line.trim_end_matches('\r');

        if let Some(caps) = re.captures(line) {
            flush(&mut segments, current.take());

            let start = parse_srt_timestamp(&caps[1]);
            let end = parse_srt_timestamp(&caps[2]);
            match (start, end) {
                (Ok(start), Ok(end)) => {
                    current = Some(SpeechSegment::new(String::new(), start, end));
                }
                _ => {
                    warn!(line, "Skipping subtitle entry with unparsable timing");
                    current = None;
                }
            }
            continue;
        }

        if let Some(entry) = current.as_mut() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                flush(&mut segments, current.take());
            } else {
                if !entry.text.is_empty() {
                    entry.text.push('\n');
                }
                entry.text.push_str(trimmed);
            }
        }
        // Lines outside an entry (indexes, headers, garbage) are ignored.
    }

    flush(&mut segments, current.take());
    segments
}

fn flush(segments: &mut Vec<SpeechSegment>, entry: Option<SpeechSegment>) {
    if let Some(entry) = entry {
        if entry.is_well_formed() {
            segments.push(entry);
        } else {
            warn!(
                start = entry.start,
                end = entry.end,
                "Dropping subtitle entry with non-positive duration or empty text"
            );
        }
    }
}
