//! Transcript segmentation: sentence split, character wrap, block grouping,
//! and timestamp redistribution.

use tracing::warn;

use subcut_models::{SpeechSegment, SubtitleBlock};

/// Sentence-ending punctuation, half-width and full-width forms.
const SENTENCE_TERMINATORS: [char; 8] = ['.', '!', '?', ';', '。', '！', '？', '；'];

/// Limits for display blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Maximum characters per display line.
    pub max_line_len: usize,
    /// Maximum lines per block.
    pub max_lines: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_line_len: 42,
            max_lines: 2,
        }
    }
}

/// Split text into sentences at boundaries immediately following a
/// terminator. Fragments are whitespace-trimmed; empty fragments are
/// discarded.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if SENTENCE_TERMINATORS.contains(&ch) {
            push_trimmed(&mut sentences, &mut current);
        }
    }
    push_trimmed(&mut sentences, &mut current);

    sentences
}

fn push_trimmed(out: &mut Vec<String>, buf: &mut String) {
    let trimmed = buf.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
    buf.clear();
}

/// Wrap one sentence into lines of at most `max_line_len` characters.
///
/// This is a plain character-count wrap, not word-aware: splitting mid-word
/// is accepted behavior.
fn wrap_sentence(sentence: &str, max_line_len: usize) -> Vec<String> {
    let width = max_line_len.max(1);
    let mut lines = Vec::new();
    let mut buffer = String::new();
    let mut count = 0usize;

    for ch in sentence.chars() {
        buffer.push(ch);
        count += 1;
        if count >= width {
            lines.push(std::mem::take(&mut buffer));
            count = 0;
        }
    }
    if !buffer.is_empty() {
        lines.push(buffer);
    }

    lines
}

/// Split text into display blocks (each a group of lines).
///
/// Lines within a block always come from the same sentence; a block holds at
/// most `max_lines` of them.
pub fn segment_text(text: &str, config: &SegmenterConfig) -> Vec<Vec<String>> {
    let max_lines = config.max_lines.max(1);
    let mut blocks = Vec::new();

    for sentence in split_sentences(text) {
        let lines = wrap_sentence(&sentence, config.max_line_len);
        for chunk in lines.chunks(max_lines) {
            blocks.push(chunk.to_vec());
        }
    }

    blocks
}

/// Convert one recognized segment into timed subtitle blocks.
///
/// The segment's duration is divided evenly across its blocks: block `i` of
/// `n` gets `[start + i*d/n, start + (i+1)*d/n]`. This is a linear
/// approximation, not word-level alignment. Malformed segments (non-positive
/// duration or blank text) and segments that produce no blocks are skipped
/// entirely; no zero-duration block is ever emitted.
pub fn segment_to_blocks(segment: &SpeechSegment, config: &SegmenterConfig) -> Vec<SubtitleBlock> {
    if !segment.is_well_formed() {
        warn!(
            start = segment.start,
            end = segment.end,
            "Skipping malformed speech segment"
        );
        return Vec::new();
    }

    let line_groups = segment_text(&segment.text, config);
    if line_groups.is_empty() {
        return Vec::new();
    }

    let per_block = segment.duration() / line_groups.len() as f64;

    line_groups
        .into_iter()
        .enumerate()
        .map(|(i, lines)| SubtitleBlock {
            lines,
            start: segment.start + i as f64 * per_block,
            end: segment.start + (i + 1) as f64 * per_block,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_line_len: usize, max_lines: usize) -> SegmenterConfig {
        SegmenterConfig {
            max_line_len,
            max_lines,
        }
    }

    #[test]
    fn test_split_sentences_half_width() {
        assert_eq!(
            split_sentences("One. Two! Three? Four; five"),
            vec!["One.", "Two!", "Three?", "Four;", "five"]
        );
    }

    #[test]
    fn test_split_sentences_full_width() {
        assert_eq!(
            split_sentences("你好。世界！再见？好；完"),
            vec!["你好。", "世界！", "再见？", "好；", "完"]
        );
    }

    #[test]
    fn test_split_sentences_discards_empty_fragments() {
        assert_eq!(split_sentences("One.. Two."), vec!["One.", ".", "Two."]);
        assert_eq!(split_sentences("  . "), vec!["."]);
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_wrap_is_character_counted() {
        // Mid-word splits are accepted, not fixed up.
        assert_eq!(
            wrap_sentence("abcdefghij", 4),
            vec!["abcd", "efgh", "ij"]
        );
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        assert_eq!(wrap_sentence("你好世界啊", 2), vec!["你好", "世界", "啊"]);
    }

    #[test]
    fn test_blocks_never_mix_sentences() {
        let blocks = segment_text("Hi. Bye.", &config(42, 2));
        // Each sentence fits one line, and blocks never merge lines from two
        // different sentences even though max_lines is 2.
        assert_eq!(blocks, vec![vec!["Hi.".to_string()], vec!["Bye.".to_string()]]);
    }

    #[test]
    fn test_block_grouping_respects_max_lines() {
        let blocks = segment_text("abcdefghij", &config(3, 2));
        assert_eq!(
            blocks,
            vec![
                vec!["abc".to_string(), "def".to_string()],
                vec!["ghi".to_string(), "j".to_string()],
            ]
        );
    }

    #[test]
    fn test_segmentation_is_idempotent() {
        let cfg = config(5, 2);
        let first = segment_text("Hello there. How are you doing?", &cfg);
        let rejoined: String = first.iter().flatten().map(String::as_str).collect();
        let second = segment_text(&rejoined, &cfg);
        assert_eq!(first, second);
    }

    #[test]
    fn test_redistribution_divides_evenly() {
        let segment = SpeechSegment::new("abcdef", 10.0, 13.0);
        let blocks = segment_to_blocks(&segment, &config(2, 1));
        assert_eq!(blocks.len(), 3);
        assert!((blocks[0].start - 10.0).abs() < 1e-9);
        assert!((blocks[0].end - 11.0).abs() < 1e-9);
        assert!((blocks[1].start - 11.0).abs() < 1e-9);
        assert!((blocks[2].end - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_block_gets_full_range() {
        let segment = SpeechSegment::new("hi", 2.0, 4.0);
        let blocks = segment_to_blocks(&segment, &SegmenterConfig::default());
        assert_eq!(blocks.len(), 1);
        assert!((blocks[0].start - 2.0).abs() < 1e-9);
        assert!((blocks[0].end - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_segments_are_skipped() {
        let cfg = SegmenterConfig::default();
        assert!(segment_to_blocks(&SpeechSegment::new("  ", 0.0, 1.0), &cfg).is_empty());
        assert!(segment_to_blocks(&SpeechSegment::new("text", 1.0, 1.0), &cfg).is_empty());
        assert!(segment_to_blocks(&SpeechSegment::new("text", 2.0, 1.0), &cfg).is_empty());
    }

    #[test]
    fn test_zero_width_config_does_not_panic() {
        let blocks = segment_text("abc", &config(0, 0));
        assert_eq!(
            blocks,
            vec![
                vec!["a".to_string()],
                vec!["b".to_string()],
                vec!["c".to_string()]
            ]
        );
    }

    #[test]
    fn test_mixed_language_text() {
        let blocks = segment_text("Hello world. 你好世界。", &config(6, 2));
        assert_eq!(
            blocks,
            vec![
                vec!["Hello ".to_string(), "world.".to_string()],
                vec!["你好世界。".to_string()],
            ]
        );
    }
}
