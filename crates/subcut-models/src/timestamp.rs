//! Timestamp parsing and formatting utilities.
//!
//! The subtitle paths use the SRT `HH:MM:SS,mmm` form; logging uses a plain
//! `HH:MM:SS` form. Formatting truncates to whole milliseconds rather than
//! rounding: a block must never be stamped later than it actually starts.

use thiserror::Error;

/// Guard against seconds values that decimal inputs store a hair under a
/// unit boundary, e.g. 3725.004 -> 3725003.999... ms.
const MS_GUARD: f64 = 1e-6;

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimestampError {
    #[error("timestamp cannot be empty")]
    Empty,
    #[error("invalid timestamp format '{0}', expected HH:MM:SS,mmm")]
    InvalidFormat(String),
    #[error("invalid {component} value in '{value}'")]
    InvalidValue {
        component: &'static str,
        value: String,
    },
}

/// Format seconds into an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Truncates to whole milliseconds (no rounding), zero-padded to 2/2/2/3
/// digits. Negative inputs clamp to zero.
pub fn format_srt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0 + MS_GUARD) as u64;

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;
    let s = total_s % 60;
    let m = (total_s / 60) % 60;
    let h = total_s / 3600;

    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// Format seconds into a plain `HH:MM:SS` string for logs.
pub fn format_log_timestamp(seconds: f64) -> String {
    let total_s = (seconds.max(0.0) + MS_GUARD) as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total_s / 3600,
        (total_s / 60) % 60,
        total_s % 60
    )
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) into seconds.
///
/// The `.` millisecond separator is accepted alongside `,` since both occur
/// in the wild.
pub fn parse_srt_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    let (clock, millis) = ts
        .split_once(',')
        .or_else(|| ts.split_once('.'))
        .ok_or_else(|| TimestampError::InvalidFormat(ts.to_string()))?;

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() != 3 {
        return Err(TimestampError::InvalidFormat(ts.to_string()));
    }

    let hours: u64 = parse_component(parts[0], "hours")?;
    let minutes: u64 = parse_component(parts[1], "minutes")?;
    let seconds: u64 = parse_component(parts[2], "seconds")?;
    let millis: u64 = parse_component(millis, "milliseconds")?;

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64 + millis as f64 / 1000.0)
}

fn parse_component(value: &str, component: &'static str) -> Result<u64, TimestampError> {
    value.trim().parse().map_err(|_| TimestampError::InvalidValue {
        component,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_srt_timestamp() {
        assert_eq!(format_srt_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(3725.004), "01:02:05,004");
        assert_eq!(format_srt_timestamp(61.5), "00:01:01,500");
    }

    #[test]
    fn test_format_truncates_instead_of_rounding() {
        assert_eq!(format_srt_timestamp(1.9999), "00:00:01,999");
        assert_eq!(format_srt_timestamp(0.0006), "00:00:00,000");
    }

    #[test]
    fn test_format_clamps_negative() {
        assert_eq!(format_srt_timestamp(-1.0), "00:00:00,000");
    }

    #[test]
    fn test_format_log_timestamp() {
        assert_eq!(format_log_timestamp(0.0), "00:00:00");
        assert_eq!(format_log_timestamp(3661.9), "01:01:01");
    }

    #[test]
    fn test_parse_srt_timestamp() {
        assert!((parse_srt_timestamp("00:00:00,000").unwrap()).abs() < 1e-9);
        assert!((parse_srt_timestamp("01:02:05,004").unwrap() - 3725.004).abs() < 1e-9);
        assert!((parse_srt_timestamp("00:01:01.500").unwrap() - 61.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_round_trip() {
        for &secs in &[0.0, 0.25, 61.5, 3725.004, 35999.999] {
            let formatted = format_srt_timestamp(secs);
            let parsed = parse_srt_timestamp(&formatted).unwrap();
            assert!((parsed - secs).abs() < 0.001, "{secs} -> {formatted} -> {parsed}");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_srt_timestamp(""), Err(TimestampError::Empty));
        assert!(matches!(
            parse_srt_timestamp("00:00:00"),
            Err(TimestampError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_srt_timestamp("aa:00:00,000"),
            Err(TimestampError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_srt_timestamp("00:00,000"),
            Err(TimestampError::InvalidFormat(_))
        ));
    }
}
