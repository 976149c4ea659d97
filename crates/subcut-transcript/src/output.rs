//! Output format selection for the transcript path.

use std::fmt;
use std::str::FromStr;

// Formats travel over the HTTP API and config as plain strings; FromStr and
// Display below are the single source of truth for those spellings.

/// Subtitle output formats the transcript path can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// SubRip subtitles.
    Srt,
    /// Plain text, one flattened line per block.
    Txt,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Srt => "srt",
            OutputFormat::Txt => "txt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srt" => Ok(OutputFormat::Srt),
            "txt" | "text" => Ok(OutputFormat::Txt),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// Policy for honoring a multi-format request.
///
/// The original tool could only pass one format to its recognizer CLI and
/// silently used the first requested one. Emission now happens in-process, so
/// `All` actually produces every requested format; `FirstMatch` is kept as a
/// compatibility mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatPolicy {
    /// Produce every requested format.
    #[default]
    All,
    /// Produce only the first requested format.
    FirstMatch,
}

impl FromStr for FormatPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FormatPolicy::All),
            "first-match" | "first_match" | "first" => Ok(FormatPolicy::FirstMatch),
            other => Err(format!("unknown format policy '{other}'")),
        }
    }
}

/// Apply a policy to a format request, deduplicating while preserving order.
pub fn select_formats(requested: &[OutputFormat], policy: FormatPolicy) -> Vec<OutputFormat> {
    let mut selected = Vec::new();
    for format in requested {
        if !selected.contains(format) {
            selected.push(*format);
        }
    }

    match policy {
        FormatPolicy::All => selected,
        FormatPolicy::FirstMatch => selected.into_iter().take(1).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("srt".parse::<OutputFormat>().unwrap(), OutputFormat::Srt);
        assert_eq!("TXT".parse::<OutputFormat>().unwrap(), OutputFormat::Txt);
        assert!("vtt".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("all".parse::<FormatPolicy>().unwrap(), FormatPolicy::All);
        assert_eq!(
            "first-match".parse::<FormatPolicy>().unwrap(),
            FormatPolicy::FirstMatch
        );
        assert!("some".parse::<FormatPolicy>().is_err());
    }

    #[test]
    fn test_select_all_dedups_preserving_order() {
        let selected = select_formats(
            &[OutputFormat::Txt, OutputFormat::Srt, OutputFormat::Txt],
            FormatPolicy::All,
        );
        assert_eq!(selected, vec![OutputFormat::Txt, OutputFormat::Srt]);
    }

    #[test]
    fn test_select_first_match() {
        let selected = select_formats(
            &[OutputFormat::Txt, OutputFormat::Srt],
            FormatPolicy::FirstMatch,
        );
        assert_eq!(selected, vec![OutputFormat::Txt]);
    }

    #[test]
    fn test_select_empty_request() {
        assert!(select_formats(&[], FormatPolicy::All).is_empty());
    }
}
