//! The transcript path: recognizer output to subtitle files.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::Deserialize;
use tokio::process::Command;
use tracing::{info, warn};

use subcut_models::SpeechSegment;
use subcut_transcript::{
    segment_to_blocks, select_formats, BlockWriter, OutputFormat, PlainTextWriter, SrtWriter,
};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};

/// A request to transcribe one audio file into subtitles.
#[derive(Debug, Clone)]
pub struct TranscribeRequest {
    /// Audio file to transcribe.
    pub audio: PathBuf,
    /// Output directory; defaults to the audio file's directory.
    pub output_dir: Option<PathBuf>,
    /// Requested formats; defaults to the worker configuration.
    pub formats: Option<Vec<OutputFormat>>,
}

impl TranscribeRequest {
    /// Create a request with default output directory and formats.
    pub fn new(audio: impl Into<PathBuf>) -> Self {
        Self {
            audio: audio.into(),
            output_dir: None,
            formats: None,
        }
    }

    /// Resolved output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            self.audio
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }
}

/// Result summary of a completed transcription.
#[derive(Debug, Clone)]
pub struct TranscribeOutcome {
    /// Subtitle/text files written.
    pub outputs: Vec<PathBuf>,
    /// Recognized segments consumed (well-formed only).
    pub segments: usize,
    /// Subtitle blocks emitted per output file.
    pub blocks: usize,
}

/// Recognizer JSON output, reduced to the fields the segmenter consumes.
#[derive(Debug, Deserialize)]
struct RecognizerOutput {
    segments: Vec<RecognizerSegment>,
}

#[derive(Debug, Deserialize)]
struct RecognizerSegment {
    start: f64,
    end: f64,
    text: String,
}

/// Run the transcript path for one request.
///
/// The external recognizer is asked for JSON segments; subtitle emission
/// happens here, so every requested format can actually be produced (the
/// `FormatPolicy` decides whether it is).
pub async fn run_transcribe(
    request: &TranscribeRequest,
    config: &WorkerConfig,
) -> WorkerResult<TranscribeOutcome> {
    let audio = request.audio.as_path();
    if !audio.exists() {
        return Err(WorkerError::MissingInput(audio.to_path_buf()));
    }

    let out_dir = request.output_dir();
    tokio::fs::create_dir_all(&out_dir).await?;

    let segments = recognize(audio, &out_dir, config).await?;
    let well_formed: Vec<SpeechSegment> = segments
        .into_iter()
        .filter(|segment| {
            if segment.is_well_formed() {
                true
            } else {
                // Locally recovered: a bad segment never aborts the run.
                warn!(
                    start = segment.start,
                    end = segment.end,
                    "Skipping malformed recognizer segment"
                );
                false
            }
        })
        .collect();

    let blocks: Vec<_> = well_formed
        .iter()
        .flat_map(|segment| segment_to_blocks(segment, &config.segmenter))
        .collect();

    info!(
        segments = well_formed.len(),
        blocks = blocks.len(),
        "Segmented recognizer output"
    );

    let requested = request.formats.as_deref().unwrap_or(&config.formats);
    let formats = select_formats(requested, config.format_policy);
    if formats.len() < requested.len() {
        info!(
            requested = requested.len(),
            selected = formats.len(),
            "Format policy reduced the requested output formats"
        );
    }

    let stem = audio
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "transcript".to_string());

    let mut outputs = Vec::new();
    for format in formats {
        let path = out_dir.join(format!("{stem}.{}", format.extension()));
        write_blocks(&path, format, &blocks)?;
        info!(output = %path.display(), "Wrote transcript output");
        outputs.push(path);
    }

    Ok(TranscribeOutcome {
        outputs,
        segments: well_formed.len(),
        blocks: blocks.len(),
    })
}

/// Invoke the external recognizer and parse its JSON segment output.
async fn recognize(
    audio: &Path,
    out_dir: &Path,
    config: &WorkerConfig,
) -> WorkerResult<Vec<SpeechSegment>> {
    let recognizer = &config.recognizer;

    let mut cmd = Command::new(&recognizer.bin);
    cmd.arg(audio)
        .args(["--model", &recognizer.model])
        .args(["--device", &recognizer.device])
        .args(["--output_format", "json"])
        .arg("--output_dir")
        .arg(out_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(language) = &recognizer.language {
        cmd.args(["--language", language]);
    }

    info!(bin = %recognizer.bin, model = %recognizer.model, "Running recognizer");

    let output = cmd.output().await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            WorkerError::RecognizerNotFound(recognizer.bin.clone())
        } else {
            WorkerError::Io(err)
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WorkerError::recognizer_failed(format!(
            "{} exited with {:?}: {}",
            recognizer.bin,
            output.status.code(),
            stderr.trim()
        )));
    }

    let stem = audio
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "transcript".to_string());
    let json_path = out_dir.join(format!("{stem}.json"));
    let raw = tokio::fs::read(&json_path).await.map_err(|_| {
        WorkerError::recognizer_failed(format!(
            "recognizer reported success but left no output at {}",
            json_path.display()
        ))
    })?;

    let parsed = parse_recognizer_output(&raw)?;
    Ok(parsed)
}

/// Parse recognizer JSON into speech segments.
fn parse_recognizer_output(raw: &[u8]) -> WorkerResult<Vec<SpeechSegment>> {
    let output: RecognizerOutput = serde_json::from_slice(raw)?;
    Ok(output
        .segments
        .into_iter()
        .map(|segment| SpeechSegment::new(segment.text, segment.start, segment.end))
        .collect())
}

/// Write all blocks to one output file, flushing block by block.
fn write_blocks(
    path: &Path,
    format: OutputFormat,
    blocks: &[subcut_models::SubtitleBlock],
) -> WorkerResult<()> {
    let file = BufWriter::new(File::create(path)?);

    let mut writer: Box<dyn BlockWriter> = match format {
        OutputFormat::Srt => Box::new(SrtWriter::new(file)),
        OutputFormat::Txt => Box::new(PlainTextWriter::new(file)),
    };

    for block in blocks {
        writer.write_block(block)?;
    }
    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_defaults_to_audio_parent() {
        let request = TranscribeRequest::new("/media/talk.mp3");
        assert_eq!(request.output_dir(), PathBuf::from("/media"));
    }

    #[test]
    fn test_output_dir_defaults_to_cwd_for_bare_name() {
        let request = TranscribeRequest::new("talk.mp3");
        assert_eq!(request.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_parse_recognizer_output() {
        let raw = br#"{
            "text": "hello world",
            "language": "en",
            "segments": [
                {"id": 0, "seek": 0, "start": 0.0, "end": 2.5, "text": " hello", "temperature": 0.0},
                {"id": 1, "seek": 0, "start": 2.5, "end": 4.0, "text": " world"}
            ]
        }"#;
        let segments = parse_recognizer_output(raw).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, " hello");
        assert!((segments[1].end - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_recognizer_output_rejects_garbage() {
        assert!(parse_recognizer_output(b"not json").is_err());
    }

    #[tokio::test]
    async fn test_missing_audio_is_fatal() {
        let request = TranscribeRequest::new("/nonexistent/talk.mp3");
        let err = run_transcribe(&request, &WorkerConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::MissingInput(_)));
    }

    #[test]
    fn test_write_blocks_srt_and_txt() {
        let dir = tempfile::tempdir().unwrap();
        let blocks = vec![subcut_models::SubtitleBlock {
            lines: vec!["hello".to_string(), "world".to_string()],
            start: 0.0,
            end: 2.0,
        }];

        let srt_path = dir.path().join("t.srt");
        write_blocks(&srt_path, OutputFormat::Srt, &blocks).unwrap();
        let srt = std::fs::read_to_string(&srt_path).unwrap();
        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:02,000\nhello\nworld\n"));

        let txt_path = dir.path().join("t.txt");
        write_blocks(&txt_path, OutputFormat::Txt, &blocks).unwrap();
        assert_eq!(std::fs::read_to_string(&txt_path).unwrap(), "hello world\n");
    }
}
