//! Subcut CLI: subtitle-driven smart video cutting.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use subcut_models::EchoParams;
use subcut_transcript::{FormatPolicy, OutputFormat};
use subcut_worker::{
    run_cut, run_transcribe, CutRequest, TranscribeRequest, WorkerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "subcut")]
#[command(about = "Subtitle-based smart video cutter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cut a video down to its subtitled, non-silent ranges.
    Cut(CutArgs),
    /// Transcribe audio and emit display-ready subtitles.
    Transcribe(TranscribeArgs),
    /// Extract recognizer-ready audio from a video.
    ExtractAudio(ExtractArgs),
}

#[derive(Args, Debug)]
struct CutArgs {
    /// Source video file.
    input: PathBuf,

    /// Subtitle file (defaults to the input with an .srt extension).
    #[arg(short = 's', long = "srt")]
    srt: Option<PathBuf>,

    /// Output file (defaults to <stem>_cut.<ext>).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Spans shorter than this always merge into the previous group (seconds).
    #[arg(long = "min-duration")]
    min_duration: Option<f64>,

    /// Maximum gap between spans that still merges them (seconds).
    #[arg(long = "max-gap")]
    max_gap: Option<f64>,

    /// Margin added around each merged group (seconds).
    #[arg(long = "padding")]
    padding: Option<f64>,

    /// Silence detection threshold in dBFS.
    #[arg(long = "silence-db")]
    silence_db: Option<f64>,

    /// Minimum silence duration to report (seconds).
    #[arg(long = "min-silence")]
    min_silence: Option<f64>,

    /// Highpass filter frequency in Hz (0 = off).
    #[arg(long = "highpass")]
    highpass: Option<f64>,

    /// Lowpass filter frequency in Hz (0 = off).
    #[arg(long = "lowpass")]
    lowpass: Option<f64>,

    /// FFT denoise level (0 = off).
    #[arg(long = "afftdn")]
    afftdn: Option<f64>,

    /// Echo shaping as in:out:delay:decay ("none" or "0" = off).
    #[arg(long = "aecho")]
    aecho: Option<String>,

    /// Speech normalization expansion factor.
    #[arg(long = "speechnorm-e")]
    speechnorm_e: Option<f64>,

    /// Speech normalization peak target.
    #[arg(long = "speechnorm-p")]
    speechnorm_p: Option<f64>,
}

#[derive(Args, Debug)]
struct TranscribeArgs {
    /// Audio file to transcribe.
    audio: PathBuf,

    /// Output directory (defaults to the audio file's directory).
    #[arg(long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Recognizer model name.
    #[arg(long = "model")]
    model: Option<String>,

    /// Language hint ("auto" disables the hint).
    #[arg(long = "language")]
    language: Option<String>,

    /// Compute device (cpu, cuda, ...).
    #[arg(long = "device")]
    device: Option<String>,

    /// Comma-separated output formats (srt,txt).
    #[arg(long = "formats")]
    formats: Option<String>,

    /// Multi-format policy: all or first-match.
    #[arg(long = "format-policy")]
    format_policy: Option<String>,

    /// Maximum characters per subtitle line.
    #[arg(long = "max-line-len")]
    max_line_len: Option<usize>,

    /// Maximum lines per subtitle block.
    #[arg(long = "max-lines")]
    max_lines: Option<usize>,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Source video file.
    input: PathBuf,

    /// Output audio file (defaults to the input with an .mp3 extension).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .init();

    if let Err(err) = run(Cli::parse()).await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = WorkerConfig::from_env();

    match cli.command {
        Command::Cut(args) => {
            let config = apply_cut_overrides(config, &args)?;
            let request = CutRequest {
                input: args.input,
                subtitles: args.srt,
                output: args.output,
            };
            let outcome = run_cut(&request, &config, None).await?;
            info!(
                output = %outcome.output.display(),
                segments = outcome.kept_segments,
                kept_seconds = format!("{:.2}", outcome.kept_duration),
                source_seconds = format!("{:.2}", outcome.source_duration),
                "Cut complete"
            );
        }
        Command::Transcribe(args) => {
            let (config, formats) = apply_transcribe_overrides(config, &args)?;
            let request = TranscribeRequest {
                audio: args.audio,
                output_dir: args.output_dir,
                formats,
            };
            let outcome = run_transcribe(&request, &config).await?;
            for output in &outcome.outputs {
                info!(output = %output.display(), "Transcript written");
            }
            info!(
                segments = outcome.segments,
                blocks = outcome.blocks,
                "Transcription complete"
            );
        }
        Command::ExtractAudio(args) => {
            let output = args
                .output
                .unwrap_or_else(|| subcut_media::default_audio_output(&args.input));
            subcut_media::extract_audio(&args.input, &output).await?;
            info!(output = %output.display(), "Audio extracted");
        }
    }

    Ok(())
}

fn apply_cut_overrides(mut config: WorkerConfig, args: &CutArgs) -> Result<WorkerConfig> {
    if let Some(v) = args.min_duration {
        config.min_duration = v;
    }
    if let Some(v) = args.max_gap {
        config.max_gap = v;
    }
    if let Some(v) = args.padding {
        config.padding = v;
    }
    if let Some(v) = args.silence_db {
        config.silence_db = v;
    }
    if let Some(v) = args.min_silence {
        config.min_silence = v;
    }
    if let Some(v) = args.highpass {
        config.audio.highpass_hz = v.max(0.0);
    }
    if let Some(v) = args.lowpass {
        config.audio.lowpass_hz = v.max(0.0);
    }
    if let Some(v) = args.afftdn {
        config.audio.denoise_level = v.max(0.0);
    }
    if let Some(raw) = &args.aecho {
        config.audio.echo = parse_echo_flag(raw)?;
    }
    if let Some(v) = args.speechnorm_e {
        adjust_speechnorm(&mut config, |norm| norm.expansion = v);
    }
    if let Some(v) = args.speechnorm_p {
        adjust_speechnorm(&mut config, |norm| norm.peak = v);
    }
    Ok(config)
}

fn adjust_speechnorm(config: &mut WorkerConfig, apply: impl FnOnce(&mut subcut_models::SpeechNormParams)) {
    let mut norm = config.audio.speechnorm.unwrap_or(subcut_models::SpeechNormParams {
        expansion: 4.0,
        peak: 0.9,
    });
    apply(&mut norm);
    config.audio.speechnorm = Some(norm);
}

/// Parse the `--aecho` flag: `none` and `0` disable the stage.
fn parse_echo_flag(raw: &str) -> Result<Option<EchoParams>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") || trimmed == "0" {
        return Ok(None);
    }
    trimmed
        .parse::<EchoParams>()
        .map(Some)
        .map_err(|err| anyhow::anyhow!("invalid --aecho value: {err}"))
}

fn apply_transcribe_overrides(
    mut config: WorkerConfig,
    args: &TranscribeArgs,
) -> Result<(WorkerConfig, Option<Vec<OutputFormat>>)> {
    if let Some(model) = &args.model {
        config.recognizer.model = model.clone();
    }
    if let Some(language) = &args.language {
        config.recognizer.language = if language.eq_ignore_ascii_case("auto") {
            None
        } else {
            Some(language.clone())
        };
    }
    if let Some(device) = &args.device {
        config.recognizer.device = device.clone();
    }
    if let Some(policy) = &args.format_policy {
        config.format_policy = policy
            .parse::<FormatPolicy>()
            .map_err(|err| anyhow::anyhow!("invalid --format-policy: {err}"))?;
    }
    if let Some(v) = args.max_line_len {
        config.segmenter.max_line_len = v;
    }
    if let Some(v) = args.max_lines {
        config.segmenter.max_lines = v;
    }

    let formats = match &args.formats {
        Some(raw) => {
            let mut formats = Vec::new();
            for part in raw.split(',') {
                let format = part
                    .parse::<OutputFormat>()
                    .map_err(|err| anyhow::anyhow!("invalid --formats value: {err}"))?;
                formats.push(format);
            }
            Some(formats)
        }
        None => None,
    };

    Ok((config, formats))
}
