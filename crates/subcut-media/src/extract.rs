//! Audio extraction for the recognizer feed.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Default extraction target: the input path with an `.mp3` extension.
pub fn default_audio_output(input: impl AsRef<Path>) -> PathBuf {
    input.as_ref().with_extension("mp3")
}

/// Extract the input's audio as mono 16 kHz 16 kbit/s MP3.
///
/// This is the format the recognizer consumes; video streams are dropped.
pub async fn extract_audio(input: impl AsRef<Path>, output: impl AsRef<Path>) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    info!(
        input = %input.display(),
        output = %output.display(),
        "Extracting recognizer audio"
    );

    let cmd = FfmpegCommand::new(input, output)
        .no_video()
        .sample_rate(16000)
        .channels(1)
        .audio_bitrate("16k");

    FfmpegRunner::new().run(&cmd).await?;
    Ok(())
}
