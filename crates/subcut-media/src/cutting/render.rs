//! Hand a finished cut plan to FFmpeg.

use std::path::Path;

use tracing::info;

use subcut_models::CutPlan;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::cutting::graph::build_filter_graph;
use crate::error::{MediaError, MediaResult};

/// Render a cut plan: trim and concatenate the keep-ranges of `input` into
/// `output`, applying the plan's audio chain once after concatenation.
///
/// The run is atomic: FFmpeg writes into a temporary sibling of `output`
/// which is persisted only on success, so a failed run leaves no partial
/// output behind.
pub async fn render_cut_plan(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    plan: &CutPlan,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let rendered = build_filter_graph(plan)
        .ok_or_else(|| MediaError::internal("cut plan contains no segments"))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        segments = plan.segment_count(),
        kept_seconds = format!("{:.2}", plan.total_duration()),
        "Rendering cut plan"
    );

    // Stage into the output's directory so the final persist is a rename,
    // and keep the extension so FFmpeg picks the right muxer.
    let parent = output.parent().filter(|p| !p.as_os_str().is_empty());
    let suffix = output
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut builder = tempfile::Builder::new();
    builder.prefix(".subcut-").suffix(&suffix);
    let staging = match parent {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };

    let cmd = FfmpegCommand::new(input, staging.path())
        .filter_complex(rendered.graph)
        .map(rendered.video_out)
        .map(rendered.audio_out);

    runner.run(&cmd).await?;

    staging
        .persist(output)
        .map_err(|err| MediaError::Io(err.error))?;

    info!(output = %output.display(), "Cut rendered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use subcut_models::AudioFilterConfig;

    #[tokio::test]
    async fn test_render_missing_input() {
        let plan = CutPlan::new(
            vec![subcut_models::Interval::new(0.0, 1.0)],
            AudioFilterConfig::off(),
        );
        let err = render_cut_plan(
            "/nonexistent/in.mp4",
            "/tmp/out.mp4",
            &plan,
            &FfmpegRunner::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_render_empty_plan() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        std::fs::write(&input, b"stub").unwrap();

        let plan = CutPlan::new(Vec::new(), AudioFilterConfig::off());
        let err = render_cut_plan(
            &input,
            dir.path().join("out.mp4"),
            &plan,
            &FfmpegRunner::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::Internal(_)));
    }
}
