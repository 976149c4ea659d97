//! Request handlers.
//!
//! Cut and transcribe requests are validated, registered as background jobs,
//! and answered immediately with a job id; audio extraction is quick enough
//! to run inline. Media never travels through this API, only paths.

use std::path::PathBuf;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use subcut_models::{JobId, JobStatus};
use subcut_transcript::OutputFormat;
use subcut_worker::{CutRequest, TranscribeRequest};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Body for `POST /api/cut`.
#[derive(Debug, Deserialize)]
pub struct CutBody {
    /// Source video path on the server.
    pub input: PathBuf,
    /// Subtitle file; defaults to the input with an .srt extension.
    #[serde(default)]
    pub subtitles: Option<PathBuf>,
    /// Output path; defaults to <stem>_cut.<ext>.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// Response for job submissions.
#[derive(Debug, Serialize)]
pub struct JobAccepted {
    pub status: String,
    pub job_id: JobId,
}

/// Submit a subtitle-driven cut job.
pub async fn submit_cut(
    State(state): State<AppState>,
    Json(body): Json<CutBody>,
) -> ApiResult<Json<JobAccepted>> {
    let request = CutRequest {
        input: body.input,
        subtitles: body.subtitles,
        output: body.output,
    };

    // Missing inputs fail the request, not a job nobody will ever look at.
    if !request.input.exists() {
        return Err(ApiError::not_found(format!(
            "input not found: {}",
            request.input.display()
        )));
    }
    let subtitles = request.subtitles_path();
    if !subtitles.exists() {
        return Err(ApiError::not_found(format!(
            "subtitles not found: {}",
            subtitles.display()
        )));
    }

    let job_id = state.jobs.spawn_cut(request, state.worker.clone());
    Ok(Json(JobAccepted {
        status: "accepted".to_string(),
        job_id,
    }))
}

/// Body for `POST /api/transcribe`.
#[derive(Debug, Deserialize)]
pub struct TranscribeBody {
    /// Audio path on the server.
    pub audio: PathBuf,
    /// Output directory; defaults to the audio file's directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Comma-separated output formats (e.g. "srt,txt").
    #[serde(default)]
    pub formats: Option<String>,
}

/// Submit a transcription job.
pub async fn submit_transcribe(
    State(state): State<AppState>,
    Json(body): Json<TranscribeBody>,
) -> ApiResult<Json<JobAccepted>> {
    if !body.audio.exists() {
        return Err(ApiError::not_found(format!(
            "audio not found: {}",
            body.audio.display()
        )));
    }

    let formats = match &body.formats {
        Some(raw) => {
            let mut formats = Vec::new();
            for part in raw.split(',') {
                let format: OutputFormat = part
                    .parse()
                    .map_err(|err: String| ApiError::bad_request(err))?;
                formats.push(format);
            }
            Some(formats)
        }
        None => None,
    };

    let request = TranscribeRequest {
        audio: body.audio,
        output_dir: body.output_dir,
        formats,
    };

    let job_id = state.jobs.spawn_transcribe(request, state.worker.clone());
    Ok(Json(JobAccepted {
        status: "accepted".to_string(),
        job_id,
    }))
}

/// Body for `POST /api/extract-audio`.
#[derive(Debug, Deserialize)]
pub struct ExtractBody {
    /// Source video path on the server.
    pub input: PathBuf,
    /// Output audio path; defaults to the input with an .mp3 extension.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// Response for inline audio extraction.
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub status: String,
    pub output_path: PathBuf,
}

/// Extract recognizer-ready audio, waiting for completion.
pub async fn extract_audio(
    State(_state): State<AppState>,
    Json(body): Json<ExtractBody>,
) -> ApiResult<Json<ExtractResponse>> {
    let output = body
        .output
        .unwrap_or_else(|| subcut_media::default_audio_output(&body.input));

    subcut_media::extract_audio(&body.input, &output).await?;

    Ok(Json(ExtractResponse {
        status: "success".to_string(),
        output_path: output,
    }))
}

/// Get a job's status.
pub async fn job_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<JobStatus>> {
    let id = JobId::from_string(id);
    state
        .jobs
        .status(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("unknown job: {id}")))
}

/// List all jobs, newest first.
pub async fn list_jobs(State(state): State<AppState>) -> Json<Vec<JobStatus>> {
    Json(state.jobs.list())
}

/// Cancel a job.
pub async fn cancel_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = JobId::from_string(id);

    if state.jobs.status(&id).is_none() {
        return Err(ApiError::not_found(format!("unknown job: {id}")));
    }

    let cancelled = state.jobs.cancel(&id);
    Ok(Json(serde_json::json!({
        "status": if cancelled { "cancelling" } else { "already_finished" },
        "job_id": id,
    })))
}
