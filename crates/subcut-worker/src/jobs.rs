//! In-memory registry of background jobs.
//!
//! Every spawned job hands back a `JobId` immediately; its status stays
//! queryable and the job stays cancelable until it reaches a terminal state.
//! This replaces fire-and-forget process launching: a hosting service can
//! observe failure instead of losing it to the console.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::watch;
use tracing::{error, info};

use subcut_models::{JobId, JobKind, JobState, JobStatus};

use crate::config::WorkerConfig;
use crate::cut_job::{run_cut, CutRequest};
use crate::error::WorkerError;
use crate::transcribe_job::{run_transcribe, TranscribeRequest};

struct JobEntry {
    status: JobStatus,
    cancel_tx: watch::Sender<bool>,
}

/// Registry of background jobs for one process.
///
/// Job state is held in memory only; history does not survive a restart.
#[derive(Default)]
pub struct JobRegistry {
    jobs: Mutex<HashMap<JobId, JobEntry>>,
}

impl JobRegistry {
    /// Create an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Spawn a subtitle-driven cut job.
    pub fn spawn_cut(self: &Arc<Self>, request: CutRequest, config: WorkerConfig) -> JobId {
        self.spawn(JobKind::Cut, move |cancel| async move {
            run_cut(&request, &config, Some(cancel))
                .await
                .map(|outcome| vec![outcome.output])
        })
    }

    /// Spawn a transcription job.
    pub fn spawn_transcribe(
        self: &Arc<Self>,
        request: TranscribeRequest,
        config: WorkerConfig,
    ) -> JobId {
        self.spawn(JobKind::Transcribe, move |_cancel| async move {
            run_transcribe(&request, &config)
                .await
                .map(|outcome| outcome.outputs)
        })
    }

    /// Spawn a job from a future factory and register it.
    fn spawn<F, Fut>(self: &Arc<Self>, kind: JobKind, work: F) -> JobId
    where
        F: FnOnce(watch::Receiver<bool>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Vec<PathBuf>, WorkerError>> + Send + 'static,
    {
        let id = JobId::new();
        let (cancel_tx, cancel_rx) = watch::channel(false);

        {
            let mut jobs = self.jobs.lock().expect("job registry lock poisoned");
            jobs.insert(
                id.clone(),
                JobEntry {
                    status: JobStatus::queued(id.clone(), kind),
                    cancel_tx,
                },
            );
        }

        let registry = Arc::clone(self);
        let job_id = id.clone();
        tokio::spawn(async move {
            registry.update(&job_id, |status| status.state = JobState::Running);
            info!(job_id = %job_id, operation = kind.as_str(), "Job started");

            match work(cancel_rx).await {
                Ok(outputs) => {
                    info!(job_id = %job_id, operation = kind.as_str(), "Job completed");
                    registry.update(&job_id, |status| {
                        status.state = JobState::Completed;
                        status.outputs = outputs;
                        status.finished_at = Some(Utc::now());
                    });
                }
                Err(err) if err.is_cancelled() => {
                    info!(job_id = %job_id, operation = kind.as_str(), "Job cancelled");
                    registry.update(&job_id, |status| {
                        status.state = JobState::Cancelled;
                        status.finished_at = Some(Utc::now());
                    });
                }
                Err(err) => {
                    error!(job_id = %job_id, operation = kind.as_str(), error = %err, "Job failed");
                    registry.update(&job_id, |status| {
                        status.state = JobState::Failed;
                        status.error = Some(err.to_string());
                        status.finished_at = Some(Utc::now());
                    });
                }
            }
        });

        id
    }

    /// Snapshot a job's status.
    pub fn status(&self, id: &JobId) -> Option<JobStatus> {
        let jobs = self.jobs.lock().expect("job registry lock poisoned");
        jobs.get(id).map(|entry| entry.status.clone())
    }

    /// Request cancellation of a job.
    ///
    /// Returns `false` for unknown jobs and jobs already in a terminal state.
    /// Cancellation is cooperative: the job observes the signal at its next
    /// cancelable stage (the transcoder runs check it).
    pub fn cancel(&self, id: &JobId) -> bool {
        let jobs = self.jobs.lock().expect("job registry lock poisoned");
        match jobs.get(id) {
            Some(entry) if !entry.status.state.is_terminal() => {
                // send_replace does not care whether the job still holds its
                // receiver; jobs observe the flag at their next cancelable
                // stage.
                entry.cancel_tx.send_replace(true);
                true
            }
            _ => false,
        }
    }

    /// Snapshot all job statuses, newest first.
    pub fn list(&self) -> Vec<JobStatus> {
        let jobs = self.jobs.lock().expect("job registry lock poisoned");
        let mut statuses: Vec<JobStatus> =
            jobs.values().map(|entry| entry.status.clone()).collect();
        statuses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        statuses
    }

    fn update(&self, id: &JobId, apply: impl FnOnce(&mut JobStatus)) {
        let mut jobs = self.jobs.lock().expect("job registry lock poisoned");
        if let Some(entry) = jobs.get_mut(id) {
            apply(&mut entry.status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn wait_for_terminal(registry: &JobRegistry, id: &JobId) -> JobStatus {
        for _ in 0..100 {
            if let Some(status) = registry.status(id) {
                if status.state.is_terminal() {
                    return status;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("job never reached a terminal state");
    }

    #[tokio::test]
    async fn test_failed_job_reports_error() {
        let registry = JobRegistry::new();
        // A cut of a nonexistent file fails fast with MissingInput.
        let id = registry.spawn_cut(
            CutRequest::new("/nonexistent/video.mp4"),
            WorkerConfig::default(),
        );

        let status = wait_for_terminal(&registry, &id).await;
        assert_eq!(status.state, JobState::Failed);
        assert!(status.error.unwrap().contains("not found"));
        assert!(status.finished_at.is_some());
    }

    #[tokio::test]
    async fn test_unknown_job_status_is_none() {
        let registry = JobRegistry::new();
        assert!(registry.status(&JobId::new()).is_none());
        assert!(!registry.cancel(&JobId::new()));
    }

    #[tokio::test]
    async fn test_terminal_job_cannot_be_cancelled() {
        let registry = JobRegistry::new();
        let id = registry.spawn_cut(
            CutRequest::new("/nonexistent/video.mp4"),
            WorkerConfig::default(),
        );
        wait_for_terminal(&registry, &id).await;
        assert!(!registry.cancel(&id));
    }

    #[tokio::test]
    async fn test_list_contains_spawned_jobs() {
        let registry = JobRegistry::new();
        let id = registry.spawn_cut(
            CutRequest::new("/nonexistent/video.mp4"),
            WorkerConfig::default(),
        );
        wait_for_terminal(&registry, &id).await;
        assert!(registry.list().iter().any(|status| status.id == id));
    }
}
