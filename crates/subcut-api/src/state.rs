//! Shared application state.

use std::sync::Arc;

use subcut_worker::{JobRegistry, WorkerConfig};

use crate::config::ApiConfig;

/// State shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Worker defaults applied to submitted jobs.
    pub worker: WorkerConfig,
    /// Background job registry.
    pub jobs: Arc<JobRegistry>,
}

impl AppState {
    /// Create application state from configuration.
    pub fn new(config: ApiConfig, worker: WorkerConfig) -> Self {
        Self {
            config,
            worker,
            jobs: JobRegistry::new(),
        }
    }
}
