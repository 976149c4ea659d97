//! API routes.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    cancel_job, extract_audio, health, job_status, list_jobs, submit_cut, submit_transcribe,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/cut", post(submit_cut))
        .route("/transcribe", post(submit_transcribe))
        .route("/extract-audio", post(extract_audio))
        .route("/jobs", get(list_jobs))
        .route("/jobs/:job_id", get(job_status))
        .route("/jobs/:job_id", delete(cancel_job));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use subcut_worker::WorkerConfig;
    use tower::ServiceExt;

    fn test_router() -> Router {
        create_router(AppState::new(ApiConfig::default(), WorkerConfig::default()))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_job_returns_404() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/jobs/no-such-job")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cut_with_missing_input_returns_404() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/cut")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"input": "/nonexistent/video.mp4"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_jobs_list_is_ok() {
        let response = test_router()
            .oneshot(Request::builder().uri("/api/jobs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
