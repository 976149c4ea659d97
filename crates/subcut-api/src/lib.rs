//! HTTP API for subtitle-driven video trimming jobs.
//!
//! The API is a thin shell over the worker crate: cut/transcribe requests
//! become registered background jobs whose status is polled by id; audio
//! extraction runs inline. The algorithmic pipeline lives elsewhere.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
