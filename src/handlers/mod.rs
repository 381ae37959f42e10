pub mod health;
pub mod summarize;

pub use health::*;
pub use summarize::*;

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::middleware::logging_middleware;
use crate::state::AppState;

/// Builds the HTTP surface. When `frontend_dir` is given, unmatched paths are served from it.
pub fn create_router(state: AppState, max_body_bytes: usize, frontend_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/api/summarize", post(summarize_handler));

    let router = match frontend_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    };

    router.with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(DefaultBodyLimit::max(max_body_bytes))
            .layer(axum::middleware::from_fn(logging_middleware)),
    )
}
