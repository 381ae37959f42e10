use axum::{extract::State, http::StatusCode, response::Json};
use tracing::info;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Liveness check; does not touch the extraction pipeline.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: "doc-summary-assistant".to_string(),
        provider: "cohere".to_string(),
    })
}

/// Readiness check: the OCR engine must be callable.
pub async fn ready_handler(State(state): State<AppState>) -> StatusCode {
    if state.pipeline.ocr_available().await {
        info!("Readiness check passed");
        StatusCode::OK
    } else {
        info!("Readiness check failed - OCR engine unavailable");
        StatusCode::SERVICE_UNAVAILABLE
    }
}
