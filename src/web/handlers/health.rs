//! Health check HTTP handler

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

use crate::web::{
    AppState,
    responses::{ApiResponse, HealthResponse, ok},
};

/// Health check endpoint
///
/// Reports healthy when the products collection can be loaded, otherwise
/// answers 503 with an unsuccessful envelope carrying the failure.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.products.get_all().await {
        Ok(_) => ok(HealthResponse::healthy()).into_response(),
        Err(e) => {
            warn!("Health check failed: {}", e);
            let body = ApiResponse {
                success: false,
                data: Some(HealthResponse::unhealthy()),
                error: Some(e.to_string()),
                timestamp: chrono::Utc::now(),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}
