use axum::Json;
use shared_http::api::HealthResponse;

/// GET /health - Liveness probe, answered without touching storage
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "OK".to_string(),
    })
}
