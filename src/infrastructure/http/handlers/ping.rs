//! Health Handler

use axum::Json;
use chrono::Utc;

use crate::infrastructure::http::dto::HealthResponse;

/// 健康检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        service: "Vocalis TTS",
    })
}
