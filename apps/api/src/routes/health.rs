use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /health, GET /api/health
/// Liveness probe with the current server time.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
    }))
}

/// GET /api/
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "AI Marketing Assistant API is running" }))
}
