use axum::{Json, response::IntoResponse};
use serde_json::json;

// Greeting payload kept for wire compatibility with existing gallery clients.
pub async fn greeting() -> impl IntoResponse {
    Json(json!({"Hello": "World"}))
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "inference-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
