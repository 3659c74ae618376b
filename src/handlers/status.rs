// src/handlers/status.rs
use axum::{extract::Extension, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppState;

pub fn status_routes() -> Router {
    Router::new().route("/api/status", get(api_status))
}

/// GET /api/status - liveness plus renderer availability
pub async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let renderer = state.animation.renderer();
    let available = renderer.check_available().await;
    let media = state.animation.media();

    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "renderer": {
            "program": renderer.program(),
            "available": available,
        },
        "media": {
            "root": media.media_root.display().to_string(),
            "url": media.media_url,
        },
    }))
}
