// src/handlers/generate.rs
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::generate::{GenerateRequest, GenerateResponse};
use crate::AppState;

pub fn generate_routes() -> Router {
    Router::new()
        .route("/generate/", post(generate_animation))
        .route("/generate", post(generate_animation))
}

/// POST /generate/ - render `{"prompt": "..."}` into a video
pub async fn generate_animation(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<GenerateResponse>)> {
    // A body that parses to nothing usable carries no prompt. Content-type and
    // body-size problems keep their own status.
    let prompt = match payload {
        Ok(Json(request)) => request.prompt,
        Err(JsonRejection::JsonDataError(e)) => {
            tracing::debug!(error = %e, "Unusable generate payload");
            None
        }
        Err(JsonRejection::JsonSyntaxError(e)) => {
            tracing::debug!(error = %e, "Malformed generate payload");
            None
        }
        Err(rejection) => return Err(AppError::Rejected(rejection)),
    };

    let response = state.animation.generate(prompt).await?;
    Ok((response.status_code(), Json(response)))
}
