// lib.rs - HTTP service that renders text prompts into Manim animations
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::services::{AnimationService, SceneRenderer};

/// Shared state handed to every handler through an `Extension`.
pub struct AppState {
    pub config: AppConfig,
    pub animation: AnimationService,
}

impl AppState {
    pub fn new(config: AppConfig, renderer: Arc<dyn SceneRenderer>) -> Self {
        let animation = AnimationService::new(config.media.clone(), renderer);
        Self { config, animation }
    }
}

/// Full router with middleware, as served by the binary.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(handlers::generate::generate_routes())
        .merge(handlers::status::status_routes())
        .layer(axum::middleware::from_fn(middleware::logging::request_logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
