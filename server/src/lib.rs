use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod codegen;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod store;

use codegen::CodeGenerator;
use config::AppConfig;
use store::LinkStore;

// ── Shared application state ───────────────────────────────────────────────

pub struct AppState {
    pub store: Arc<dyn LinkStore>,
    pub config: AppConfig,
    pub codes: CodeGenerator,
}

impl AppState {
    pub fn new(store: Arc<dyn LinkStore>, config: AppConfig) -> Self {
        let codes = CodeGenerator::new(config.code_length);
        Self {
            store,
            config,
            codes,
        }
    }
}

// ── Router ─────────────────────────────────────────────────────────────────

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::page::index))
        // Liveness probe, never touches the store
        .route("/healthz", get(|| async { StatusCode::OK }))
        .route(
            "/shorten",
            post(handlers::shorten::shorten).fallback(handlers::shorten::method_not_allowed),
        )
        .route("/list", get(handlers::list::list))
        // Short-code redirect; static routes above take priority
        .route("/:code", get(handlers::redirect::redirect))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
