//! Route definitions and router construction.
//!
//! Handlers delegate to the core log services held in [`AxumContext`].

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build all API routes without `/api` prefix (for nesting under /api).
///
/// The arbitrary-path endpoints are only mounted when `file_logs` is set.
pub(crate) fn api_routes(with_file_logs: bool) -> Router<AppState> {
    let router = Router::new()
        // Apps API
        .route("/apps", get(handlers::apps::list))
        .route("/apps/{name}/logs/{stream}", get(handlers::logs::app_page))
        .route(
            "/apps/{name}/logs/{stream}/stream",
            get(handlers::logs::app_stream),
        );

    if with_file_logs {
        router
            .route("/logs/page", get(handlers::logs::file_page))
            .route("/logs/stream", get(handlers::logs::file_stream))
    } else {
        router
    }
}

/// Create the main Axum router with all API routes.
///
/// # Path Parameter Syntax
/// Axum 0.8 uses brace syntax for path parameters: `{name}`, `{stream}`
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let with_file_logs = ctx.file_logs.is_some();
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest(
            "/api",
            api_routes(with_file_logs).with_state(state).layer(cors),
        )
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
