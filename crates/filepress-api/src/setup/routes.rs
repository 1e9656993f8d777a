//! Route configuration and setup

use crate::error::expose_error_details;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use filepress_core::Config;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
///
/// The upload cap is enforced by `RequestBodyLimitLayer` on the whole request
/// body; axum's own default limit is disabled so it cannot undercut it.
/// Error details are only rendered when the config is not production.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    let router = Router::new()
        .route("/upload", post(handlers::upload::upload_file))
        .route("/download/{filename}", get(handlers::download::download_file))
        .route("/health", get(handlers::health::health_check));

    let router = if config.is_production() {
        router
    } else {
        router.layer(axum::middleware::from_fn(expose_error_details))
    };

    router
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
