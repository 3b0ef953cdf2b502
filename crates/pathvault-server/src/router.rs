//! Route table.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::routing::post;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the application router.
///
/// Request bodies larger than `max_request_bytes` are refused with 413.
pub fn create_router(state: Arc<AppState>, max_request_bytes: usize) -> Router {
    let api_routes = Router::new()
        .route("/upload", post(handlers::upload))
        .route("/files", get(handlers::list_files))
        .route(
            "/files/*path",
            get(handlers::download_file).delete(handlers::delete_file),
        )
        .route("/archive", get(handlers::archive_root))
        .route("/archive/*path", get(handlers::archive_folder))
        .layer(DefaultBodyLimit::max(max_request_bytes))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(create_health_router())
        .layer(TraceLayer::new_for_http())
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(handlers::health_check))
}
