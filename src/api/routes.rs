//! Router construction

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::handlers;
use crate::AppState;

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_upload_bytes = state.settings.studio.max_upload_bytes;

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/options", get(handlers::options))
        .route("/api/studios", post(handlers::create_studio))
        .route(
            "/api/studios/:id",
            get(handlers::get_studio).delete(handlers::delete_studio),
        )
        .route("/api/studios/:id/style", put(handlers::update_style))
        .route(
            "/api/studios/:id/images/:slot",
            post(handlers::select_image).delete(handlers::clear_image),
        )
        .route("/api/studios/:id/images/:slot/drop", post(handlers::drop_image))
        .route("/api/studios/:id/generate", post(handlers::generate_image))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
