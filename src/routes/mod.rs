pub mod api;
pub mod stream;

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Index page
        .route("/", get(index))
        // Live game stream
        .route("/stream", get(stream::stream_games))
        // API endpoints
        .route("/stats", get(api::get_stats))
        // Health check
        .route("/health", get(health))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

async fn index() -> impl IntoResponse {
    Html(include_str!("../../static/index.html"))
}

async fn health() -> &'static str {
    "OK"
}
