use axum::{extract::State, Json};

use crate::models::StatsResponse;
use crate::state::AppState;

/// GET /stats - Catalog size and liveness.
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        total_games: state.store.count(),
        status: "online",
    })
}
