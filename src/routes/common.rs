//! Health route for the REST service.

use crate::state::AppState;
use crate::store;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    timestamp: String,
    database: &'static str,
    service: &'static str,
}

async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    let database = if store::test_connection(&state.pool).await.is_ok() {
        "connected"
    } else {
        "disconnected"
    };
    Json(HealthBody {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        database,
        service: "rest-api",
    })
}

/// GET /health with a live database check.
pub fn common_routes(state: AppState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}
