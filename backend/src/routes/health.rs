use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/ready", get(ready))
}

async fn health() -> &'static str {
    info!("GET /health - Health check");
    "OK"
}

// Ready once the store answers a read.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    info!("GET /health/ready - Readiness check");
    match state.store.select_all().await {
        Ok(records) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "records": records.len() })),
        ),
        Err(e) => {
            warn!("Store not ready: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
