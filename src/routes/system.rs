use axum::{extract::State, routing::get, Json, Router};
use futures_util::future::join_all;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::model::coin::COINS;
use crate::model::range::TimeRange;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/warmup", get(warmup))
        .route("/health", get(health))
}

/// GET /api/warmup — prime the history cache for every supported coin.
async fn warmup(State(state): State<Arc<AppState>>) -> Json<Value> {
    let fetches = COINS
        .iter()
        .map(|coin| state.market.fetch_historical_prices(coin, TimeRange::Week));
    let loaded: usize = join_all(fetches).await.iter().map(Vec::len).sum();
    tracing::info!(coins = COINS.len(), points = loaded, "Warmup complete");
    Json(json!({ "status": "ok" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
