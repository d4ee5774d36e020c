use axum::{
    extract::{RawQuery, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::coingecko::LatestMarket;
use crate::error::AppError;
use crate::model::range::TimeRange;
use crate::model::series::PricePoint;
use crate::state::AppState;

use super::query::{PriceQuery, SymbolQuery};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/price", get(price_history))
        .route("/api/price/latest", get(latest_price))
}

#[derive(Debug, Serialize)]
pub struct PriceHistoryResponse {
    pub symbol: &'static str,
    pub range: TimeRange,
    pub prices: Vec<PricePoint>,
}

#[derive(Debug, Serialize)]
pub struct LatestPriceResponse {
    pub symbol: &'static str,
    #[serde(flatten)]
    pub market: LatestMarket,
}

/// GET /api/price?symbol=btc&range=7d
async fn price_history(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<PriceHistoryResponse>, AppError> {
    let req = PriceQuery::from_query_string(raw.as_deref()).validate()?;
    let prices = state
        .market
        .fetch_historical_prices(req.coin, req.range)
        .await;
    Ok(Json(PriceHistoryResponse {
        symbol: req.coin.symbol,
        range: req.range,
        prices,
    }))
}

/// GET /api/price/latest?symbol=btc
async fn latest_price(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<LatestPriceResponse>, AppError> {
    let coin = SymbolQuery::from_query_string(raw.as_deref()).coin()?;
    let market = state.market.fetch_latest_market(coin).await;
    Ok(Json(LatestPriceResponse {
        symbol: coin.symbol,
        market,
    }))
}
