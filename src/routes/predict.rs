use axum::{
    extract::{RawQuery, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::model::range::TimeRange;
use crate::model::series::{to_series, ForecastPoint};
use crate::predictor::ForecastModel;
use crate::state::AppState;

use super::query::PredictQuery;

/// History window the forecast is fitted on.
const HISTORY_RANGE: TimeRange = TimeRange::Quarter;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/predict", get(predict))
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub symbol: &'static str,
    pub model: ForecastModel,
    pub forecast: Vec<ForecastPoint>,
}

/// GET /api/predict?symbol=btc&horizon=7&model=mock
async fn predict(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<PredictResponse>, AppError> {
    let req = PredictQuery::from_query_string(raw.as_deref())
        .validate(&state.config.prediction)?;
    let history = state
        .market
        .fetch_historical_prices(req.coin, HISTORY_RANGE)
        .await;
    let series = to_series(&history);
    if series.is_empty() {
        return Err(AppError::InsufficientData);
    }

    let seed = state.config.prediction.seed_for(req.coin.symbol, req.horizon);
    let forecast = req.model.forecast(&series, req.horizon, Some(&seed));
    tracing::info!(
        symbol = req.coin.symbol,
        model = %req.model,
        horizon = req.horizon,
        observations = series.len(),
        "Forecast generated"
    );
    Ok(Json(PredictResponse {
        symbol: req.coin.symbol,
        model: req.model,
        forecast,
    }))
}
