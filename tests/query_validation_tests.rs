use axum::http::StatusCode;

use coin_forecast::config::PredictionConfig;
use coin_forecast::error::AppError;
use coin_forecast::model::range::TimeRange;
use coin_forecast::predictor::ForecastModel;
use coin_forecast::routes::query::{PredictQuery, PriceQuery, SymbolQuery};

fn predict(symbol: Option<&str>, horizon: Option<&str>, model: Option<&str>) -> PredictQuery {
    PredictQuery {
        symbol: symbol.map(str::to_string),
        horizon: horizon.map(str::to_string),
        model: model.map(str::to_string),
    }
}

#[test]
fn predict_defaults_to_mock_and_configured_horizon() {
    let req = predict(Some("ETH"), None, None)
        .validate(&PredictionConfig::default())
        .unwrap();
    assert_eq!(req.coin.symbol, "eth");
    assert_eq!(req.horizon, 7);
    assert_eq!(req.model, ForecastModel::Mock);
}

#[test]
fn predict_accepts_linear_and_max_horizon() {
    let req = predict(Some("sol"), Some("30"), Some("linear"))
        .validate(&PredictionConfig::default())
        .unwrap();
    assert_eq!(req.horizon, 30);
    assert_eq!(req.model, ForecastModel::Linear);
}

#[test]
fn predict_rejects_out_of_range_horizon() {
    let cfg = PredictionConfig::default();
    for raw in ["0", "31", "abc", ""] {
        let err = predict(Some("btc"), Some(raw), None).validate(&cfg).unwrap_err();
        assert!(matches!(err, AppError::InvalidParams("Invalid parameters")));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}

#[test]
fn predict_respects_configured_max_horizon() {
    let cfg = PredictionConfig {
        default_horizon: 3,
        max_horizon: 10,
        seed: None,
    };
    assert!(predict(Some("btc"), Some("11"), None).validate(&cfg).is_err());
    assert_eq!(predict(Some("btc"), None, None).validate(&cfg).unwrap().horizon, 3);
}

#[test]
fn predict_rejects_unknown_model_before_symbol() {
    let err = predict(Some("doge"), None, Some("arima"))
        .validate(&PredictionConfig::default())
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidParams(_)));
}

#[test]
fn predict_rejects_unknown_symbol() {
    let err = predict(Some("doge"), Some("3"), Some("mock"))
        .validate(&PredictionConfig::default())
        .unwrap_err();
    assert!(matches!(err, AppError::UnsupportedSymbol(ref s) if s == "doge"));
    let err = predict(None, None, None)
        .validate(&PredictionConfig::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "Unsupported symbol");
}

#[test]
fn price_query_defaults_to_week() {
    let req = PriceQuery {
        symbol: Some("xrp".to_string()),
        range: None,
    }
    .validate()
    .unwrap();
    assert_eq!(req.coin.coingecko_id, "ripple");
    assert_eq!(req.range, TimeRange::Week);
}

#[test]
fn price_query_rejects_unknown_range() {
    let err = PriceQuery {
        symbol: Some("xrp".to_string()),
        range: Some("1y".to_string()),
    }
    .validate()
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid query parameters");
}

#[test]
fn symbol_query_lowercases() {
    let q = SymbolQuery {
        symbol: Some("BNB".to_string()),
    };
    assert_eq!(q.coin().unwrap().symbol, "bnb");
}
