use std::collections::HashMap;

use crate::config::PredictionConfig;
use crate::error::AppError;
use crate::model::coin::{coin_by_symbol, Coin};
use crate::model::range::TimeRange;
use crate::predictor::ForecastModel;

const INVALID_PARAMS: &str = "Invalid parameters";
const INVALID_QUERY: &str = "Invalid query parameters";

/// Decoded query parameters keeping the first value of each key, so repeated
/// keys never reject the request.
fn first_values(raw: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

fn lookup_coin(symbol: Option<&str>) -> Result<&'static Coin, AppError> {
    let raw = symbol.unwrap_or_default();
    coin_by_symbol(raw).ok_or_else(|| AppError::UnsupportedSymbol(raw.to_string()))
}

#[derive(Debug, Default)]
pub struct SymbolQuery {
    pub symbol: Option<String>,
}

impl SymbolQuery {
    pub fn from_query_string(raw: Option<&str>) -> Self {
        let mut params = first_values(raw);
        Self {
            symbol: params.remove("symbol"),
        }
    }

    pub fn coin(&self) -> Result<&'static Coin, AppError> {
        lookup_coin(self.symbol.as_deref())
    }
}

#[derive(Debug, Default)]
pub struct PriceQuery {
    pub symbol: Option<String>,
    pub range: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct PriceRequest {
    pub coin: &'static Coin,
    pub range: TimeRange,
}

impl PriceQuery {
    pub fn from_query_string(raw: Option<&str>) -> Self {
        let mut params = first_values(raw);
        Self {
            symbol: params.remove("symbol"),
            range: params.remove("range"),
        }
    }

    pub fn validate(&self) -> Result<PriceRequest, AppError> {
        let range = match self.range.as_deref() {
            None => TimeRange::default(),
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::InvalidParams(INVALID_QUERY))?,
        };
        let coin = lookup_coin(self.symbol.as_deref())?;
        Ok(PriceRequest { coin, range })
    }
}

#[derive(Debug, Default)]
pub struct PredictQuery {
    pub symbol: Option<String>,
    pub horizon: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct PredictRequest {
    pub coin: &'static Coin,
    pub horizon: usize,
    pub model: ForecastModel,
}

impl PredictQuery {
    pub fn from_query_string(raw: Option<&str>) -> Self {
        let mut params = first_values(raw);
        Self {
            symbol: params.remove("symbol"),
            horizon: params.remove("horizon"),
            model: params.remove("model"),
        }
    }

    /// Parameter checks run before the symbol lookup, so a bad horizon on an
    /// unknown coin reports invalid parameters.
    pub fn validate(&self, cfg: &PredictionConfig) -> Result<PredictRequest, AppError> {
        let horizon = match self.horizon.as_deref() {
            None => cfg.default_horizon as usize,
            Some(raw) => parse_horizon(raw, cfg.max_horizon)
                .ok_or(AppError::InvalidParams(INVALID_PARAMS))?,
        };
        let model = match self.model.as_deref() {
            None => ForecastModel::default(),
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::InvalidParams(INVALID_PARAMS))?,
        };
        let coin = lookup_coin(self.symbol.as_deref())?;
        Ok(PredictRequest {
            coin,
            horizon,
            model,
        })
    }
}

/// Accepts integral numbers (`"7"`, `"7.0"`) within `1..=max`.
fn parse_horizon(raw: &str, max: u32) -> Option<usize> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if !(1.0..=f64::from(max)).contains(&value) {
        return None;
    }
    Some(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_keep_first_value() {
        let q =
            PredictQuery::from_query_string(Some("symbol=btc&horizon=3&horizon=40&model=linear"));
        assert_eq!(q.symbol.as_deref(), Some("btc"));
        assert_eq!(q.horizon.as_deref(), Some("3"));
        assert_eq!(q.model.as_deref(), Some("linear"));
    }

    #[test]
    fn query_values_are_percent_decoded() {
        let q = PriceQuery::from_query_string(Some("symbol=%42TC&range=24h&extra=1"));
        assert_eq!(q.symbol.as_deref(), Some("BTC"));
        assert_eq!(q.range.as_deref(), Some("24h"));
        assert!(SymbolQuery::from_query_string(None).symbol.is_none());
    }

    #[test]
    fn horizon_parsing() {
        assert_eq!(parse_horizon("7", 30), Some(7));
        assert_eq!(parse_horizon(" 30 ", 30), Some(30));
        assert_eq!(parse_horizon("2.0", 30), Some(2));
        assert_eq!(parse_horizon("2.5", 30), None);
        assert_eq!(parse_horizon("0", 30), None);
        assert_eq!(parse_horizon("31", 30), None);
        assert_eq!(parse_horizon("", 30), None);
        assert_eq!(parse_horizon("NaN", 30), None);
        assert_eq!(parse_horizon("-3", 30), None);
    }
}
