use serde::{Deserialize, Serialize};

/// A single historical observation: millisecond timestamp and price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub t: i64,
    pub p: f64,
}

impl SeriesPoint {
    pub fn new(t: i64, p: f64) -> Self {
        Self { t, p }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: i64,
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Market-data observation as served by the price endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: i64,
    pub price: f64,
}

impl From<PricePoint> for SeriesPoint {
    fn from(pt: PricePoint) -> Self {
        Self {
            t: pt.timestamp,
            p: pt.price,
        }
    }
}

pub fn to_series(prices: &[PricePoint]) -> Vec<SeriesPoint> {
    prices.iter().copied().map(SeriesPoint::from).collect()
}

/// Round to currency precision (2 decimal places) on the exact decimal value.
///
/// Half-cent ties round away from zero. A double can only sit exactly on a
/// half-cent when it is an odd multiple of 1/8, and in that case `value * 100`
/// is exact too.
pub fn round2(value: f64) -> f64 {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return (value * 100.0).round() / 100.0;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}
