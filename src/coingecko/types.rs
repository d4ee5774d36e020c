use serde::{Deserialize, Serialize};

/// Lenient numeric field: null, a non-number, or a missing key all become `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(v.as_f64())
}

/// `GET /coins/{id}/market_chart` response.
#[derive(Debug, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<(f64, f64)>,
}

/// One item of the `GET /coins/markets` response array.
#[derive(Debug, Deserialize)]
pub struct MarketEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub high_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub low_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_volume: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestMarket {
    pub current_price: Option<f64>,
    #[serde(rename = "priceChange24h")]
    pub price_change_24h: Option<f64>,
    pub market_cap: Option<f64>,
    #[serde(rename = "high24h")]
    pub high_24h: Option<f64>,
    #[serde(rename = "low24h")]
    pub low_24h: Option<f64>,
    pub total_volume: Option<f64>,
}

impl From<&MarketEntry> for LatestMarket {
    fn from(e: &MarketEntry) -> Self {
        Self {
            current_price: e.current_price,
            price_change_24h: e.price_change_percentage_24h,
            market_cap: e.market_cap,
            high_24h: e.high_24h,
            low_24h: e.low_24h,
            total_volume: e.total_volume,
        }
    }
}
