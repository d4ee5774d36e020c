use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use crate::config::MarketConfig;
use crate::error::AppError;
use crate::model::coin::Coin;
use crate::model::range::TimeRange;
use crate::model::series::{round2, PricePoint};

use super::cache::TtlCache;
use super::fallback::fallback_series;
use super::types::{LatestMarket, MarketChartResponse, MarketEntry};

pub struct CoinGeckoClient {
    http: reqwest::Client,
    base_url: String,
    history_cache: TtlCache<Vec<PricePoint>>,
    latest_cache: TtlCache<LatestMarket>,
}

impl CoinGeckoClient {
    pub fn new(cfg: &MarketConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms.max(1)))
            .build()
            .context("failed to build market data HTTP client")?;
        Ok(Self {
            http,
            base_url: cfg.api_url.trim_end_matches('/').to_string(),
            history_cache: TtlCache::new(Duration::from_secs(cfg.cache_ttl_secs)),
            latest_cache: TtlCache::new(Duration::from_secs(cfg.latest_cache_ttl_secs)),
        })
    }

    fn build_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, AppError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse_with_params(&raw, params)
            .map_err(|_| AppError::Config(format!("invalid market data URL: {}", raw)))
    }

    pub fn market_chart_url(&self, coin: &Coin, range: TimeRange) -> Result<Url, AppError> {
        self.build_url(
            &format!("/coins/{}/market_chart", coin.coingecko_id),
            &[
                ("vs_currency", "usd".to_string()),
                ("days", range.days().to_string()),
                ("interval", range.upstream_interval().to_string()),
            ],
        )
    }

    pub fn markets_url(&self, coin: &Coin) -> Result<Url, AppError> {
        self.build_url(
            "/coins/markets",
            &[
                ("vs_currency", "usd".to_string()),
                ("ids", coin.coingecko_id.to_string()),
                ("price_change_percentage", "24h".to_string()),
            ],
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &Url) -> Result<T, AppError> {
        let resp = self
            .http
            .get(url.clone())
            .header("Content-Type", "application/json")
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Historical prices from the upstream, without fallback.
    pub async fn try_fetch_historical_prices(
        &self,
        coin: &Coin,
        range: TimeRange,
    ) -> Result<Vec<PricePoint>, AppError> {
        let url = self.market_chart_url(coin, range)?;
        if let Some(cached) = self.history_cache.get(url.as_str()).await {
            tracing::debug!(symbol = coin.symbol, range = %range, "Historical prices served from cache");
            return Ok(cached);
        }

        let chart: MarketChartResponse = self.get_json(&url).await?;
        let prices: Vec<PricePoint> = chart
            .prices
            .into_iter()
            .map(|(timestamp, price)| PricePoint {
                timestamp: timestamp as i64,
                price,
            })
            .collect();
        self.history_cache
            .insert(url.to_string(), prices.clone())
            .await;
        Ok(prices)
    }

    /// Historical prices, or the synthetic series if the upstream fails.
    pub async fn fetch_historical_prices(&self, coin: &Coin, range: TimeRange) -> Vec<PricePoint> {
        match self.try_fetch_historical_prices(coin, range).await {
            Ok(prices) => prices,
            Err(e) => {
                tracing::warn!(
                    symbol = coin.symbol,
                    range = %range,
                    error = %e,
                    "Falling back to dummy historical data"
                );
                fallback_series(range, chrono::Utc::now().timestamp_millis())
            }
        }
    }

    pub async fn try_fetch_latest_market(&self, coin: &Coin) -> Result<LatestMarket, AppError> {
        let url = self.markets_url(coin)?;
        if let Some(cached) = self.latest_cache.get(url.as_str()).await {
            tracing::debug!(symbol = coin.symbol, "Latest market served from cache");
            return Ok(cached);
        }

        let entries: Vec<MarketEntry> = self.get_json(&url).await?;
        let entry = entries
            .first()
            .ok_or_else(|| AppError::UpstreamEmpty(url.to_string()))?;
        let latest = LatestMarket::from(entry);
        self.latest_cache.insert(url.to_string(), latest).await;
        Ok(latest)
    }

    pub async fn fetch_latest_market(&self, coin: &Coin) -> LatestMarket {
        match self.try_fetch_latest_market(coin).await {
            Ok(latest) => latest,
            Err(e) => {
                tracing::warn!(
                    symbol = coin.symbol,
                    error = %e,
                    "Falling back to dummy latest data"
                );
                fallback_latest(chrono::Utc::now().timestamp_millis())
            }
        }
    }

    /// Closing prices rounded to cents, for dashboard sparklines.
    pub async fn fetch_sparkline(&self, coin: &Coin, range: TimeRange) -> Vec<f64> {
        self.fetch_historical_prices(coin, range)
            .await
            .iter()
            .map(|pt| round2(pt.price))
            .collect()
    }
}

fn fallback_latest(now_ms: i64) -> LatestMarket {
    LatestMarket {
        current_price: fallback_series(TimeRange::Week, now_ms)
            .last()
            .map(|pt| pt.price),
        price_change_24h: Some(0.0),
        ..LatestMarket::default()
    }
}
