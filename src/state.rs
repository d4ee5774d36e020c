use std::sync::Arc;

use anyhow::Result;

use crate::coingecko::CoinGeckoClient;
use crate::config::Config;

/// Shared application state, passed to route handlers via `axum::extract::State`.
pub struct AppState {
    pub config: Config,
    pub market: CoinGeckoClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let market = CoinGeckoClient::new(&config.market)?;
        Ok(Arc::new(Self { config, market }))
    }
}
