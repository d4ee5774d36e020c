pub mod cache;
pub mod fallback;
pub mod rest;
pub mod types;

pub use rest::CoinGeckoClient;
pub use types::LatestMarket;
