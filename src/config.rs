use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub market: MarketConfig,
    pub prediction: PredictionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub api_url: String,
    pub cache_ttl_secs: u64,
    pub latest_cache_ttl_secs: u64,
    pub request_timeout_ms: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cache_ttl_secs: 300,
            latest_cache_ttl_secs: 120,
            request_timeout_ms: 8_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub default_horizon: u32,
    pub max_horizon: u32,
    /// Process-wide seed; when unset each request seeds with `{symbol}-{horizon}`.
    pub seed: Option<String>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            default_horizon: 7,
            max_horizon: 30,
            seed: None,
        }
    }
}

impl PredictionConfig {
    pub fn seed_for(&self, symbol: &str, horizon: usize) -> String {
        match &self.seed {
            Some(seed) => seed.clone(),
            None => format!("{}-{}", symbol, horizon),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

fn config_path() -> PathBuf {
    std::env::var("COIN_FORECAST_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config/default.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::from_path(&config_path())?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file; a missing file yields the built-in defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&config_str).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("COIN_API_URL").filter(|v| !v.trim().is_empty()) {
            self.market.api_url = url.trim().to_string();
        }
        if let Some(seed) = lookup("PREDICTION_SEED") {
            self.prediction.seed = Some(seed);
        }
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.prediction;
        if p.max_horizon == 0 {
            bail!("prediction.max_horizon must be >= 1");
        }
        if p.default_horizon == 0 || p.default_horizon > p.max_horizon {
            bail!(
                "prediction.default_horizon must be within 1..={} (got {})",
                p.max_horizon,
                p.default_horizon
            );
        }
        url::Url::parse(&self.market.api_url)
            .with_context(|| format!("market.api_url '{}' is not a valid URL", self.market.api_url))?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[server]
port = 8080

[prediction]
max_horizon = 14
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.prediction.max_horizon, 14);
        assert_eq!(config.prediction.default_horizon, 7);
        assert_eq!(config.market.api_url, DEFAULT_API_URL);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::from_path(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.market.cache_ttl_secs, 300);
        assert!(config.prediction.seed.is_none());
    }

    #[test]
    fn seed_falls_back_to_symbol_and_horizon() {
        let mut p = PredictionConfig::default();
        assert_eq!(p.seed_for("btc", 7), "btc-7");
        p.seed = Some("fixed".to_string());
        assert_eq!(p.seed_for("btc", 7), "fixed");
    }
}
