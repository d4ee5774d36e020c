mod linear;
mod mock;
mod rng;

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Serialize, Serializer};

use crate::model::series::{ForecastPoint, SeriesPoint};

pub use linear::{linear_forecast, linear_regression, RegressionFit, BAND_Z, FALLBACK_SIGMA_RATIO};
pub use mock::{mock_forecast, DEFAULT_SEED};
pub use rng::SeededRng;

pub const DEFAULT_STEP_MS: i64 = 24 * 60 * 60 * 1000;
pub const MIN_STEP_MS: i64 = 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForecastModel {
    #[default]
    Mock,
    Linear,
}

impl ForecastModel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Linear => "linear",
        }
    }

    /// Run the selected model. The seed only affects `Mock`.
    pub fn forecast(
        self,
        series: &[SeriesPoint],
        horizon: usize,
        seed: Option<&str>,
    ) -> Vec<ForecastPoint> {
        match self {
            Self::Mock => mock_forecast(series, horizon, seed),
            Self::Linear => linear_forecast(series, horizon),
        }
    }
}

impl fmt::Display for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastModel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mock" => Ok(Self::Mock),
            "linear" => Ok(Self::Linear),
            _ => bail!("unknown forecast model '{}': expected mock or linear", s),
        }
    }
}

impl Serialize for ForecastModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Sampling interval of an ascending series, floored at one hour.
pub fn compute_step(sorted: &[SeriesPoint]) -> i64 {
    match sorted {
        [.., prev, last] => last.t.saturating_sub(prev.t).max(MIN_STEP_MS),
        _ => DEFAULT_STEP_MS,
    }
}

fn sorted_copy(series: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|pt| pt.t);
    sorted
}

fn future_timestamp(last_t: i64, step: i64, i: usize) -> i64 {
    last_t.saturating_add(step.saturating_mul(i as i64))
}
