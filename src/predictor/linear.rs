use crate::model::series::{round2, ForecastPoint, SeriesPoint};

use super::{compute_step, future_timestamp, sorted_copy};

/// Two-sided 95% normal quantile.
pub const BAND_Z: f64 = 1.96;
/// Sigma used when the fit leaves no residual spread, as a share of the last price.
pub const FALLBACK_SIGMA_RATIO: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    pub residual_std: f64,
}

impl RegressionFit {
    pub fn predict(&self, t: i64) -> f64 {
        self.slope * t as f64 + self.intercept
    }
}

/// Ordinary least squares of price on timestamp.
pub fn linear_regression(points: &[SeriesPoint]) -> RegressionFit {
    let n = points.len();
    if n < 2 {
        return RegressionFit {
            slope: 0.0,
            intercept: points.first().map_or(0.0, |pt| pt.p),
            residual_std: 0.0,
        };
    }

    let nf = n as f64;
    let mean_x = points.iter().map(|pt| pt.t as f64).sum::<f64>() / nf;
    let mean_y = points.iter().map(|pt| pt.p).sum::<f64>() / nf;

    let (numerator, denominator) = points.iter().fold((0.0, 0.0), |(num, den), pt| {
        let dx = pt.t as f64 - mean_x;
        (num + dx * (pt.p - mean_y), den + dx * dx)
    });
    let slope = if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    };
    let intercept = mean_y - slope * mean_x;

    let fit = RegressionFit {
        slope,
        intercept,
        residual_std: 0.0,
    };
    let sum_sq = points
        .iter()
        .map(|pt| {
            let r = pt.p - fit.predict(pt.t);
            r * r
        })
        .sum::<f64>();
    RegressionFit {
        residual_std: (sum_sq / (n - 1).max(1) as f64).sqrt(),
        ..fit
    }
}

/// Extrapolate the least-squares trend line with a +/-1.96 sigma band.
///
/// When the residual spread is exactly zero the band falls back to 5% of the
/// last observed price. Both band edges are floored at zero.
pub fn linear_forecast(series: &[SeriesPoint], horizon: usize) -> Vec<ForecastPoint> {
    if series.is_empty() || horizon == 0 {
        return Vec::new();
    }

    let sorted = sorted_copy(series);
    let step = compute_step(&sorted);
    let fit = linear_regression(&sorted);
    let Some(last) = sorted.last().copied() else {
        return Vec::new();
    };

    // A zero-priced last point leaves a zero-width band here.
    let sigma = if fit.residual_std != 0.0 {
        fit.residual_std
    } else {
        last.p * FALLBACK_SIGMA_RATIO
    };
    let margin = sigma * BAND_Z;

    (1..=horizon)
        .map(|i| {
            let timestamp = future_timestamp(last.t, step, i);
            let prediction = fit.predict(timestamp);
            ForecastPoint {
                timestamp,
                point: round2(prediction),
                lower: round2((prediction - margin).max(0.0)),
                upper: round2((prediction + margin).max(0.0)),
            }
        })
        .collect()
}
