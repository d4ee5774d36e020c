use crate::model::series::{round2, ForecastPoint, SeriesPoint};

use super::rng::SeededRng;
use super::{compute_step, future_timestamp, sorted_copy};

pub const DEFAULT_SEED: &str = "demo";

const NOISE_RATIO: f64 = 0.02;
const DRIFT_DAMPING: f64 = 0.5;
const BAND_RATIO: f64 = 0.06;
const MIN_MARGIN: f64 = 0.5;

/// Random walk with half the historical drift and +/-1% seeded noise.
///
/// This is a placeholder model for demos, not a statistical forecast. The
/// walk is floored at zero and the band is 6% of the value with an absolute
/// minimum of 0.5.
pub fn mock_forecast(
    series: &[SeriesPoint],
    horizon: usize,
    seed: Option<&str>,
) -> Vec<ForecastPoint> {
    if series.is_empty() || horizon == 0 {
        return Vec::new();
    }

    let mut rng = SeededRng::new(seed.unwrap_or(DEFAULT_SEED));
    let sorted = sorted_copy(series);
    let step = compute_step(&sorted);
    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };
    let drift_base = (last.p - first.p) / (sorted.len().saturating_sub(1).max(1) as f64);
    let trend = drift_base * DRIFT_DAMPING;

    let mut current = last.p;
    (1..=horizon)
        .map(|i| {
            let noise = (rng.next_f64() - 0.5) * current * NOISE_RATIO;
            current = (current + trend + noise).max(0.0);
            let margin = (current * BAND_RATIO).max(MIN_MARGIN);
            ForecastPoint {
                timestamp: future_timestamp(last.t, step, i),
                point: round2(current),
                lower: round2((current - margin).max(0.0)),
                upper: round2(current + margin),
            }
        })
        .collect()
}
