use crate::model::range::TimeRange;
use crate::model::series::{round2, PricePoint};

/// Synthetic sine-wave series served when the upstream is unavailable.
pub fn fallback_series(range: TimeRange, now_ms: i64) -> Vec<PricePoint> {
    let length = range.sample_count();
    let step = range.step_ms();
    (0..length)
        .map(|index| {
            let base = 100.0 + (index as f64 / 3.0).sin() * 5.0;
            PricePoint {
                timestamp: now_ms - (length - index) as i64 * step,
                price: round2(base),
            }
        })
        .collect()
}
