//! Statistical detectors.
//!
//! Independent pure functions over a bounded window of snapshot history:
//! volume z-score / spike flag, price velocity and acceleration, attention
//! score, and realized volatility. Insufficient data is never an error -
//! each detector degrades to a documented neutral value so a batch scoring
//! run always completes.

use chrono::{DateTime, Duration, Utc};

use super::model::clamp01;

/// Upward volume deviations beyond this many standard deviations count as
/// a spike. One-sided: crashes in volume are not spikes.
const SPIKE_Z_THRESHOLD: f64 = 2.0;

/// Maximum yes-price observations used for realized volatility.
const VOLATILITY_WINDOW: usize = 20;

/// Result of the volume anomaly test.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSpike {
    /// Standard deviations of current volume above the historical mean.
    pub z_score: f64,
    /// `z_score > 2.0`.
    pub is_spike: bool,
    /// Why the detector degraded, when it did.
    pub rationale: Option<String>,
}

impl VolumeSpike {
    fn neutral(reason: impl Into<String>) -> Self {
        Self {
            z_score: 0.0,
            is_spike: false,
            rationale: Some(reason.into()),
        }
    }
}

/// One-sided volume anomaly test against historical 24h volumes.
///
/// History entries that are not positive are discarded; fewer than 3
/// usable points, or a flat history, yields the neutral result rather
/// than a spurious spike.
#[must_use]
pub fn volume_spike_score(current_volume: f64, history: &[f64]) -> VolumeSpike {
    let usable: Vec<f64> = history.iter().copied().filter(|v| *v > 0.0).collect();
    if usable.len() < 3 {
        return VolumeSpike::neutral("insufficient volume history for spike detection");
    }

    let mean = population_mean(&usable);
    let std_dev = population_std_dev(&usable, mean);
    if std_dev == 0.0 {
        return VolumeSpike::neutral("flat volume history");
    }

    let z_score = (current_volume - mean) / std_dev;
    VolumeSpike {
        z_score,
        is_spike: z_score > SPIKE_Z_THRESHOLD,
        rationale: None,
    }
}

/// A timestamped price observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub price: f64,
    pub at: DateTime<Utc>,
}

/// Price movement over the trailing 1h and 24h windows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceVelocity {
    pub velocity_1h: f64,
    pub velocity_24h: f64,
    /// Instantaneous hourly rate minus the average hourly rate implied by
    /// the 24h move.
    pub acceleration: f64,
}

/// Compute trailing price velocities, windows anchored at `now`.
///
/// A window's velocity is the newest in-window price minus the oldest
/// in-window price; fewer than 2 points in a window yields zero for that
/// window.
#[must_use]
pub fn price_velocity(points: &[PricePoint], now: DateTime<Utc>) -> PriceVelocity {
    let mut sorted: Vec<PricePoint> = points.to_vec();
    sorted.sort_by(|a, b| b.at.cmp(&a.at));

    let velocity_1h = window_velocity(&sorted, now, Duration::hours(1));
    let velocity_24h = window_velocity(&sorted, now, Duration::hours(24));

    PriceVelocity {
        velocity_1h,
        velocity_24h,
        acceleration: velocity_1h - velocity_24h / 24.0,
    }
}

/// Newest-minus-oldest price among points no older than `window`.
/// Expects `sorted` newest first.
fn window_velocity(sorted: &[PricePoint], now: DateTime<Utc>, window: Duration) -> f64 {
    let cutoff = now - window;
    let in_window: Vec<&PricePoint> = sorted.iter().filter(|p| p.at >= cutoff).collect();
    match (in_window.first(), in_window.last()) {
        (Some(newest), Some(oldest)) if in_window.len() >= 2 => newest.price - oldest.price,
        _ => 0.0,
    }
}

/// Normalized estimate of how much participation a listing has.
///
/// Weighted sum of capped components: volume (cap $100k, weight 0.4),
/// 24h price-change magnitude (cap 0.2, weight 0.4), and liquidity
/// (cap $50k, weight 0.2). Always in `[0, 1]`.
#[must_use]
pub fn attention_score(volume: f64, price_change_24h: f64, liquidity: f64) -> f64 {
    clamp01(volume / 100_000.0) * 0.4
        + clamp01(price_change_24h.abs() / 0.2) * 0.4
        + clamp01(liquidity / 50_000.0) * 0.2
}

/// Population standard deviation of up to the 20 most recent non-zero
/// yes-prices. `prices` is expected newest first.
#[must_use]
pub fn realized_volatility(prices: &[f64]) -> f64 {
    let window: Vec<f64> = prices
        .iter()
        .copied()
        .filter(|p| *p != 0.0)
        .take(VOLATILITY_WINDOW)
        .collect();
    if window.is_empty() {
        return 0.0;
    }
    let mean = population_mean(&window);
    population_std_dev(&window, mean)
}

fn population_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn point(price: f64, minutes_ago: i64) -> PricePoint {
        PricePoint {
            price,
            at: now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_sparse_history_is_neutral() {
        let spike = volume_spike_score(1_000_000.0, &[]);
        assert_eq!(spike.z_score, 0.0);
        assert!(!spike.is_spike);
        assert!(spike.rationale.is_some());

        let spike = volume_spike_score(1_000_000.0, &[100.0, 200.0]);
        assert!(!spike.is_spike);
    }

    #[test]
    fn test_nonpositive_history_points_are_discarded() {
        // Only two usable points survive the filter.
        let spike = volume_spike_score(500.0, &[100.0, 0.0, -5.0, 200.0]);
        assert_eq!(spike.z_score, 0.0);
        assert!(!spike.is_spike);
    }

    #[test]
    fn test_flat_history_is_neutral() {
        let spike = volume_spike_score(500.0, &[100.0, 100.0, 100.0]);
        assert_eq!(spike.z_score, 0.0);
        assert!(!spike.is_spike);
    }

    #[test]
    fn test_extreme_deviation_is_a_spike() {
        // mean 100k, population stddev 50k -> z = 8.
        let history = [50_000.0, 100_000.0, 150_000.0, 50_000.0, 100_000.0, 150_000.0];
        let mean = population_mean(&history);
        let sd = population_std_dev(&history, mean);
        let spike = volume_spike_score(mean + 8.0 * sd, &history);
        assert!((spike.z_score - 8.0).abs() < 1e-9);
        assert!(spike.is_spike);
    }

    #[test]
    fn test_downward_deviation_is_not_a_spike() {
        let spike = volume_spike_score(1.0, &[100.0, 200.0, 300.0]);
        assert!(spike.z_score < 0.0);
        assert!(!spike.is_spike);
    }

    #[test]
    fn test_velocity_needs_two_points_per_window() {
        let v = price_velocity(&[point(0.5, 10)], now());
        assert_eq!(v.velocity_1h, 0.0);
        assert_eq!(v.velocity_24h, 0.0);
    }

    #[test]
    fn test_velocity_windows() {
        let points = vec![
            point(0.60, 5),
            point(0.55, 30),
            point(0.50, 55),
            point(0.40, 60 * 20),
        ];
        let v = price_velocity(&points, now());
        // 1h window: 0.60 - 0.50
        assert!((v.velocity_1h - 0.10).abs() < 1e-9);
        // 24h window: 0.60 - 0.40
        assert!((v.velocity_24h - 0.20).abs() < 1e-9);
        assert!((v.acceleration - (0.10 - 0.20 / 24.0)).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_sorts_unordered_input() {
        let points = vec![point(0.40, 60 * 20), point(0.60, 5), point(0.50, 55)];
        let v = price_velocity(&points, now());
        assert!((v.velocity_24h - 0.20).abs() < 1e-9);
    }

    #[test]
    fn test_attention_score_caps_at_one() {
        let score = attention_score(1_000_000.0, 0.9, 500_000.0);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_attention_score_weights() {
        // Half of each cap: 0.5*0.4 + 0.5*0.4 + 0.5*0.2 = 0.5
        let score = attention_score(50_000.0, 0.1, 25_000.0);
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_volatility_ignores_zero_prices_and_bounds_window() {
        assert_eq!(realized_volatility(&[]), 0.0);
        assert_eq!(realized_volatility(&[0.0, 0.0]), 0.0);
        assert_eq!(realized_volatility(&[0.5]), 0.0);

        // 25 alternating prices; only the 20 most recent non-zero count,
        // but alternation makes the stddev the same either way.
        let prices: Vec<f64> = (0..25).map(|i| if i % 2 == 0 { 0.4 } else { 0.6 }).collect();
        let vol = realized_volatility(&prices);
        assert!((vol - 0.1).abs() < 1e-9);
    }
}
