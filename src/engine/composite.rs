//! Composite score.
//!
//! Folds edge, signal strength, liquidity, volume activity, momentum, and
//! attention into a single 0-100 opportunity score. The score starts from
//! a neutral 50 and moves by fixed-weight contributions; [`Tier`] mapping
//! lives on the domain type.

use crate::domain::{Momentum, OpportunitySignal};

/// Combine sub-scores into a composite opportunity score in `[0, 100]`.
///
/// Contributions, from a base of 50: `|edge|` (weight 0.3 on a 0-100
/// scale), the mean signal weight (up to 25), the normalized liquidity
/// score (up to 10), volume z (3 per standard deviation, capped at 10),
/// +5 for a directional momentum regime, and -5 when attention is
/// near-dead.
#[must_use]
pub fn composite_score(
    edge: f64,
    attention: f64,
    volume_z: f64,
    liquidity_score: f64,
    momentum: Momentum,
    signals: &[OpportunitySignal],
) -> f64 {
    let mut score = 50.0;

    score += edge.abs() * 100.0 * 0.3;

    if !signals.is_empty() {
        let avg_weight =
            signals.iter().map(OpportunitySignal::weight).sum::<f64>() / signals.len() as f64;
        score += avg_weight * 25.0;
    }

    score += liquidity_score * 10.0;
    score += (volume_z * 3.0).min(10.0);

    if momentum.is_directional() {
        score += 5.0;
    }
    if attention < 0.2 {
        score -= 5.0;
    }

    score.clamp(0.0, 100.0)
}
