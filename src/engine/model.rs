//! Deadline delay probability model.
//!
//! Adjusts a market's quoted probability for the risk that a time-bound
//! event slips past its deadline. The penalty accumulates from three
//! sources - time remaining, liquidity, and category - and every
//! adjustment appends a human-readable rationale line so the final score
//! can explain itself.

use chrono::{DateTime, Utc};

use crate::domain::ModelOutput;

use super::deadline::time_remaining_days;

/// Practical maximum accumulable penalty, used to normalize `delay_risk`.
/// Not a hard cap on the penalty itself; the ratio is clamped instead.
const MAX_PENALTY: f64 = 0.30;

/// Clamp a probability-like value into `[0, 1]`.
#[must_use]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Adjust a quoted probability for deadline-slip risk.
///
/// With no deadline the market is returned unpenalized at low confidence:
/// we cannot time-assess it, so we refuse to guess. Otherwise the penalty
/// accumulates from the first matching time bucket, a liquidity bucket,
/// and the first matching category bucket, and:
///
/// - `model_prob = clamp01(market_prob - penalty)`
/// - `delay_risk = clamp01(penalty / 0.30)`
#[must_use]
pub fn deadline_delay_model(
    market_prob: f64,
    end_date: Option<DateTime<Utc>>,
    liquidity: f64,
    category: Option<&str>,
    now: DateTime<Utc>,
) -> ModelOutput {
    let mut rationale = Vec::new();

    let end_date = match end_date {
        Some(end) => end,
        None => {
            rationale.push("no deadline found; no delay penalty applied".to_string());
            return ModelOutput {
                model_prob: clamp01(market_prob),
                delay_risk: 0.0,
                confidence: 0.3,
                rationale,
            };
        }
    };

    let days = time_remaining_days(end_date, now);
    let mut penalty = 0.0;
    let mut confidence;

    // First matching time bucket wins, ascending.
    if days < 7.0 {
        penalty += 0.25;
        confidence = 0.9;
        rationale.push(format!("{days:.1} days to deadline: severe time pressure"));
    } else if days < 30.0 {
        penalty += 0.18;
        confidence = 0.85;
        rationale.push(format!("{days:.1} days to deadline: high time pressure"));
    } else if days < 90.0 {
        penalty += 0.10;
        confidence = 0.75;
        rationale.push(format!("{days:.1} days to deadline: moderate time pressure"));
    } else if days < 180.0 {
        penalty += 0.04;
        confidence = 0.65;
        rationale.push(format!("{days:.1} days to deadline: mild time pressure"));
    } else {
        penalty += 0.02;
        confidence = 0.5;
        rationale.push(format!("{days:.1} days to deadline: distant"));
    }

    if liquidity < 5_000.0 {
        penalty += 0.08;
        confidence *= 0.9;
        rationale.push(format!("thin liquidity (${liquidity:.0}): prices less reliable"));
    } else if liquidity < 20_000.0 {
        penalty += 0.04;
        confidence *= 0.95;
        rationale.push(format!("modest liquidity (${liquidity:.0})"));
    } else {
        rationale.push(format!("high liquidity (${liquidity:.0})"));
    }

    if let Some(category) = category {
        let category = category.to_lowercase();
        // Exclusive first-match, in this order.
        if category.contains("crypto") || category.contains("protocol") {
            penalty += 0.05;
            rationale.push("crypto/protocol markets habitually slip deadlines".to_string());
        } else if category.contains("regulation") || category.contains("legal") {
            penalty += 0.08;
            rationale.push("regulatory/legal timelines habitually slip".to_string());
        } else if category.contains("politics") {
            penalty += 0.03;
            rationale.push("political timelines carry slip risk".to_string());
        }
    }

    ModelOutput {
        model_prob: clamp01(market_prob - penalty),
        delay_risk: clamp01(penalty / MAX_PENALTY),
        confidence,
        rationale,
    }
}
