//! The market scoring engine.
//!
//! A strictly forward pipeline over one market's context and snapshot
//! history: deadline extraction, probability adjustment, statistical
//! detectors, signal generation, composite scoring, and position sizing.
//! Every stage is a pure synchronous function; the wall clock is injected
//! as `now` so identical inputs always produce identical output.
//!
//! Scoring calls are independent - callers may score any number of
//! markets concurrently with no coordination beyond collecting results.

pub mod composite;
pub mod deadline;
pub mod kelly;
pub mod model;
pub mod signals;
pub mod stats;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{
    AdvancedScore, Direction, DetectorReadings, MarketContext, MarketListing, MarketSnapshot,
    Tier,
};

use composite::composite_score;
use deadline::{deadline_urgency, extract_deadline, is_time_bound_market, time_remaining_days};
use kelly::{kelly_fraction, suggest_size};
use model::{clamp01, deadline_delay_model};
use signals::{detect_momentum, generate_signals, SignalInputs};
use stats::{attention_score, price_velocity, realized_volatility, volume_spike_score, PricePoint};

/// Bounded snapshot prefix the engine reads; older history is ignored.
pub const SNAPSHOT_WINDOW: usize = 30;

/// Score one market.
///
/// `snapshots` is the market's history, newest first; only the first
/// [`SNAPSHOT_WINDOW`] entries are read. Returns `None` when there are no
/// snapshots or the current yes-price is outside the open interval (0, 1)
/// - a degenerate or resolved market is rejected, never given a boundary
/// score.
#[must_use]
pub fn score_market(
    context: &MarketContext,
    snapshots: &[MarketSnapshot],
    now: DateTime<Utc>,
) -> Option<AdvancedScore> {
    if snapshots.is_empty() {
        debug!(market = %context.id, "no snapshots; market not scored");
        return None;
    }
    let window = &snapshots[..snapshots.len().min(SNAPSHOT_WINDOW)];
    let current = &window[0];

    let market_prob = current.yes_price?;
    if market_prob <= 0.0 || market_prob >= 1.0 {
        debug!(
            market = %context.id,
            price = market_prob,
            "degenerate yes-price; market not scored"
        );
        return None;
    }

    let is_by_date = is_time_bound_market(
        &context.title,
        context.rules.as_deref(),
        context.description.as_deref(),
    );
    let end_date = extract_deadline(
        &context.title,
        context.rules.as_deref(),
        context.end_date,
        now,
    );
    let remaining = end_date.map(|end| time_remaining_days(end, now));
    let urgency = deadline_urgency(remaining);

    let model = deadline_delay_model(
        market_prob,
        end_date,
        current.liquidity,
        context.category.as_deref(),
        now,
    );
    let edge = model.model_prob - market_prob;
    let edge_direction = if edge >= 0.0 {
        Direction::Yes
    } else {
        Direction::No
    };

    // Current volume is tested against the rest of the window, never
    // against itself.
    let volume_history: Vec<f64> = window[1..].iter().map(|s| s.volume_24h).collect();
    let spike = volume_spike_score(current.volume_24h, &volume_history);

    let price_points: Vec<PricePoint> = window
        .iter()
        .filter_map(|s| {
            s.yes_price.map(|price| PricePoint {
                price,
                at: s.captured_at,
            })
        })
        .collect();
    let velocity = price_velocity(&price_points, now);

    let yes_prices: Vec<f64> = window.iter().filter_map(|s| s.yes_price).collect();
    let volatility = realized_volatility(&yes_prices);

    let attention = attention_score(
        current.volume_24h,
        current.price_change_24h,
        current.liquidity,
    );
    let momentum = detect_momentum(velocity.velocity_1h, velocity.velocity_24h, spike.z_score);

    let signal_inputs = SignalInputs {
        edge,
        edge_direction,
        delay_risk: model.delay_risk,
        is_by_date,
        attention,
        volume_z: spike.z_score,
        is_volume_spike: spike.is_spike,
        momentum,
        velocity_24h: velocity.velocity_24h,
        time_remaining_days: remaining,
        liquidity: current.liquidity,
    };
    let signals = generate_signals(&signal_inputs);
    let primary_signal = signals.first().cloned();

    let liquidity_score = clamp01(current.liquidity / 50_000.0);
    let score = composite_score(
        edge,
        attention,
        spike.z_score,
        liquidity_score,
        momentum,
        &signals,
    );
    let tier = Tier::from_score(score);

    let fraction = kelly_fraction(model.model_prob, market_prob, edge_direction);
    let suggested_size = suggest_size(fraction, tier, current.liquidity);

    Some(AdvancedScore {
        market_id: context.id.clone(),
        title: context.title.clone(),
        market_prob,
        model,
        edge,
        edge_direction,
        is_by_date,
        time_remaining_days: remaining,
        urgency,
        momentum,
        readings: DetectorReadings {
            volume_z_score: spike.z_score,
            is_volume_spike: spike.is_spike,
            velocity_1h: velocity.velocity_1h,
            velocity_24h: velocity.velocity_24h,
            acceleration: velocity.acceleration,
            attention,
            volatility,
        },
        signals,
        primary_signal,
        kelly_fraction: fraction,
        suggested_size,
        composite_score: score,
        tier,
        scored_at: now,
    })
}

/// Score a batch of listings and rank them by composite score descending,
/// with a deterministic market-id tie-break. Unscorable listings are
/// dropped.
#[must_use]
pub fn rank_markets(listings: &[MarketListing], now: DateTime<Utc>) -> Vec<AdvancedScore> {
    let mut scores: Vec<AdvancedScore> = listings
        .iter()
        .filter_map(|listing| score_market(&listing.context, &listing.snapshots, now))
        .collect();
    scores.sort_by(|a, b| b.cmp(a));
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarketId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn snapshot(yes: f64, minutes_ago: i64) -> MarketSnapshot {
        MarketSnapshot::new(
            now() - chrono::Duration::minutes(minutes_ago),
            Some(yes),
            10_000.0,
            20_000.0,
        )
    }

    #[test]
    fn test_empty_snapshots_yield_none() {
        let ctx = MarketContext::new(MarketId::from("m1"), "Will it happen?");
        assert!(score_market(&ctx, &[], now()).is_none());
    }

    #[test]
    fn test_degenerate_price_yields_none() {
        let ctx = MarketContext::new(MarketId::from("m1"), "Will it happen?");
        for price in [0.0, 1.0, 1.2, -0.1] {
            let snaps = vec![snapshot(price, 5)];
            assert!(score_market(&ctx, &snaps, now()).is_none());
        }
    }

    #[test]
    fn test_missing_yes_price_yields_none() {
        let ctx = MarketContext::new(MarketId::from("m1"), "Will it happen?");
        let mut snap = snapshot(0.5, 5);
        snap.yes_price = None;
        assert!(score_market(&ctx, &[snap], now()).is_none());
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let mut ctx = MarketContext::new(MarketId::from("m1"), "Resolved by March 31, 2026?");
        ctx.category = Some("Crypto".into());
        let snaps: Vec<MarketSnapshot> =
            (0..10).map(|i| snapshot(0.4 + 0.01 * i as f64, i * 30)).collect();

        let first = score_market(&ctx, &snaps, now()).unwrap();
        let second = score_market(&ctx, &snaps, now()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_delay_risk_normalizes_model_penalty() {
        let mut ctx = MarketContext::new(MarketId::from("m1"), "Done by March 3, 2026?");
        ctx.category = Some("Politics".into());
        let mut snap = snapshot(0.20, 5);
        snap.liquidity = 2_000.0;

        let score = score_market(&ctx, &[snap], now()).unwrap();
        // Penalty: 0.25 (time) + 0.08 (liquidity) + 0.03 (politics) = 0.36.
        assert_eq!(score.model.delay_risk, 1.0);
        assert_eq!(score.model.model_prob, 0.0);
        assert!((score.edge - (-0.20)).abs() < 1e-9);
        assert_eq!(score.edge_direction, Direction::No);
        assert!(score.is_by_date);
    }

    #[test]
    fn test_rank_orders_by_composite_desc_with_id_tiebreak() {
        let quiet = MarketListing {
            context: MarketContext::new(MarketId::from("quiet"), "Will it happen?"),
            snapshots: vec![snapshot(0.5, 5)],
        };
        let hot_ctx = {
            let mut ctx = MarketContext::new(MarketId::from("hot"), "Done by March 5, 2026?");
            ctx.category = Some("Regulation".into());
            ctx
        };
        let hot = MarketListing {
            context: hot_ctx,
            snapshots: vec![snapshot(0.6, 5)],
        };
        let quiet_twin = MarketListing {
            context: MarketContext::new(MarketId::from("aquiet"), "Will it happen?"),
            snapshots: vec![snapshot(0.5, 5)],
        };

        let ranked = rank_markets(&[quiet.clone(), hot, quiet_twin], now());
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].market_id.as_str(), "hot");
        // Equal composites fall back to id order.
        assert_eq!(ranked[1].market_id.as_str(), "aquiet");
        assert_eq!(ranked[2].market_id.as_str(), "quiet");
    }

    #[test]
    fn test_unscorable_listings_are_dropped_not_fatal() {
        let bad = MarketListing {
            context: MarketContext::new(MarketId::from("bad"), "Resolved already"),
            snapshots: vec![snapshot(1.0, 5)],
        };
        let good = MarketListing {
            context: MarketContext::new(MarketId::from("good"), "Will it happen?"),
            snapshots: vec![snapshot(0.5, 5)],
        };
        let ranked = rank_markets(&[bad, good], now());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].market_id.as_str(), "good");
    }
}
