//! Integration tests for the scoring pipeline.

use chrono::{DateTime, Duration, TimeZone, Utc};
use oddslens::domain::{
    Direction, MarketContext, MarketId, MarketListing, MarketSnapshot, SignalKind, SizeBucket,
    Tier,
};
use oddslens::engine::{rank_markets, score_market};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn snapshot_at(yes: f64, volume: f64, liquidity: f64, minutes_ago: i64) -> MarketSnapshot {
    MarketSnapshot::new(
        now() - Duration::minutes(minutes_ago),
        Some(yes),
        volume,
        liquidity,
    )
}

fn by_date_context(id: &str) -> MarketContext {
    let mut ctx = MarketContext::new(MarketId::from(id), "Will the upgrade ship by March 5, 2026?");
    ctx.category = Some("Crypto".into());
    ctx
}

#[test]
fn test_no_snapshots_returns_none() {
    let ctx = by_date_context("m1");
    assert!(score_market(&ctx, &[], now()).is_none());
}

#[test]
fn test_resolved_market_returns_none() {
    let ctx = by_date_context("m1");
    let snaps = vec![snapshot_at(1.0, 1000.0, 1000.0, 5)];
    assert!(score_market(&ctx, &snaps, now()).is_none());
}

#[test]
fn test_identical_inputs_yield_identical_scores() {
    let ctx = by_date_context("m1");
    let snaps: Vec<MarketSnapshot> = (0..12)
        .map(|i| snapshot_at(0.40 + (i as f64) * 0.005, 5_000.0 + 100.0 * i as f64, 9_000.0, i * 45))
        .collect();

    let a = score_market(&ctx, &snaps, now()).expect("scorable");
    let b = score_market(&ctx, &snaps, now()).expect("scorable");
    assert_eq!(a, b);
}

#[test]
fn test_deadline_overpriced_market_end_to_end() {
    // Near-deadline crypto market with thin liquidity: the model takes
    // 0.25 + 0.08 + 0.05 = 0.38 off the quote.
    let ctx = by_date_context("m1");
    let snaps = vec![snapshot_at(0.50, 2_000.0, 3_000.0, 5)];

    let score = score_market(&ctx, &snaps, now()).expect("scorable");
    assert!(score.is_by_date);
    assert_eq!(score.model.delay_risk, 1.0);
    assert!((score.model.model_prob - 0.12).abs() < 1e-9);
    assert!((score.edge + 0.38).abs() < 1e-9);
    assert_eq!(score.edge_direction, Direction::No);

    let primary = score.primary_signal.as_ref().expect("signal fires");
    assert!(score
        .signals
        .iter()
        .any(|s| s.kind == SignalKind::DeadlineOverpriced));
    assert!(primary.weight() >= score.signals.last().unwrap().weight());

    // A NO bet priced at 0.50 with model-prob 0.88 on the NO side is a
    // strong edge; the Kelly cap binds.
    assert_eq!(score.kelly_fraction, 0.25);
    // Thin liquidity forces small regardless of the fraction, unless the
    // tier is D.
    if score.tier == Tier::D {
        assert_eq!(score.suggested_size, SizeBucket::Skip);
    } else {
        assert_eq!(score.suggested_size, SizeBucket::Small);
    }
}

#[test]
fn test_no_deadline_market_is_not_penalized() {
    let ctx = MarketContext::new(MarketId::from("m2"), "Will the coin land heads?");
    let snaps = vec![snapshot_at(0.50, 20_000.0, 40_000.0, 5)];

    let score = score_market(&ctx, &snaps, now()).expect("scorable");
    assert!(!score.is_by_date);
    assert_eq!(score.model.model_prob, 0.50);
    assert_eq!(score.model.delay_risk, 0.0);
    assert_eq!(score.model.confidence, 0.3);
    assert_eq!(score.edge, 0.0);
    assert_eq!(score.kelly_fraction, 0.0);
    assert_eq!(score.suggested_size, SizeBucket::Skip);
}

#[test]
fn test_volume_spike_flows_into_signals() {
    // Flat price, historical volume around 10k, current volume way above.
    let mut snaps: Vec<MarketSnapshot> = (1..10)
        .map(|i| snapshot_at(0.50, 10_000.0 + (i % 3) as f64 * 1_000.0, 30_000.0, i * 60))
        .collect();
    snaps.insert(0, snapshot_at(0.50, 120_000.0, 30_000.0, 5));

    let ctx = MarketContext::new(MarketId::from("m3"), "Will the coin land heads?");
    let score = score_market(&ctx, &snaps, now()).expect("scorable");

    assert!(score.readings.is_volume_spike);
    assert!(score.readings.volume_z_score > 2.0);
    let precursor = score
        .signals
        .iter()
        .find(|s| s.kind == SignalKind::VolumePrecursor)
        .expect("flat price + spike = volume-precursor");
    assert_eq!(precursor.direction, Direction::Watch);
}

#[test]
fn test_snapshot_window_is_bounded() {
    // Snapshots beyond the window must not influence the score.
    let ctx = MarketContext::new(MarketId::from("m4"), "Will the coin land heads?");
    let head: Vec<MarketSnapshot> = (0..30)
        .map(|i| snapshot_at(0.50, 10_000.0, 30_000.0, i * 60))
        .collect();

    let mut padded = head.clone();
    padded.extend((30..60).map(|i| snapshot_at(0.99, 900_000.0, 30_000.0, i * 60)));

    let bounded = score_market(&ctx, &head, now()).expect("scorable");
    let full = score_market(&ctx, &padded, now()).expect("scorable");
    assert_eq!(bounded, full);
}

#[test]
fn test_rank_is_stable_and_descending() {
    let listings: Vec<MarketListing> = (0..5)
        .map(|i| MarketListing {
            context: by_date_context(&format!("m{i}")),
            snapshots: vec![snapshot_at(0.30 + 0.1 * i as f64, 8_000.0, 12_000.0, 5)],
        })
        .collect();

    let first = rank_markets(&listings, now());
    let second = rank_markets(&listings, now());
    assert_eq!(first, second);
    for pair in first.windows(2) {
        assert!(pair[0].composite_score >= pair[1].composite_score);
    }
}
