//! Kelly-criterion position sizing.
//!
//! For a binary contract priced at P in (0, 1) the net-odds ratio is
//! `b = (1 - P) / P` and the full Kelly fraction is `f* = (b*p - q) / b`.
//! The fraction is clamped to `[0, 0.25]`: never suggest more than a
//! quarter of bankroll regardless of model confidence.

use crate::domain::{Direction, SizeBucket, Tier};

/// Hard ceiling on the suggested bankroll fraction.
const KELLY_CAP: f64 = 0.25;

/// Clamped Kelly fraction for betting `direction` at `market_price` with
/// model probability `model_prob`.
///
/// A price outside the open interval (0, 1) means a degenerate or
/// resolved market; there is no sizing signal and the result is 0.
/// `Watch` carries no side to size, so it is also 0.
#[must_use]
pub fn kelly_fraction(model_prob: f64, market_price: f64, direction: Direction) -> f64 {
    let (p, price) = match direction {
        Direction::Yes => (model_prob, market_price),
        Direction::No => (1.0 - model_prob, 1.0 - market_price),
        Direction::Watch => return 0.0,
    };

    if price <= 0.0 || price >= 1.0 {
        return 0.0;
    }

    let b = (1.0 - price) / price;
    let kelly = (b * p - (1.0 - p)) / b;
    kelly.clamp(0.0, KELLY_CAP)
}

/// Map a Kelly fraction to a discrete size bucket.
///
/// Skip on a negligible fraction or a D-tier market; thin liquidity
/// overrides whatever the fraction implies and forces small.
#[must_use]
pub fn suggest_size(kelly: f64, tier: Tier, liquidity: f64) -> SizeBucket {
    if kelly < 0.02 || tier == Tier::D {
        return SizeBucket::Skip;
    }
    if liquidity < 5_000.0 {
        return SizeBucket::Small;
    }
    if kelly >= 0.15 && (tier == Tier::S || tier == Tier::A) {
        return SizeBucket::Large;
    }
    if kelly >= 0.08 {
        return SizeBucket::Medium;
    }
    SizeBucket::Small
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorable_odds_hit_the_cap() {
        // p=0.6, price=0.4: b=1.5, f* = (0.9 - 0.4) / 1.5 = 0.333 -> cap.
        let kelly = kelly_fraction(0.6, 0.4, Direction::Yes);
        assert_eq!(kelly, 0.25);
    }

    #[test]
    fn test_degenerate_prices_return_zero() {
        assert_eq!(kelly_fraction(0.6, 0.0, Direction::Yes), 0.0);
        assert_eq!(kelly_fraction(0.6, 1.0, Direction::Yes), 0.0);
        assert_eq!(kelly_fraction(0.6, 0.0, Direction::No), 0.0);
        assert_eq!(kelly_fraction(0.6, 1.0, Direction::No), 0.0);
    }

    #[test]
    fn test_watch_has_no_sizing_signal() {
        assert_eq!(kelly_fraction(0.9, 0.5, Direction::Watch), 0.0);
    }

    #[test]
    fn test_no_side_mirrors_the_probabilities() {
        // Betting NO at yes-price 0.8 with model_prob 0.6 is betting
        // p=0.4 at price 0.2: b=4, f* = (1.6 - 0.6) / 4 = 0.25.
        let kelly = kelly_fraction(0.6, 0.8, Direction::No);
        assert_eq!(kelly, 0.25);
    }

    #[test]
    fn test_negative_edge_floors_at_zero() {
        let kelly = kelly_fraction(0.3, 0.5, Direction::Yes);
        assert_eq!(kelly, 0.0);
    }

    #[test]
    fn test_output_always_within_cap() {
        for model in [0.0, 0.2, 0.5, 0.8, 1.0] {
            for price in [0.0, 0.1, 0.5, 0.9, 1.0] {
                for dir in [Direction::Yes, Direction::No, Direction::Watch] {
                    let k = kelly_fraction(model, price, dir);
                    assert!((0.0..=0.25).contains(&k), "kelly {k} out of range");
                }
            }
        }
    }

    #[test]
    fn test_size_buckets() {
        assert_eq!(suggest_size(0.01, Tier::S, 50_000.0), SizeBucket::Skip);
        assert_eq!(suggest_size(0.20, Tier::D, 50_000.0), SizeBucket::Skip);
        assert_eq!(suggest_size(0.20, Tier::S, 1_000.0), SizeBucket::Small);
        assert_eq!(suggest_size(0.20, Tier::S, 50_000.0), SizeBucket::Large);
        assert_eq!(suggest_size(0.20, Tier::B, 50_000.0), SizeBucket::Medium);
        assert_eq!(suggest_size(0.10, Tier::A, 50_000.0), SizeBucket::Medium);
        assert_eq!(suggest_size(0.05, Tier::B, 50_000.0), SizeBucket::Small);
    }
}
