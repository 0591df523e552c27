//! Market listing types consumed by the scoring engine.
//!
//! - [`MarketContext`] - Identity and descriptive attributes of a listing
//! - [`MarketSnapshot`] - One point-in-time observation of prices and activity
//!
//! A market owns an ordered sequence of snapshots, **newest first**. The
//! engine only ever reads a bounded prefix of that sequence and never
//! mutates it; both types are plain records that cross the CLI boundary
//! as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::MarketId;

/// A point-in-time observation of a market.
///
/// Prices are probabilities in `[0, 1]`; a missing `yes_price` means the
/// feed did not quote one at capture time. Volume and liquidity are
/// non-negative dollar figures; the price-change fields are signed
/// fractions over the trailing window they name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// When this observation was captured.
    pub captured_at: DateTime<Utc>,
    /// Quoted YES probability, if the feed had one.
    pub yes_price: Option<f64>,
    /// Quoted NO probability, if the feed had one.
    pub no_price: Option<f64>,
    /// Trading volume over the trailing 24 hours.
    pub volume_24h: f64,
    /// Available liquidity at capture time.
    pub liquidity: f64,
    /// Signed price change over the trailing hour.
    #[serde(default)]
    pub price_change_1h: f64,
    /// Signed price change over the trailing 24 hours.
    #[serde(default)]
    pub price_change_24h: f64,
}

impl MarketSnapshot {
    /// Create a snapshot with the given prices and activity figures.
    #[must_use]
    pub fn new(
        captured_at: DateTime<Utc>,
        yes_price: Option<f64>,
        volume_24h: f64,
        liquidity: f64,
    ) -> Self {
        Self {
            captured_at,
            yes_price,
            no_price: yes_price.map(|p| 1.0 - p),
            volume_24h,
            liquidity,
            price_change_1h: 0.0,
            price_change_24h: 0.0,
        }
    }
}

/// Identity and descriptive attributes of a market.
///
/// Supplied once per scoring call; the engine holds no long-lived
/// reference to it - each call is a stateless transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Unique market identifier.
    pub id: MarketId,
    /// Listing title, e.g. "Will X happen by March 2026?".
    pub title: String,
    /// Free-text resolution rules, if any.
    #[serde(default)]
    pub rules: Option<String>,
    /// Free-text description, if any.
    #[serde(default)]
    pub description: Option<String>,
    /// Category label, e.g. "Crypto" or "Politics".
    #[serde(default)]
    pub category: Option<String>,
    /// Structured resolution deadline, if the feed provides one.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl MarketContext {
    /// Create a context with only the required fields set.
    pub fn new(id: MarketId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            rules: None,
            description: None,
            category: None,
            end_date: None,
        }
    }
}

/// A market listing as it arrives from a listing file: context plus its
/// snapshot history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketListing {
    #[serde(flatten)]
    pub context: MarketContext,
    /// Snapshot history, newest first.
    #[serde(default)]
    pub snapshots: Vec<MarketSnapshot>,
}
