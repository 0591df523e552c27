//! Scoring result types.
//!
//! [`AdvancedScore`] is the terminal, immutable result of one scoring pass
//! over a market: model output, detector readings, the signal list, sizing
//! advice, and the composite score with its tier. A fresh value is produced
//! on every call; no score is ever updated in place.
//!
//! Implements `Ord` on the composite score so batches of scores can be
//! ranked directly.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::MarketId;
use super::signal::{Direction, Momentum, OpportunitySignal};

/// Ordinal opportunity tier, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
}

impl Tier {
    /// Map a composite score in `[0, 100]` to its tier.
    ///
    /// Thresholds are fixed and non-overlapping: S >= 80, A >= 65,
    /// B >= 50, C >= 35, else D.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::S
        } else if score >= 65.0 {
            Self::A
        } else if score >= 50.0 {
            Self::B
        } else if score >= 35.0 {
            Self::C
        } else {
            Self::D
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Discrete position-size recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeBucket {
    Skip,
    Small,
    Medium,
    Large,
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Small => write!(f, "small"),
            Self::Medium => write!(f, "medium"),
            Self::Large => write!(f, "large"),
        }
    }
}

/// How close a time-bound market is to its resolution deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineUrgency {
    /// Fewer than 7 days remain.
    Critical,
    /// Fewer than 30 days remain.
    Urgent,
    /// Fewer than 90 days remain.
    Moderate,
    /// 90 days or more remain.
    Distant,
    /// No deadline is known.
    Unknown,
}

/// Output of the probability-adjustment model.
///
/// Invariant: `delay_risk` is always the normalized magnitude of the
/// penalty that produced `model_prob` from the market probability, never
/// an independently chosen value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Model-adjusted probability in `[0, 1]`.
    pub model_prob: f64,
    /// Normalized delay penalty in `[0, 1]`.
    pub delay_risk: f64,
    /// Model confidence in `[0, 1]`.
    pub confidence: f64,
    /// Human-readable adjustment trail.
    pub rationale: Vec<String>,
}

/// Detector readings carried on the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorReadings {
    /// Standard deviations of current volume above its historical mean.
    pub volume_z_score: f64,
    /// Whether current volume is an upward anomaly (z > 2).
    pub is_volume_spike: bool,
    /// Price change over the trailing 1-hour window.
    pub velocity_1h: f64,
    /// Price change over the trailing 24-hour window.
    pub velocity_24h: f64,
    /// Instantaneous rate minus the hourly rate implied by the 24h move.
    pub acceleration: f64,
    /// Normalized participation estimate in `[0, 1]`.
    pub attention: f64,
    /// Population standard deviation of recent yes-prices.
    pub volatility: f64,
}

/// The terminal result of one scoring pass over a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedScore {
    pub market_id: MarketId,
    pub title: String,
    /// Market-implied probability (current yes-price).
    pub market_prob: f64,
    /// Probability-adjustment model output.
    pub model: ModelOutput,
    /// `model_prob - market_prob`; sign indicates mispricing direction.
    pub edge: f64,
    /// Side implied by the edge sign.
    pub edge_direction: Direction,
    /// Whether the listing reads as a time-bound ("by-date") market.
    pub is_by_date: bool,
    /// Days until the resolution deadline, if one is known.
    pub time_remaining_days: Option<f64>,
    pub urgency: DeadlineUrgency,
    pub momentum: Momentum,
    pub readings: DetectorReadings,
    /// All signals emitted this pass, strongest first.
    pub signals: Vec<OpportunitySignal>,
    /// Strongest signal, if any fired.
    pub primary_signal: Option<OpportunitySignal>,
    /// Clamped Kelly bankroll fraction in `[0, 0.25]`.
    pub kelly_fraction: f64,
    pub suggested_size: SizeBucket,
    /// Composite opportunity score in `[0, 100]`.
    pub composite_score: f64,
    pub tier: Tier,
    /// The `now` this score was computed against.
    pub scored_at: DateTime<Utc>,
}

impl AdvancedScore {
    /// Returns the market ID.
    #[must_use]
    pub fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    /// Returns the composite score.
    #[must_use]
    pub fn composite(&self) -> f64 {
        self.composite_score
    }
}

impl Eq for AdvancedScore {}

impl PartialOrd for AdvancedScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AdvancedScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.composite_score
            .partial_cmp(&other.composite_score)
            .unwrap_or(Ordering::Equal)
            // Deterministic tie-break so ranked output is stable.
            .then_with(|| other.market_id.cmp(&self.market_id))
    }
}
