//! Opportunity signal types.
//!
//! A scoring pass may emit zero or more [`OpportunitySignal`]s, each a
//! tagged, directional, confidence-weighted observation about a market.
//! Signals are ranked by `strength * confidence`; the strongest one is
//! surfaced as the "primary" signal on the final score.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of opportunity a signal describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    /// A time-bound market priced as if resolution were certain to be on time.
    DeadlineOverpriced,
    /// Confirmed directional move worth following.
    MomentumEntry,
    /// Mispricing in a market nobody is watching.
    AttentionArbitrage,
    /// Volume spike without a price move - something may be brewing.
    VolumePrecursor,
    /// Overextended move likely to snap back.
    MeanReversion,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DeadlineOverpriced => "deadline-overpriced",
            Self::MomentumEntry => "momentum-entry",
            Self::AttentionArbitrage => "attention-arbitrage",
            Self::VolumePrecursor => "volume-precursor",
            Self::MeanReversion => "mean-reversion",
        };
        write!(f, "{name}")
    }
}

/// Which side of the market a signal points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Yes,
    No,
    /// No actionable side yet; keep the market on a watchlist.
    Watch,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "YES"),
            Self::No => write!(f, "NO"),
            Self::Watch => write!(f, "WATCH"),
        }
    }
}

/// Price momentum regime, as classified from velocity and volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Momentum {
    Bullish,
    Bearish,
    Neutral,
}

impl Momentum {
    /// Whether the regime is directional (not neutral).
    #[must_use]
    pub fn is_directional(self) -> bool {
        self != Self::Neutral
    }
}

impl fmt::Display for Momentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// A single directional opportunity observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunitySignal {
    pub kind: SignalKind,
    pub direction: Direction,
    /// How large the opportunity looks, normalized to `[0, 1]` for most
    /// signal kinds.
    pub strength: f64,
    /// How much to trust this signal, in `[0, 1]`.
    pub confidence: f64,
    /// Human-readable reasons this signal fired.
    pub rationale: Vec<String>,
}

impl OpportunitySignal {
    /// Ranking weight: `strength * confidence`.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.strength * self.confidence
    }
}
