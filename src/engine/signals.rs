//! Opportunity signal generation.
//!
//! Five independent rules, each a boolean gate with fixed thresholds over
//! the model and detector outputs. Rules are evaluated in a fixed order
//! as (predicate, builder) pairs behind the [`SignalRule`] trait, then the
//! emitted signals are sorted by `strength * confidence` descending; a
//! market may trigger anywhere from zero to all five in one pass.
//!
//! New signal kinds slot in by adding a rule to [`rules`] without touching
//! the existing ones.

use crate::domain::{Direction, Momentum, OpportunitySignal, SignalKind};

/// Everything the signal rules read. One immutable bundle per scoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalInputs {
    /// Model probability minus market probability.
    pub edge: f64,
    /// Side implied by the edge sign.
    pub edge_direction: Direction,
    /// Normalized delay penalty from the probability model.
    pub delay_risk: f64,
    /// Whether the listing reads as time-bound.
    pub is_by_date: bool,
    /// Normalized participation estimate.
    pub attention: f64,
    /// Volume z-score against history.
    pub volume_z: f64,
    /// Whether volume is an upward anomaly.
    pub is_volume_spike: bool,
    /// Classified momentum regime.
    pub momentum: Momentum,
    /// Price change over the trailing 24h window.
    pub velocity_24h: f64,
    /// Days to deadline, if known.
    pub time_remaining_days: Option<f64>,
    /// Current liquidity.
    pub liquidity: f64,
}

/// A single signal rule: a predicate plus a builder.
trait SignalRule {
    fn kind(&self) -> SignalKind;

    /// Whether the rule's gate is open for these inputs.
    fn applies(&self, inputs: &SignalInputs) -> bool;

    /// Build the signal. Only called when `applies` returned true.
    fn build(&self, inputs: &SignalInputs) -> OpportunitySignal;
}

/// Classify the momentum regime from velocities and volume.
///
/// The strong, volume-confirmed regime takes precedence; a weaker
/// 24h-only move classifies second; everything else is neutral.
#[must_use]
pub fn detect_momentum(velocity_1h: f64, velocity_24h: f64, volume_z: f64) -> Momentum {
    if velocity_1h > 0.02 && velocity_24h > 0.03 && volume_z > 1.0 {
        Momentum::Bullish
    } else if velocity_1h < -0.02 && velocity_24h < -0.03 && volume_z > 1.0 {
        Momentum::Bearish
    } else if velocity_24h > 0.05 {
        Momentum::Bullish
    } else if velocity_24h < -0.05 {
        Momentum::Bearish
    } else {
        Momentum::Neutral
    }
}

/// Evaluate every rule in fixed order and rank the emitted signals by
/// `strength * confidence`, strongest first.
#[must_use]
pub fn generate_signals(inputs: &SignalInputs) -> Vec<OpportunitySignal> {
    let mut signals: Vec<OpportunitySignal> = rules()
        .iter()
        .filter(|rule| rule.applies(inputs))
        .map(|rule| rule.build(inputs))
        .collect();

    signals.sort_by(|a, b| {
        b.weight()
            .partial_cmp(&a.weight())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    signals
}

fn rules() -> [&'static dyn SignalRule; 5] {
    [
        &DeadlineOverpriced,
        &MomentumEntry,
        &AttentionArbitrage,
        &VolumePrecursor,
        &MeanReversion,
    ]
}

/// Time-bound market priced as if on-time resolution were certain.
struct DeadlineOverpriced;

impl SignalRule for DeadlineOverpriced {
    fn kind(&self) -> SignalKind {
        SignalKind::DeadlineOverpriced
    }

    fn applies(&self, i: &SignalInputs) -> bool {
        i.is_by_date && i.delay_risk > 0.5 && i.edge < -0.05
    }

    fn build(&self, i: &SignalInputs) -> OpportunitySignal {
        let mut rationale = vec![format!(
            "market overprices on-time resolution by {:.0}%",
            i.edge.abs() * 100.0
        )];
        if let Some(days) = i.time_remaining_days {
            rationale.push(format!("{days:.1} days left with high delay risk"));
        }
        OpportunitySignal {
            kind: self.kind(),
            direction: Direction::No,
            strength: (i.edge.abs() * 5.0).min(1.0),
            confidence: 0.7 + i.delay_risk * 0.2,
            rationale,
        }
    }
}

/// Volume-confirmed directional move worth following.
struct MomentumEntry;

impl SignalRule for MomentumEntry {
    fn kind(&self) -> SignalKind {
        SignalKind::MomentumEntry
    }

    fn applies(&self, i: &SignalInputs) -> bool {
        i.momentum.is_directional() && i.is_volume_spike && i.velocity_24h.abs() > 0.08
    }

    fn build(&self, i: &SignalInputs) -> OpportunitySignal {
        let direction = if i.momentum == Momentum::Bullish {
            Direction::Yes
        } else {
            Direction::No
        };
        OpportunitySignal {
            kind: self.kind(),
            direction,
            strength: (i.velocity_24h.abs() * 5.0).min(1.0),
            confidence: 0.6 + i.volume_z * 0.1,
            rationale: vec![format!(
                "{} move of {:.0}% on spiking volume (z={:.1})",
                i.momentum,
                i.velocity_24h.abs() * 100.0,
                i.volume_z
            )],
        }
    }
}

/// Mispricing in a market nobody is watching yet.
struct AttentionArbitrage;

impl SignalRule for AttentionArbitrage {
    fn kind(&self) -> SignalKind {
        SignalKind::AttentionArbitrage
    }

    fn applies(&self, i: &SignalInputs) -> bool {
        i.attention < 0.3 && i.edge.abs() > 0.08
    }

    fn build(&self, i: &SignalInputs) -> OpportunitySignal {
        OpportunitySignal {
            kind: self.kind(),
            direction: i.edge_direction,
            // Deliberately unclamped: a huge edge in a sleepy market
            // should outrank everything else.
            strength: i.edge.abs() * 3.0,
            confidence: 0.65,
            rationale: vec![format!(
                "{:.0}% edge with little attention (${:.0} liquidity)",
                i.edge.abs() * 100.0,
                i.liquidity
            )],
        }
    }
}

/// Volume spike without a price move - positioning before news.
struct VolumePrecursor;

impl SignalRule for VolumePrecursor {
    fn kind(&self) -> SignalKind {
        SignalKind::VolumePrecursor
    }

    fn applies(&self, i: &SignalInputs) -> bool {
        i.is_volume_spike && i.velocity_24h.abs() < 0.03
    }

    fn build(&self, i: &SignalInputs) -> OpportunitySignal {
        OpportunitySignal {
            kind: self.kind(),
            direction: Direction::Watch,
            strength: i.volume_z / 4.0,
            confidence: 0.5,
            rationale: vec![format!(
                "volume z={:.1} with flat price: possible positioning ahead of news",
                i.volume_z
            )],
        }
    }
}

/// Overextended move on frantic volume, likely to snap back.
struct MeanReversion;

impl SignalRule for MeanReversion {
    fn kind(&self) -> SignalKind {
        SignalKind::MeanReversion
    }

    fn applies(&self, i: &SignalInputs) -> bool {
        i.velocity_24h.abs() > 0.15 && i.volume_z > 2.5
    }

    fn build(&self, i: &SignalInputs) -> OpportunitySignal {
        // Contrarian: fade the move.
        let direction = if i.velocity_24h > 0.0 {
            Direction::No
        } else {
            Direction::Yes
        };
        OpportunitySignal {
            kind: self.kind(),
            direction,
            strength: (i.velocity_24h.abs() * 3.0).min(1.0),
            confidence: 0.55,
            rationale: vec![format!(
                "{:.0}% move in 24h on z={:.1} volume looks overextended",
                i.velocity_24h.abs() * 100.0,
                i.volume_z
            )],
        }
    }
}
