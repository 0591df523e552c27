//! Exchange-agnostic domain types for market scoring.

mod ids;
mod market;
mod score;
mod signal;

pub use ids::MarketId;
pub use market::{MarketContext, MarketListing, MarketSnapshot};
pub use score::{AdvancedScore, DeadlineUrgency, DetectorReadings, ModelOutput, SizeBucket, Tier};
pub use signal::{Direction, Momentum, OpportunitySignal, SignalKind};
