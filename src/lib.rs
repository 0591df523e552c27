//! Oddslens - explainable opportunity scoring for prediction markets.
//!
//! This crate analyzes prediction-market listings (an outcome priced
//! between 0 and 1, with volume, liquidity, and an optional resolution
//! deadline) and produces a ranked, explainable opportunity score per
//! market.
//!
//! # Architecture
//!
//! The engine is a strictly forward pipeline of pure functions:
//!
//! raw market + snapshot history
//!   -> deadline extraction ([`engine::deadline`])
//!   -> probability adjustment ([`engine::model`])
//!   -> statistical detectors ([`engine::stats`])
//!   -> signal generation ([`engine::signals`])
//!   -> composite score and tier ([`engine::composite`])
//!   -> Kelly position sizing ([`engine::kelly`])
//!   -> [`domain::AdvancedScore`]
//!
//! No stage mutates shared state, performs I/O, or reads the ambient
//! clock; "now" is an explicit argument, so identical inputs always
//! produce identical output. Fetching listings, persisting scores, and
//! rendering them are external collaborators.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Listing input types and scoring result types
//! - [`engine`] - The scoring pipeline and its detectors
//! - [`error`] - Error types for the crate's edges
//! - [`cli`] - The `oddslens` command-line harness
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use oddslens::domain::{MarketContext, MarketId, MarketSnapshot};
//! use oddslens::engine::score_market;
//!
//! let context = MarketContext::new(MarketId::from("mkt-1"), "Will X ship by March 31, 2026?");
//! let snapshots = vec![MarketSnapshot::new(Utc::now(), Some(0.35), 12_000.0, 8_000.0)];
//!
//! if let Some(score) = score_market(&context, &snapshots, Utc::now()) {
//!     println!("{} tier {} score {:.1}", score.market_id, score.tier, score.composite_score);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
