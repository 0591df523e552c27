//! The `score` command: rank a listing file.

use chrono::Utc;
use tabled::{Table, Tabled};
use tracing::info;

use crate::cli::{output, OutputFormat, ScoreArgs};
use crate::config::Config;
use crate::domain::{AdvancedScore, MarketListing};
use crate::engine::rank_markets;
use crate::error::{InputError, Result};

#[derive(Tabled)]
struct ScoreRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Edge")]
    edge: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Kelly")]
    kelly: String,
    #[tabled(rename = "Size")]
    size: String,
}

impl ScoreRow {
    fn from_score(rank: usize, score: &AdvancedScore) -> Self {
        let signal = score
            .primary_signal
            .as_ref()
            .map(|s| format!("{} {}", s.kind, s.direction))
            .unwrap_or_else(|| "-".to_string());
        Self {
            rank,
            market: truncate(&score.title, 40),
            price: format!("{:.2}", score.market_prob),
            model: format!("{:.2}", score.model.model_prob),
            edge: format!("{:+.2}", score.edge),
            score: format!("{:.1}", score.composite_score),
            tier: score.tier.to_string(),
            signal,
            kelly: format!("{:.1}%", score.kelly_fraction * 100.0),
            size: score.suggested_size.to_string(),
        }
    }
}

/// Score every listing in the input file and print the ranking.
pub fn run(args: &ScoreArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    config.logging.init();
    let top = args.top.unwrap_or(config.scoring.top);

    let mut listings = read_listings(args)?;
    for listing in &mut listings {
        listing.snapshots.truncate(config.scoring.max_snapshots);
    }

    // One clock read for the whole batch keeps the ranking internally
    // consistent.
    let now = Utc::now();
    let scores = rank_markets(&listings, now);
    info!(
        listings = listings.len(),
        scored = scores.len(),
        "scoring pass complete"
    );

    let shown = &scores[..scores.len().min(top)];
    match args.format {
        OutputFormat::Json => {
            for score in shown {
                println!("{}", serde_json::to_string(score).unwrap_or_default());
            }
        }
        OutputFormat::Table => render_table(shown, listings.len()),
    }

    Ok(())
}

fn read_listings(args: &ScoreArgs) -> Result<Vec<MarketListing>> {
    let content = std::fs::read_to_string(&args.input).map_err(|source| InputError::ReadFile {
        path: args.input.clone(),
        source,
    })?;
    let listings =
        serde_json::from_str(&content).map_err(|source| InputError::Parse {
            path: args.input.clone(),
            source,
        })?;
    Ok(listings)
}

fn render_table(scores: &[AdvancedScore], total: usize) {
    output::section("Ranked opportunities");
    if scores.is_empty() {
        output::note("no scorable markets in input");
        return;
    }

    let rows: Vec<ScoreRow> = scores
        .iter()
        .enumerate()
        .map(|(i, score)| ScoreRow::from_score(i + 1, score))
        .collect();
    let table = Table::new(rows).to_string();
    for line in table.lines() {
        println!("  {line}");
    }

    println!();
    output::key_value("Markets scored", format!("{} of {total}", scores.len()));
    if let Some(best) = scores.first() {
        output::key_value("Top rationale", best.model.rationale.join("; "));
    }
    println!();
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{prefix}…")
    }
}
