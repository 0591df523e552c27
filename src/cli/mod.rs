//! Command-line interface definitions.

pub mod check;
pub mod output;
pub mod score;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Oddslens - explainable opportunity scoring for prediction markets.
#[derive(Parser, Debug)]
#[command(name = "oddslens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a listing file and print the ranked markets
    Score(ScoreArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(clap::Args, Debug)]
pub struct ScoreArgs {
    /// JSON file of market listings (context + newest-first snapshots)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Show only the top N markets (overrides the config value)
    #[arg(long)]
    pub top: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to config file
    #[arg(long, default_value = "oddslens.toml")]
    pub config: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Subcommands for `oddslens config`
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Path to config file
    #[arg(long, default_value = "oddslens.toml")]
    pub config: PathBuf,
}
