use anyhow::Result;
use clap::Parser;

use oddslens::cli::{check, score, Cli, Commands, ConfigCommand};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Score(args) => score::run(args)?,
        Commands::Config(ConfigCommand::Validate(args)) => check::validate(args)?,
    }

    Ok(())
}
