//! The `config validate` command.

use crate::cli::{output, ValidateArgs};
use crate::config::Config;
use crate::error::Result;

/// Validate a configuration file and report what it resolves to.
pub fn validate(args: &ValidateArgs) -> Result<()> {
    let config = Config::load(&args.config)?;

    output::ok(&format!("{} is valid", args.config.display()));
    output::key_value("logging.level", &config.logging.level);
    output::key_value("logging.format", &config.logging.format);
    output::key_value("scoring.max_snapshots", config.scoring.max_snapshots);
    output::key_value("scoring.top", config.scoring.top);
    Ok(())
}
