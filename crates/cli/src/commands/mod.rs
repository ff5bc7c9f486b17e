//! Command dispatch: suite selection, then the browser run.

mod run;

pub use run::run;

use crate::cli::Cli;
use crate::config::RunConfig;
use crate::error::{Result, SmokeError};
use crate::output::RunSummary;
use crate::scenario::SECURITY_SUITE;

/// Validates the suite selector and runs it.
///
/// Unsupported selectors are rejected before any configuration is resolved,
/// so they never launch a browser or touch the report file.
pub async fn dispatch(cli: Cli) -> Result<RunSummary> {
	if cli.suite != SECURITY_SUITE {
		return Err(SmokeError::UnsupportedSuite { requested: cli.suite });
	}

	let config = RunConfig::from_cli(&cli)?;
	let suite = config.load_suite()?;
	run(config, suite).await
}
