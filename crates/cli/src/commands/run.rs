use tracing::info;

use crate::browser::{ChromiumLauncher, SessionLauncher, with_session};
use crate::config::RunConfig;
use crate::error::Result;
use crate::executor::run_suite;
use crate::output::RunSummary;
use crate::scenario::Suite;

/// Runs `suite` in a real Chromium session.
pub async fn run(config: RunConfig, suite: Suite) -> Result<RunSummary> {
	let launcher = ChromiumLauncher::new(config.session.clone());
	run_with(&launcher, config, suite).await
}

/// Acquires a session, runs every scenario, releases the session, then writes the report.
pub async fn run_with<L>(launcher: &L, config: RunConfig, suite: Suite) -> Result<RunSummary>
where
	L: SessionLauncher + ?Sized,
{
	info!(
		target = "pw-smoke",
		suite = %suite.name,
		scenarios = suite.scenarios.len(),
		base_url = %config.base_url,
		"starting run"
	);

	let suite_name = suite.name.clone();
	let base_url = config.base_url.clone();
	let wait = config.wait;

	let report = with_session(launcher, move |session| {
		Box::pin(async move { Ok(run_suite(session, &suite, &base_url, wait).await) })
	})
	.await?;

	report.write_to(&config.report_path)?;
	info!(target = "pw-smoke", path = %config.report_path.display(), "report written");

	Ok(RunSummary::new(suite_name, config.report_path, &report))
}
