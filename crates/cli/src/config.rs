//! Run configuration resolved from CLI flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::browser::{SessionConfig, WaitSettings};
use crate::cli::Cli;
use crate::error::{Result, SmokeError};
use crate::scenario::Suite;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5173";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_POLL_MS: u64 = 100;

/// Report location relative to the invoking user's home directory.
pub const REPORT_HOME_RELATIVE: &str = ".verdent/testing/issues/security_report.md";

#[derive(Debug, Clone)]
pub struct RunConfig {
	pub suite: String,
	pub base_url: Url,
	pub report_path: PathBuf,
	pub wait: WaitSettings,
	pub session: SessionConfig,
	pub scenarios_file: Option<PathBuf>,
}

impl RunConfig {
	pub fn from_cli(cli: &Cli) -> Result<Self> {
		let report_path = match &cli.report {
			Some(path) => path.clone(),
			None => default_report_path()?,
		};

		Ok(Self {
			suite: cli.suite.clone(),
			base_url: parse_base_url(&cli.base_url)?,
			report_path,
			wait: WaitSettings {
				timeout: Duration::from_millis(cli.timeout),
				poll: Duration::from_millis(cli.poll),
			},
			session: SessionConfig {
				headless: !cli.headed,
				chrome_executable: cli.chrome.clone(),
				..SessionConfig::default()
			},
			scenarios_file: cli.scenarios.clone(),
		})
	}

	/// Returns the scenario list: the `--scenarios` file when given, else the built-in suite.
	pub fn load_suite(&self) -> Result<Suite> {
		let suite = match &self.scenarios_file {
			Some(path) => Suite::from_file(path)?,
			None => Suite::builtin(&self.suite)
				.ok_or_else(|| SmokeError::UnsupportedSuite { requested: self.suite.clone() })?,
		};

		if suite.name != self.suite {
			return Err(SmokeError::Config(format!(
				"scenario file defines suite '{}' but '{}' was selected",
				suite.name, self.suite
			)));
		}
		Ok(suite)
	}
}

pub fn default_report_path() -> Result<PathBuf> {
	dirs::home_dir()
		.map(|home| report_path_under(&home))
		.ok_or_else(|| SmokeError::Config("cannot determine home directory for the report path".into()))
}

fn report_path_under(home: &Path) -> PathBuf {
	home.join(REPORT_HOME_RELATIVE)
}

fn parse_base_url(raw: &str) -> Result<Url> {
	let url = Url::parse(raw).map_err(|e| SmokeError::Config(format!("invalid base URL '{raw}': {e}")))?;
	match url.scheme() {
		"http" | "https" => Ok(url),
		other => Err(SmokeError::Config(format!(
			"base URL '{raw}' must use http or https, not {other}"
		))),
	}
}
