use std::path::PathBuf;

use thiserror::Error;

use crate::scenario::SECURITY_SUITE;

pub type Result<T> = std::result::Result<T, SmokeError>;

#[derive(Debug, Error)]
pub enum SmokeError {
	/// Selector named a suite this binary does not ship.
	#[error("Only '{}' suite is supported.", SECURITY_SUITE)]
	UnsupportedSuite { requested: String },

	#[error("browser launch failed: {0}")]
	BrowserLaunch(String),

	#[error("navigation failed: {url}")]
	Navigation {
		url: String,
		#[source]
		source: anyhow::Error,
	},

	#[error("browser query failed: {0}")]
	Browser(String),

	#[error("invalid configuration: {0}")]
	Config(String),

	#[error("failed to write report to {path}")]
	ReportWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Cdp(#[from] chromiumoxide::error::CdpError),
}

impl SmokeError {
	/// Returns true for the user-input error that is reported without the `Error:` prefix.
	pub fn is_unsupported_suite(&self) -> bool {
		matches!(self, SmokeError::UnsupportedSuite { .. })
	}

	/// Stable machine-readable code used in JSON output.
	pub fn code(&self) -> &'static str {
		match self {
			SmokeError::UnsupportedSuite { .. } => "UNSUPPORTED_SUITE",
			SmokeError::BrowserLaunch(_) => "BROWSER_LAUNCH_FAILED",
			SmokeError::Navigation { .. } => "NAVIGATION_FAILED",
			SmokeError::Browser(_) | SmokeError::Cdp(_) => "BROWSER_ERROR",
			SmokeError::Config(_) => "INVALID_CONFIG",
			SmokeError::ReportWrite { .. } => "IO_ERROR",
		}
	}

	/// Full message including the source chain, used for result-row notes and stderr.
	///
	/// `Navigation` only names the URL in its `Display`; the driver's reason lives in the source.
	pub fn detailed(&self) -> String {
		let mut msg = self.to_string();
		let mut source = std::error::Error::source(self);
		while let Some(err) = source {
			msg.push_str(": ");
			msg.push_str(&err.to_string());
			source = err.source();
		}
		msg
	}
}
