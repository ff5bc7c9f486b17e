use std::path::PathBuf;
use std::time::Duration;

/// Fully owned browser-session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
	/// Whether the browser launches headless.
	pub headless: bool,
	/// Explicit Chromium binary; auto-detected when `None`.
	pub chrome_executable: Option<PathBuf>,
	/// Upper bound for a single CDP request, navigation included.
	pub request_timeout: Duration,
	/// How long shutdown waits for the browser process to exit after closing it.
	pub close_timeout: Duration,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			headless: true,
			chrome_executable: None,
			request_timeout: Duration::from_secs(30),
			close_timeout: Duration::from_secs(5),
		}
	}
}
