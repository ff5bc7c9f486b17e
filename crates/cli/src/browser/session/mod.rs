mod config;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tempfile::TempDir;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

pub use config::SessionConfig;

use super::driver::{Locator, PageDriver, SessionLauncher};
use super::js::visibility_js;
use crate::error::{Result, SmokeError};

/// Chromium process plus the single page every scenario shares.
///
/// The browser runs on a throwaway profile directory that is removed when the
/// session is dropped. Prefer [`with_session`], which closes the browser on
/// every exit path; dropping a session without [`BrowserSession::shutdown`]
/// still stops the CDP event loop, and chromiumoxide kills the child process.
pub struct BrowserSession {
	browser: Mutex<Browser>,
	page: Mutex<Page>,
	handler: JoinHandle<()>,
	close_timeout: Duration,
	_profile: TempDir,
}

impl BrowserSession {
	/// Launches Chromium and opens a blank page. No retry: failures are fatal to the run.
	pub async fn launch(config: &SessionConfig) -> Result<Self> {
		debug!(
			target = "pw-smoke",
			headless = config.headless,
			executable = ?config.chrome_executable,
			"launching chromium..."
		);

		let profile = tempfile::Builder::new()
			.prefix("pw-smoke-profile-")
			.tempdir()
			.map_err(|e| SmokeError::BrowserLaunch(format!("failed to create profile directory: {e}")))?;

		let mut builder = BrowserConfig::builder()
			.user_data_dir(profile.path())
			.request_timeout(config.request_timeout)
			.arg("--no-first-run")
			.arg("--no-default-browser-check")
			.arg("--disable-gpu")
			.arg("--disable-extensions")
			.arg("--disable-dev-shm-usage");
		if !config.headless {
			builder = builder.with_head();
		}
		if let Some(path) = &config.chrome_executable {
			builder = builder.chrome_executable(path);
		}
		let browser_config = builder.build().map_err(|e| SmokeError::BrowserLaunch(e.to_string()))?;

		let (browser, mut events) = Browser::launch(browser_config)
			.await
			.map_err(|e| SmokeError::BrowserLaunch(e.to_string()))?;

		let handler = tokio::spawn(async move {
			while let Some(event) = events.next().await {
				if let Err(err) = event {
					debug!(target = "pw-smoke", error = %err, "cdp handler error");
				}
			}
		});

		let page = match browser.new_page("about:blank").await {
			Ok(page) => page,
			Err(err) => {
				handler.abort();
				return Err(SmokeError::BrowserLaunch(format!("failed to open page: {err}")));
			}
		};

		Ok(Self {
			browser: Mutex::new(browser),
			page: Mutex::new(page),
			handler,
			close_timeout: config.close_timeout,
			_profile: profile,
		})
	}

	/// Closes the browser and waits for the process to exit before the profile is removed.
	///
	/// A process that outlives `close_timeout` is left to chromiumoxide, which kills it on drop.
	pub async fn shutdown(self) -> Result<()> {
		let mut browser = self.browser.lock().await;
		browser.close().await?;

		match timeout(self.close_timeout, browser.wait()).await {
			Ok(Ok(status)) => debug!(target = "pw-smoke", ?status, "browser exited"),
			Ok(Err(err)) => warn!(target = "pw-smoke", error = %err, "failed to wait for browser exit"),
			Err(_) => warn!(
				target = "pw-smoke",
				timeout = ?self.close_timeout,
				"browser did not exit in time, killing it"
			),
		}
		Ok(())
	}
}

impl Drop for BrowserSession {
	fn drop(&mut self) {
		self.handler.abort();
	}
}

#[async_trait]
impl PageDriver for BrowserSession {
	async fn goto(&self, url: &str) -> Result<()> {
		let page = self.page.lock().await;
		page.goto(url).await.map_err(|e| SmokeError::Navigation {
			url: url.to_string(),
			source: anyhow::Error::new(e),
		})?;
		Ok(())
	}

	async fn current_url(&self) -> Result<String> {
		let page = self.page.lock().await;
		Ok(page.url().await?.unwrap_or_else(|| "about:blank".to_string()))
	}

	async fn is_visible(&self, locator: &Locator) -> Result<bool> {
		let page = self.page.lock().await;
		let result = page.evaluate(visibility_js(locator)).await?;
		result
			.into_value::<bool>()
			.map_err(|e| SmokeError::Browser(format!("visibility query for {locator} returned a non-boolean: {e}")))
	}
}

/// Launches real Chromium sessions from a [`SessionConfig`].
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
	config: SessionConfig,
}

impl ChromiumLauncher {
	pub fn new(config: SessionConfig) -> Self {
		Self { config }
	}
}

#[async_trait]
impl SessionLauncher for ChromiumLauncher {
	type Session = BrowserSession;

	async fn launch(&self) -> Result<BrowserSession> {
		BrowserSession::launch(&self.config).await
	}

	async fn close(&self, session: BrowserSession) -> Result<()> {
		session.shutdown().await
	}
}

/// Runs `f` with a freshly launched session and closes it afterwards, whatever `f` returned.
///
/// A close failure after the body is logged rather than returned so the run's
/// results are never lost to teardown.
pub async fn with_session<L, T>(
	launcher: &L,
	f: impl for<'s> FnOnce(&'s L::Session) -> Pin<Box<dyn Future<Output = Result<T>> + Send + 's>>,
) -> Result<T>
where
	L: SessionLauncher + ?Sized,
{
	let session = launcher.launch().await?;

	let res = f(&session).await;

	if let Err(err) = launcher.close(session).await {
		warn!(target = "pw-smoke", error = %err, "failed to close browser cleanly");
	}

	res
}
