//! Bounded condition polling.
//!
//! Replaces fixed settle sleeps after navigation: a [`PageCondition`] is
//! re-evaluated every `poll` interval until it holds or `timeout` elapses.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::debug;

use super::driver::{Locator, PageDriver};
use crate::error::{Result, SmokeError};

/// Bounds for [`wait_until`]. Defaults come from the `--timeout` and `--poll` flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitSettings {
	pub timeout: Duration,
	pub poll: Duration,
}

/// Holds when the location contains any of `url_contains`, or any of `visible` is visible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageCondition {
	pub url_contains: Vec<String>,
	pub visible: Vec<Locator>,
}

impl PageCondition {
	pub fn is_empty(&self) -> bool {
		self.url_contains.is_empty() && self.visible.is_empty()
	}

	/// Evaluates the condition once against the current page.
	pub async fn holds<D: PageDriver + ?Sized>(&self, driver: &D) -> Result<bool> {
		if !self.url_contains.is_empty() {
			let url = driver.current_url().await?;
			if self.url_contains.iter().any(|fragment| url.contains(fragment.as_str())) {
				return Ok(true);
			}
		}

		for locator in &self.visible {
			if driver.is_visible(locator).await? {
				return Ok(true);
			}
		}

		Ok(false)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitOutcome {
	Satisfied { waited: Duration },
	TimedOut { waited: Duration },
}

impl WaitOutcome {
	pub fn is_satisfied(&self) -> bool {
		matches!(self, WaitOutcome::Satisfied { .. })
	}
}

/// Polls `condition` until it holds or the timeout elapses.
///
/// Query errors are tolerated while polling since the page may still be
/// navigating. If the final attempt before the deadline errored, that error
/// is returned instead of a timeout verdict.
pub async fn wait_until<D: PageDriver + ?Sized>(driver: &D, condition: &PageCondition, settings: WaitSettings) -> Result<WaitOutcome> {
	let start = Instant::now();

	loop {
		let last_err: Option<SmokeError> = match condition.holds(driver).await {
			Ok(true) => {
				return Ok(WaitOutcome::Satisfied { waited: start.elapsed() });
			}
			Ok(false) => None,
			Err(err) => {
				debug!(target = "pw-smoke", error = %err, "condition query failed, retrying");
				Some(err)
			}
		};

		let waited = start.elapsed();
		if waited >= settings.timeout {
			return match last_err {
				Some(err) => Err(err),
				None => Ok(WaitOutcome::TimedOut { waited }),
			};
		}

		sleep(settings.poll.min(settings.timeout - waited)).await;
	}
}
