//! Scripted in-memory page used by unit tests in place of Chromium.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::browser::{Locator, PageDriver, SessionLauncher};
use crate::error::{Result, SmokeError};

#[derive(Clone, Debug)]
struct Redirect {
	target: String,
	after_reads: usize,
}

#[derive(Default)]
struct State {
	url: String,
	reads_since_goto: usize,
	pending: Option<Redirect>,
	visits: Vec<String>,
}

/// A page whose navigation results are configured up front.
///
/// Rules are keyed by path suffix of the navigated URL.
#[derive(Default)]
pub struct ScriptedPage {
	state: Mutex<State>,
	redirects: HashMap<String, Redirect>,
	visible: Vec<Locator>,
	nav_failures: HashMap<String, String>,
	query_failure: Option<String>,
	panics: Vec<String>,
}

impl ScriptedPage {
	pub fn new() -> Self {
		let page = Self::default();
		page.state.lock().unwrap().url = "about:blank".into();
		page
	}

	/// Navigating to `path` ends up at `target` immediately.
	pub fn redirect(self, path: &str, target: &str) -> Self {
		self.redirect_after(path, target, 0)
	}

	/// Navigating to `path` ends up at `target` once the location has been read `after_reads` times.
	pub fn redirect_after(mut self, path: &str, target: &str, after_reads: usize) -> Self {
		self.redirects.insert(
			path.into(),
			Redirect {
				target: target.into(),
				after_reads,
			},
		);
		self
	}

	/// `locator` reports visible on every page.
	pub fn show(mut self, locator: &str) -> Self {
		self.visible.push(Locator::parse(locator));
		self
	}

	pub fn fail_navigation(mut self, path: &str, message: &str) -> Self {
		self.nav_failures.insert(path.into(), message.into());
		self
	}

	/// Every location and visibility query fails with `message`.
	pub fn fail_queries(mut self, message: &str) -> Self {
		self.query_failure = Some(message.into());
		self
	}

	pub fn panic_on(mut self, path: &str) -> Self {
		self.panics.push(path.into());
		self
	}

	/// URLs passed to `goto`, in order.
	pub fn visits(&self) -> Vec<String> {
		self.state.lock().unwrap().visits.clone()
	}

	fn rule<'a, V>(rules: &'a HashMap<String, V>, url: &str) -> Option<&'a V> {
		rules.iter().find(|(path, _)| url.ends_with(path.as_str())).map(|(_, v)| v)
	}

	fn check_queries(&self) -> Result<()> {
		match &self.query_failure {
			Some(message) => Err(SmokeError::Browser(message.clone())),
			None => Ok(()),
		}
	}
}

#[async_trait]
impl PageDriver for ScriptedPage {
	async fn goto(&self, url: &str) -> Result<()> {
		self.state.lock().unwrap().visits.push(url.to_string());

		if self.panics.iter().any(|path| url.ends_with(path.as_str())) {
			panic!("scripted panic navigating to {url}");
		}
		if let Some(message) = Self::rule(&self.nav_failures, url) {
			return Err(SmokeError::Navigation {
				url: url.to_string(),
				source: anyhow::anyhow!(message.clone()),
			});
		}

		let mut state = self.state.lock().unwrap();
		state.url = url.to_string();
		state.reads_since_goto = 0;
		state.pending = Self::rule(&self.redirects, url).cloned();
		if let Some(redirect) = state.pending.clone().filter(|r| r.after_reads == 0) {
			state.url = redirect.target;
			state.pending = None;
		}
		Ok(())
	}

	async fn current_url(&self) -> Result<String> {
		self.check_queries()?;
		let mut state = self.state.lock().unwrap();
		state.reads_since_goto += 1;
		if let Some(redirect) = state.pending.clone() {
			if state.reads_since_goto > redirect.after_reads {
				state.url = redirect.target;
				state.pending = None;
			}
		}
		Ok(state.url.clone())
	}

	async fn is_visible(&self, locator: &Locator) -> Result<bool> {
		self.check_queries()?;
		Ok(self.visible.contains(locator))
	}
}

/// Hands out a fresh [`ScriptedPage`] per launch and counts launches and closes.
pub struct ScriptedLauncher {
	make_page: Box<dyn Fn() -> ScriptedPage + Send + Sync>,
	launch_failure: Option<String>,
	close_failure: Option<String>,
	launches: AtomicUsize,
	closes: AtomicUsize,
}

impl ScriptedLauncher {
	pub fn new(make_page: impl Fn() -> ScriptedPage + Send + Sync + 'static) -> Self {
		Self {
			make_page: Box::new(make_page),
			launch_failure: None,
			close_failure: None,
			launches: AtomicUsize::new(0),
			closes: AtomicUsize::new(0),
		}
	}

	/// Every launch fails with `message`.
	pub fn failing(message: &str) -> Self {
		let mut launcher = Self::new(ScriptedPage::new);
		launcher.launch_failure = Some(message.into());
		launcher
	}

	pub fn fail_close(mut self, message: &str) -> Self {
		self.close_failure = Some(message.into());
		self
	}

	pub fn launches(&self) -> usize {
		self.launches.load(Ordering::SeqCst)
	}

	pub fn closes(&self) -> usize {
		self.closes.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl SessionLauncher for ScriptedLauncher {
	type Session = ScriptedPage;

	async fn launch(&self) -> Result<ScriptedPage> {
		self.launches.fetch_add(1, Ordering::SeqCst);
		match &self.launch_failure {
			Some(message) => Err(SmokeError::BrowserLaunch(message.clone())),
			None => Ok((self.make_page)()),
		}
	}

	async fn close(&self, _session: ScriptedPage) -> Result<()> {
		self.closes.fetch_add(1, Ordering::SeqCst);
		match &self.close_failure {
			Some(message) => Err(SmokeError::Browser(message.clone())),
			None => Ok(()),
		}
	}
}
