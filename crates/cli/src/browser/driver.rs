//! Browser-driver capability the scenario executor runs against.
//!
//! Scenarios only ever navigate, read the current location, and ask whether an
//! element is visible. Keeping that surface behind [`PageDriver`] lets the
//! executor run against a scripted page in tests and a real Chromium page in
//! production.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[async_trait]
pub trait PageDriver: Send + Sync {
	/// Navigates the page to an absolute URL.
	async fn goto(&self, url: &str) -> Result<()>;

	/// Returns the page's current location.
	async fn current_url(&self) -> Result<String>;

	/// Returns true when an element matching `locator` is rendered and visible.
	async fn is_visible(&self, locator: &Locator) -> Result<bool>;
}

/// Acquires and releases the page a run executes against.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
	type Session: PageDriver;

	/// Starts a fresh session. Failure is fatal to the run.
	async fn launch(&self) -> Result<Self::Session>;

	/// Tears the session down once every scenario has run.
	async fn close(&self, session: Self::Session) -> Result<()>;
}

/// Element locator in Playwright's short syntax.
///
/// `text=Login` matches an element whose text contains `Login`
/// (case-insensitive, whitespace-normalized). `text="Log in"` matches text
/// that equals `Log in` exactly, case included. Anything else is a CSS
/// selector; an explicit `css=` prefix is accepted as well.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Locator {
	Css(String),
	Text(String),
	ExactText(String),
}

impl Locator {
	pub fn parse(raw: &str) -> Self {
		if let Some(text) = raw.strip_prefix("text=") {
			match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
				Some(exact) => Locator::ExactText(exact.to_string()),
				None => Locator::Text(text.to_string()),
			}
		} else if let Some(css) = raw.strip_prefix("css=") {
			Locator::Css(css.to_string())
		} else {
			Locator::Css(raw.to_string())
		}
	}
}

impl From<&str> for Locator {
	fn from(raw: &str) -> Self {
		Locator::parse(raw)
	}
}

impl From<String> for Locator {
	fn from(raw: String) -> Self {
		Locator::parse(&raw)
	}
}

impl From<Locator> for String {
	fn from(locator: Locator) -> Self {
		locator.to_string()
	}
}

impl std::fmt::Display for Locator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Locator::Css(selector) => f.write_str(selector),
			Locator::Text(text) => write!(f, "text={text}"),
			Locator::ExactText(text) => write!(f, "text=\"{text}\""),
		}
	}
}
