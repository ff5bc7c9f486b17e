//! Declarative scenario descriptors and the built-in security suite.
//!
//! A suite can also be loaded from JSON:
//!
//! ```json
//! {
//!   "name": "security",
//!   "scenarios": [
//!     {
//!       "id": "auth-bypass",
//!       "area": "Auth",
//!       "case": "Access protected routes without login",
//!       "kind": "redirect",
//!       "path": "/admin",
//!       "urlContains": ["/login"],
//!       "visible": ["text=Login"],
//!       "passNote": "Redirected to login",
//!       "failNote": "Not redirected",
//!       "finding": { "severity": "critical", "description": "..." }
//!     },
//!     { "id": "xss", "area": "XSS", "case": "...", "kind": "manual", "note": "..." }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::browser::{Locator, PageCondition};
use crate::error::{Result, SmokeError};
use crate::report::{Finding, Severity};

/// The only suite selector this binary accepts.
pub const SECURITY_SUITE: &str = "security";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
	pub name: String,
	pub scenarios: Vec<Scenario>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
	pub id: String,
	pub area: String,
	pub case: String,
	#[serde(flatten)]
	pub check: Check,
	/// Appended when the check fails. Ignored for passes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub finding: Option<Finding>,
}

/// What a scenario does to reach its verdict.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Check {
	/// Navigate, then expect to end up on a login location or see a login element.
	Redirect {
		path: String,
		#[serde(default)]
		url_contains: Vec<String>,
		#[serde(default)]
		visible: Vec<Locator>,
		pass_note: String,
		fail_note: String,
	},
	/// Fixed failing verdict from prior knowledge; the optional navigation only proves reachability.
	Asserted {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		path: Option<String>,
		note: String,
	},
	/// Left to a human or a static-analysis pass.
	Manual { note: String },
}

impl Check {
	/// Condition a redirect check waits for.
	pub fn condition(&self) -> Option<PageCondition> {
		match self {
			Check::Redirect { url_contains, visible, .. } => Some(PageCondition {
				url_contains: url_contains.clone(),
				visible: visible.clone(),
			}),
			_ => None,
		}
	}
}

impl Suite {
	/// Returns the suite compiled into the binary for `name`.
	pub fn builtin(name: &str) -> Option<Suite> {
		(name == SECURITY_SUITE).then(security_suite)
	}

	/// Loads and validates a suite definition from a JSON file.
	pub fn from_file(path: &Path) -> Result<Suite> {
		let content = std::fs::read_to_string(path)
			.map_err(|e| SmokeError::Config(format!("cannot read scenario file {}: {e}", path.display())))?;
		let suite: Suite = serde_json::from_str(&content)
			.map_err(|e| SmokeError::Config(format!("invalid scenario file {}: {e}", path.display())))?;
		suite.validate()?;
		Ok(suite)
	}

	/// Rejects definitions the executor cannot run meaningfully.
	pub fn validate(&self) -> Result<()> {
		if self.scenarios.is_empty() {
			return Err(SmokeError::Config(format!("suite '{}' defines no scenarios", self.name)));
		}

		let mut seen = HashSet::new();
		for scenario in &self.scenarios {
			if !seen.insert(scenario.id.as_str()) {
				return Err(SmokeError::Config(format!("duplicate scenario id '{}'", scenario.id)));
			}
			match &scenario.check {
				Check::Redirect { path, .. } if !path.starts_with('/') => {
					return Err(SmokeError::Config(format!(
						"scenario '{}': path '{path}' must start with '/'",
						scenario.id
					)));
				}
				check @ Check::Redirect { .. } if check.condition().is_some_and(|c| c.is_empty()) => {
					return Err(SmokeError::Config(format!(
						"scenario '{}': redirect check needs urlContains or visible",
						scenario.id
					)));
				}
				Check::Asserted { path: Some(path), .. } if !path.starts_with('/') => {
					return Err(SmokeError::Config(format!(
						"scenario '{}': path '{path}' must start with '/'",
						scenario.id
					)));
				}
				Check::Manual { .. } if scenario.finding.is_some() => {
					return Err(SmokeError::Config(format!(
						"scenario '{}': manual scenarios cannot carry a finding",
						scenario.id
					)));
				}
				_ => {}
			}
		}
		Ok(())
	}
}

fn security_suite() -> Suite {
	Suite {
		name: SECURITY_SUITE.into(),
		scenarios: vec![
			Scenario {
				id: "auth-bypass".into(),
				area: "Auth".into(),
				case: "Access protected routes without login".into(),
				check: Check::Redirect {
					path: "/admin".into(),
					url_contains: vec!["/login".into()],
					visible: vec![Locator::parse("text=Login")],
					pass_note: "Redirected to login".into(),
					fail_note: "Not redirected".into(),
				},
				finding: Some(Finding::new(
					Severity::Critical,
					"Protected routes are accessible without authentication.",
				)),
			},
			Scenario {
				id: "session-storage".into(),
				area: "Session".into(),
				case: "Token storage mechanism".into(),
				check: Check::Asserted {
					path: Some("/login".into()),
					note: "Tokens are stored in localStorage instead of HttpOnly cookies, making them vulnerable to XSS. \
					       Known from AuthContext.jsx, not measured in this run."
						.into(),
				},
				finding: Some(Finding::new(
					Severity::High,
					"Auth tokens are stored in `localStorage` (`auth_token`), making them easily accessible via XSS attacks. \
					 Migrate to secure HttpOnly cookies.",
				)),
			},
			Scenario {
				id: "xss-comments".into(),
				area: "XSS".into(),
				case: "Inject `<script>` in comments".into(),
				check: Check::Manual {
					note: "Requires manual validation against `sanitizers.js`".into(),
				},
				finding: None,
			},
			Scenario {
				id: "null-scores".into(),
				area: "Input".into(),
				case: "Submit null/undefined to scores".into(),
				check: Check::Manual {
					note: "Requires manual validation in forms".into(),
				},
				finding: None,
			},
			Scenario {
				id: "cross-tenant".into(),
				area: "API".into(),
				case: "Query another user's data".into(),
				check: Check::Manual {
					note: "Requires checking Convex mutations/queries".into(),
				},
				finding: None,
			},
		],
	}
}
