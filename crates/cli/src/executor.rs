//! Sequential scenario execution with per-scenario fault isolation.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{info, warn};
use url::Url;

use crate::browser::{PageDriver, WaitSettings, wait_until};
use crate::error::Result;
use crate::report::{Finding, Report, ScenarioResult, Status};
use crate::scenario::{Check, Scenario, Suite};

/// Verdict of a scenario that ran to completion.
#[derive(Debug)]
struct Verdict {
	status: Status,
	note: String,
	finding: Option<Finding>,
}

/// Runs every scenario of `suite` in order against one shared page.
///
/// Always yields exactly one result row per scenario: errors and panics inside
/// a scenario become an [`Status::Error`] row and the run moves on.
pub async fn run_suite<D: PageDriver + ?Sized>(driver: &D, suite: &Suite, base_url: &Url, wait: WaitSettings) -> Report {
	let mut report = Report::new();

	for scenario in &suite.scenarios {
		info!(target = "pw-smoke", id = %scenario.id, area = %scenario.area, "running scenario");

		let attempt = AssertUnwindSafe(execute(driver, scenario, base_url, wait)).catch_unwind().await;
		let verdict = match attempt {
			Ok(Ok(verdict)) => verdict,
			Ok(Err(err)) => {
				warn!(target = "pw-smoke", id = %scenario.id, error = %err, "scenario errored");
				errored(err.detailed())
			}
			Err(panic) => {
				let message = panic_message(&*panic);
				warn!(target = "pw-smoke", id = %scenario.id, error = %message, "scenario panicked");
				errored(message)
			}
		};

		info!(target = "pw-smoke", id = %scenario.id, status = %verdict.status, "scenario finished");

		report.push_result(ScenarioResult {
			area: scenario.area.clone(),
			case_description: scenario.case.clone(),
			status: verdict.status,
			note: verdict.note,
		});
		if let Some(finding) = verdict.finding {
			report.push_finding(finding);
		}
	}

	report
}

async fn execute<D: PageDriver + ?Sized>(driver: &D, scenario: &Scenario, base_url: &Url, wait: WaitSettings) -> Result<Verdict> {
	match &scenario.check {
		Check::Redirect {
			path,
			pass_note,
			fail_note,
			..
		} => {
			let condition = scenario.check.condition().unwrap_or_default();
			driver.goto(&target_url(base_url, path)).await?;

			let outcome = wait_until(driver, &condition, wait).await?;
			if outcome.is_satisfied() {
				Ok(Verdict {
					status: Status::Pass,
					note: pass_note.clone(),
					finding: None,
				})
			} else {
				Ok(Verdict {
					status: Status::Fail,
					note: fail_note.clone(),
					finding: scenario.finding.clone(),
				})
			}
		}
		Check::Asserted { path, note } => {
			if let Some(path) = path {
				driver.goto(&target_url(base_url, path)).await?;
			}
			Ok(Verdict {
				status: Status::AssertedFail,
				note: note.clone(),
				finding: scenario.finding.clone(),
			})
		}
		Check::Manual { note } => Ok(Verdict {
			status: Status::Manual,
			note: note.clone(),
			finding: None,
		}),
	}
}

fn errored(message: String) -> Verdict {
	Verdict {
		status: Status::Error,
		note: message,
		finding: None,
	}
}

/// Appends `path` to the base URL verbatim, keeping any base path prefix.
pub fn target_url(base_url: &Url, path: &str) -> String {
	let base = base_url.as_str().trim_end_matches('/');
	if path.starts_with('/') {
		format!("{base}{path}")
	} else {
		format!("{base}/{path}")
	}
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
	if let Some(s) = panic.downcast_ref::<&str>() {
		format!("panic: {s}")
	} else if let Some(s) = panic.downcast_ref::<String>() {
		format!("panic: {s}")
	} else {
		"panic: <non-string payload>".to_string()
	}
}
