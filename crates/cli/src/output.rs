//! Run summary printed to stdout after the report is written.
//!
//! The Markdown report is the primary artifact; this is the short console
//! view of it. JSON output uses a small envelope:
//!
//! ```json
//! { "ok": true, "suite": "security", "data": { "reportPath": "...", "counts": { ... } } }
//! { "ok": false, "suite": "performance", "error": { "code": "UNSUPPORTED_SUITE", "message": "..." } }
//! ```

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::error::SmokeError;
use crate::report::{Report, ScenarioResult, Status, StatusCounts};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text
	#[default]
	Text,
	/// JSON envelope
	Json,
}

/// What one run produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
	pub suite: String,
	pub report_path: PathBuf,
	pub counts: StatusCounts,
	pub findings: usize,
	pub results: Vec<ScenarioResult>,
}

impl RunSummary {
	pub fn new(suite: impl Into<String>, report_path: PathBuf, report: &Report) -> Self {
		Self {
			suite: suite.into(),
			report_path,
			counts: report.counts(),
			findings: report.findings().len(),
			results: report.rows().to_vec(),
		}
	}
}

#[derive(Debug, Serialize)]
struct Envelope<'a, T: Serialize> {
	ok: bool,
	suite: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	data: Option<&'a T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<ErrorBody>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	code: &'static str,
	message: String,
}

pub fn print_summary(summary: &RunSummary, format: OutputFormat) {
	match format {
		OutputFormat::Text => {
			for row in &summary.results {
				println!("{} {} / {}", status_label(row.status), row.area, row.case_description);
			}
			let c = summary.counts;
			println!(
				"\n{} passed, {} failed, {} asserted, {} manual, {} errored; {} finding(s)",
				c.pass, c.fail, c.asserted, c.manual, c.error, summary.findings
			);
			println!("Report generated at: {}", summary.report_path.display());
		}
		OutputFormat::Json => {
			let envelope = Envelope {
				ok: true,
				suite: &summary.suite,
				data: Some(summary),
				error: None,
			};
			if let Ok(json) = serde_json::to_string_pretty(&envelope) {
				println!("{json}");
			}
		}
	}
}

/// Reports a failed run. The unsupported-suite diagnostic goes to stdout as a plain line.
pub fn print_error(err: &SmokeError, suite: &str, format: OutputFormat) {
	match format {
		OutputFormat::Text if err.is_unsupported_suite() => println!("{err}"),
		OutputFormat::Text => eprintln!("{} {}", "Error:".red().bold(), err.detailed()),
		OutputFormat::Json => {
			let envelope: Envelope<'_, ()> = Envelope {
				ok: false,
				suite,
				data: None,
				error: Some(ErrorBody {
					code: err.code(),
					message: err.detailed(),
				}),
			};
			if let Ok(json) = serde_json::to_string_pretty(&envelope) {
				println!("{json}");
			}
		}
	}
}

fn status_label(status: Status) -> colored::ColoredString {
	let label = status.label();
	match status {
		Status::Pass => label.green(),
		Status::Fail | Status::AssertedFail => label.red(),
		Status::Manual => label.yellow(),
		Status::Error => label.magenta(),
	}
}
