//! Run report: per-scenario result rows plus free-text findings.
//!
//! The report is built incrementally while scenarios execute, rendered once to
//! Markdown, and written to a single file that replaces any previous run:
//!
//! ```text
//! # Security Testing Report
//! ## Test Execution Summary
//! | Area | Test Case | Status | Notes |
//! |---|---|---|---|
//! | Auth | Access protected routes without login | ✅ PASS | Redirected to login |
//!
//! ## Detailed Findings
//!
//! No critical automated finding.
//! ```

#[cfg(test)]
mod tests;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmokeError};

pub const REPORT_TITLE: &str = "# Security Testing Report";
pub const SUMMARY_HEADING: &str = "## Test Execution Summary";
pub const TABLE_HEADER: &str = "| Area | Test Case | Status | Notes |";
pub const TABLE_DIVIDER: &str = "|---|---|---|---|";
pub const FINDINGS_HEADING: &str = "## Detailed Findings";

/// Placeholder emitted instead of an empty findings section.
pub const NO_FINDINGS: &str = "No critical automated finding.";

/// Outcome category of one scenario.
///
/// Verified and asserted failures are kept apart so a reader can tell a live
/// observation from a fixed verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
	/// Check ran against the live page and held.
	Pass,
	/// Check ran against the live page and did not hold.
	Fail,
	/// Failure known ahead of time; nothing was measured.
	AssertedFail,
	/// Needs a human or a static-analysis pass.
	Manual,
	/// Scenario could not run to completion.
	Error,
}

impl Status {
	pub fn label(self) -> &'static str {
		match self {
			Status::Pass => "✅ PASS",
			Status::Fail => "❌ FAIL",
			Status::AssertedFail => "❌ FAIL (ASSERTED)",
			Status::Manual => "⚠️ MANUAL/STATIC",
			Status::Error => "⚠️ ERROR",
		}
	}

	/// True for both verified and asserted failures.
	pub fn is_fail(self) -> bool {
		matches!(self, Status::Fail | Status::AssertedFail)
	}
}

impl std::fmt::Display for Status {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.label())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	Critical,
	High,
	Medium,
	Low,
}

impl std::fmt::Display for Severity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Severity::Critical => write!(f, "Critical"),
			Severity::High => write!(f, "High"),
			Severity::Medium => write!(f, "Medium"),
			Severity::Low => write!(f, "Low"),
		}
	}
}

/// A detected or asserted weakness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
	pub severity: Severity,
	pub description: String,
}

impl Finding {
	pub fn new(severity: Severity, description: impl Into<String>) -> Self {
		Self {
			severity,
			description: description.into(),
		}
	}

	fn render(&self) -> String {
		format!("- **{}**: {}", self.severity, self.description)
	}
}

/// One row of the execution summary table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
	pub area: String,
	pub case_description: String,
	pub status: Status,
	pub note: String,
}

impl ScenarioResult {
	fn render(&self) -> String {
		format!(
			"| {} | {} | {} | {} |",
			table_cell(&self.area),
			table_cell(&self.case_description),
			self.status.label(),
			table_cell(&self.note)
		)
	}
}

/// Number of rows per status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
	pub pass: usize,
	pub fail: usize,
	pub asserted: usize,
	pub manual: usize,
	pub error: usize,
}

/// Accumulated output of one run.
#[derive(Debug, Default)]
pub struct Report {
	rows: Vec<ScenarioResult>,
	findings: Vec<Finding>,
}

impl Report {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_result(&mut self, result: ScenarioResult) {
		self.rows.push(result);
	}

	pub fn push_finding(&mut self, finding: Finding) {
		self.findings.push(finding);
	}

	pub fn rows(&self) -> &[ScenarioResult] {
		&self.rows
	}

	pub fn findings(&self) -> &[Finding] {
		&self.findings
	}

	pub fn counts(&self) -> StatusCounts {
		let mut counts = StatusCounts::default();
		for row in &self.rows {
			match row.status {
				Status::Pass => counts.pass += 1,
				Status::Fail => counts.fail += 1,
				Status::AssertedFail => counts.asserted += 1,
				Status::Manual => counts.manual += 1,
				Status::Error => counts.error += 1,
			}
		}
		counts
	}

	/// Renders the Markdown document.
	pub fn render(&self) -> String {
		let mut lines = vec![
			REPORT_TITLE.to_string(),
			SUMMARY_HEADING.to_string(),
			TABLE_HEADER.to_string(),
			TABLE_DIVIDER.to_string(),
		];
		lines.extend(self.rows.iter().map(ScenarioResult::render));

		lines.push(format!("\n{FINDINGS_HEADING}\n"));
		if self.findings.is_empty() {
			lines.push(NO_FINDINGS.to_string());
		} else {
			lines.extend(self.findings.iter().map(Finding::render));
		}

		lines.join("\n")
	}

	/// Writes the rendered report, creating parent directories and replacing any existing file.
	pub fn write_to(&self, path: &Path) -> Result<()> {
		let write = || -> std::io::Result<()> {
			if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
				fs::create_dir_all(parent)?;
			}
			fs::write(path, self.render())
		};

		write().map_err(|source| SmokeError::ReportWrite {
			path: path.to_path_buf(),
			source,
		})
	}
}

/// Keeps free text inside a single table cell.
fn table_cell(text: &str) -> String {
	text.replace('|', "\\|")
		.split(['\r', '\n'])
		.filter(|line| !line.trim().is_empty())
		.map(str::trim)
		.collect::<Vec<_>>()
		.join(" ")
}
