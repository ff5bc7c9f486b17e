use tempfile::TempDir;

use super::*;

fn row(area: &str, case: &str, status: Status, note: &str) -> ScenarioResult {
	ScenarioResult {
		area: area.into(),
		case_description: case.into(),
		status,
		note: note.into(),
	}
}

#[test]
fn empty_findings_render_placeholder_only() {
	let mut report = Report::new();
	report.push_result(row("Auth", "Access protected routes without login", Status::Pass, "Redirected to login"));

	let text = report.render();
	let findings = text.split(FINDINGS_HEADING).nth(1).unwrap();
	assert_eq!(findings.trim(), NO_FINDINGS);
	assert!(!findings.contains("- **"));
}

#[test]
fn render_matches_document_layout() {
	let mut report = Report::new();
	report.push_result(row("Auth", "Access protected routes without login", Status::Fail, "Not redirected"));
	report.push_result(row("XSS", "Inject `<script>` in comments", Status::Manual, "Requires manual validation"));
	report.push_finding(Finding::new(
		Severity::Critical,
		"Protected routes are accessible without authentication.",
	));

	let expected = "# Security Testing Report\n\
		## Test Execution Summary\n\
		| Area | Test Case | Status | Notes |\n\
		|---|---|---|---|\n\
		| Auth | Access protected routes without login | ❌ FAIL | Not redirected |\n\
		| XSS | Inject `<script>` in comments | ⚠️ MANUAL/STATIC | Requires manual validation |\n\
		\n\
		## Detailed Findings\n\
		\n\
		- **Critical**: Protected routes are accessible without authentication.";
	assert_eq!(report.render(), expected);
}

#[test]
fn table_has_one_header_and_one_row_per_result() {
	let mut report = Report::new();
	for i in 0..4 {
		report.push_result(row("Area", &format!("case {i}"), Status::Manual, "n/a"));
	}

	let text = report.render();
	let header_rows = text.lines().filter(|l| *l == TABLE_HEADER).count();
	let body_rows = text
		.lines()
		.filter(|l| l.starts_with("| ") && *l != TABLE_HEADER)
		.count();
	assert_eq!(header_rows, 1);
	assert_eq!(body_rows, 4);
}

#[test]
fn findings_keep_discovery_order() {
	let mut report = Report::new();
	report.push_finding(Finding::new(Severity::Low, "first"));
	report.push_finding(Finding::new(Severity::Critical, "second"));

	let text = report.render();
	let first = text.find("- **Low**: first").unwrap();
	let second = text.find("- **Critical**: second").unwrap();
	assert!(first < second);
	assert!(!text.contains(NO_FINDINGS));
}

#[test]
fn error_notes_cannot_break_the_table() {
	let mut report = Report::new();
	report.push_result(row(
		"Auth",
		"Access protected routes without login",
		Status::Error,
		"navigation failed: a|b\n  net::ERR_CONNECTION_REFUSED\n",
	));

	let text = report.render();
	let line = text.lines().find(|l| l.contains("⚠️ ERROR")).unwrap();
	assert_eq!(
		line,
		"| Auth | Access protected routes without login | ⚠️ ERROR | navigation failed: a\\|b net::ERR_CONNECTION_REFUSED |"
	);
}

#[test]
fn asserted_failure_is_labelled_and_counted_apart() {
	assert!(Status::AssertedFail.is_fail());
	assert!(Status::Fail.is_fail());
	assert!(!Status::Manual.is_fail());
	assert_ne!(Status::AssertedFail.label(), Status::Fail.label());

	let mut report = Report::new();
	report.push_result(row("Session", "Token storage mechanism", Status::AssertedFail, "known"));
	report.push_result(row("Auth", "redirect", Status::Fail, "live"));
	report.push_result(row("Auth", "redirect", Status::Error, "boom"));

	let counts = report.counts();
	assert_eq!(counts.asserted, 1);
	assert_eq!(counts.fail, 1);
	assert_eq!(counts.error, 1);
	assert_eq!(counts.pass, 0);
}

#[test]
fn write_creates_missing_parent_directories() {
	let tmp = TempDir::new().unwrap();
	let path = tmp.path().join(".verdent/testing/issues/security_report.md");

	let mut report = Report::new();
	report.push_result(row("API", "Query another user's data", Status::Manual, "review"));
	report.write_to(&path).unwrap();

	let written = std::fs::read_to_string(&path).unwrap();
	assert_eq!(written, report.render());
}

#[test]
fn write_replaces_previous_report() {
	let tmp = TempDir::new().unwrap();
	let path = tmp.path().join("report.md");

	let mut first = Report::new();
	first.push_result(row("Auth", "first run", Status::Fail, "x"));
	first.push_finding(Finding::new(Severity::Critical, "first run finding"));
	first.write_to(&path).unwrap();

	let mut second = Report::new();
	second.push_result(row("Auth", "second run", Status::Pass, "y"));
	second.write_to(&path).unwrap();

	let written = std::fs::read_to_string(&path).unwrap();
	assert!(written.contains("second run"));
	assert!(!written.contains("first run"));
	assert!(written.ends_with(NO_FINDINGS));
}

#[test]
fn write_failure_names_the_path() {
	let tmp = TempDir::new().unwrap();
	let blocker = tmp.path().join("not-a-dir");
	std::fs::write(&blocker, "file").unwrap();
	let path = blocker.join("report.md");

	let err = Report::new().write_to(&path).unwrap_err();
	assert!(matches!(err, SmokeError::ReportWrite { .. }));
	assert!(err.to_string().contains("not-a-dir"));
}

#[test]
fn severity_serializes_lowercase() {
	let finding = Finding::new(Severity::High, "tokens in localStorage");
	let json = serde_json::to_value(&finding).unwrap();
	assert_eq!(json["severity"], "high");
	assert_eq!(finding.severity.to_string(), "High");
}
