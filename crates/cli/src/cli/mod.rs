
use std::path::PathBuf;

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;

use crate::config::{DEFAULT_BASE_URL, DEFAULT_POLL_MS, DEFAULT_TIMEOUT_MS};
use crate::output::OutputFormat;

/// Root CLI for pw-smoke.
#[derive(Parser, Debug)]
#[command(name = "pw-smoke")]
#[command(about = "Security smoke-test checklist runner driving headless Chromium")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Suite to run (only `security` is available)
	#[arg(long, value_name = "NAME")]
	pub suite: String,

	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Run summary format on stdout
	#[arg(short = 'f', long, value_enum, default_value = "text")]
	pub format: OutputFormat,

	/// Base URL of the application under test
	#[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
	pub base_url: String,

	/// Report file (defaults to ~/.verdent/testing/issues/security_report.md)
	#[arg(long, value_name = "FILE")]
	pub report: Option<PathBuf>,

	/// How long a scenario waits for its expected page state, in milliseconds
	#[arg(long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS, value_parser = clap::value_parser!(u64).range(1..))]
	pub timeout: u64,

	/// Interval between page-state checks while waiting, in milliseconds
	#[arg(long, value_name = "MS", default_value_t = DEFAULT_POLL_MS, value_parser = clap::value_parser!(u64).range(1..))]
	pub poll: u64,

	/// JSON suite definition replacing the built-in scenario list
	#[arg(long, value_name = "FILE")]
	pub scenarios: Option<PathBuf>,

	/// Chromium executable (auto-detected when omitted)
	#[arg(long, value_name = "PATH")]
	pub chrome: Option<PathBuf>,

	/// Show the browser window instead of running headless
	#[arg(long)]
	pub headed: bool,
}

/// Cargo-style help colors.
fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().bold())
		.usage(AnsiColor::Green.on_default().bold())
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Cyan.on_default())
		.valid(AnsiColor::Cyan.on_default())
}
