use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbosity: u8) {
	// 0 = warnings only, CDP chatter suppressed
	// 1 (-v) = scenario progress, chromiumoxide warnings
	// 2+ (-vv) = debug for everything
	let filter = match verbosity {
		0 => "warn,chromiumoxide=off",
		1 => "info,chromiumoxide=warn",
		_ => "debug",
	};

	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.with_level(true)
		.with_ansi(std::io::stderr().is_terminal())
		.compact()
		.init();
}
