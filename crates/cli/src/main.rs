use clap::Parser;
use pw_smoke::{cli::Cli, commands, logging, output};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let format = cli.format;
	let suite = cli.suite.clone();

	match commands::dispatch(cli).await {
		Ok(summary) => output::print_summary(&summary, format),
		Err(err) => {
			output::print_error(&err, &suite, format);
			std::process::exit(1);
		}
	}
}
