//! giup CLI - Git Interactive Update and Publish.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod console;
mod output;

use commands::Cli;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "GIUP_LOG";

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);
    init_logging(cli.verbose);

    let result = match cli.completions {
        Some(shell) => commands::completions::run(shell),
        None => commands::run::run(&cli),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
