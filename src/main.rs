//! CLI entry point for image to tile grid conversion

use clap::Parser;
use tilemapper::io::cli::{Cli, Generator};
use tilemapper::io::configuration::DEFAULT_LOG_DIRECTIVE;
use tracing_subscriber::EnvFilter;

const QUIET_LOG_DIRECTIVE: &str = "tilemapper=warn";

fn init_logging(directive: Option<&str>, quiet: bool) {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| {
        EnvFilter::new(if quiet {
            QUIET_LOG_DIRECTIVE
        } else {
            DEFAULT_LOG_DIRECTIVE
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> tilemapper::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref(), cli.quiet);

    let mut generator = Generator::new(cli);
    generator
        .process()
        .map(|_| ())
        .inspect_err(|e| tracing::error!("{e}"))
}
