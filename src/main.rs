use anyhow::Result;
use bankbook::cli::Cli;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.run().await
}

/// Logs go to stderr so command output on stdout stays clean.
/// `RUST_LOG` takes precedence over the verbosity flag.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "bankbook=debug" } else { "bankbook=warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
