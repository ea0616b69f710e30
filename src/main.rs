use anyhow::Context;
use clap::Parser;
use lake_prep::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let step = match &cli.command {
        lake_prep::cli::Commands::Unzip { .. } => "unzip",
        lake_prep::cli::Commands::Augment { .. } => "augment",
    };

    run(cli)
        .await
        .with_context(|| format!("lake-prep {} failed", step))
}
