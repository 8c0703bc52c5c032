use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

mod classify;
mod cli;
mod config;
mod error;
mod mail;
mod output;
mod provider;
mod runner;
mod summarize;
mod tracker;

use cli::{Cli, Commands};
use error::ConfigError;

/// Exit status for missing or invalid configuration
const EXIT_CONFIG: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise info, or debug with --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("kanboard_digest=debug")
        } else {
            EnvFilter::new("kanboard_digest=info")
        }
    });

    // Logs go to stderr so dry-run output on stdout stays clean
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run(args) => cli::run::execute(args).await,
        Commands::Schema(args) => cli::schema::execute(args),
    };

    if let Err(e) = &result {
        if e.chain().any(|cause| cause.is::<ConfigError>()) {
            error!("{:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }

    result
}
