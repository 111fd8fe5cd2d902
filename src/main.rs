//! Walkthrough CLI - guided provider enrollment for group practice changes

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use walkthrough::cli::{Cli, Commands};
use walkthrough::errors::to_exit_code;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flags
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> walkthrough::Result<()> {
    match cli.command {
        Some(Commands::Pages { json }) => {
            walkthrough::cli::commands::pages::run(cli.graph.as_deref(), json).await
        }
        Some(Commands::Walk { out }) => {
            walkthrough::cli::commands::walk::run(
                cli.graph.as_deref(),
                cli.config.as_deref(),
                out.as_deref(),
            )
            .await
        }
        None => {
            walkthrough::cli::commands::walk::run(cli.graph.as_deref(), cli.config.as_deref(), None)
                .await
        }
    }
}
