//! allo - Allo v2 operator CLI

use allo_scripts::cli::{self, Cli, Commands};
use allo_scripts::Confirmation;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::new(filter))
        .init();

    let confirmation = Confirmation::from_flag(cli.yes);

    match &cli.command {
        Commands::CreatePool(args) => {
            cli::pool::handle(args, &cli.network, confirmation, cli.quiet).await
        }
        Commands::CreateRecipients(args) => {
            cli::recipients::handle(args, &cli.network, confirmation, cli.quiet).await
        }
        Commands::ReviewRecipients(args) => {
            cli::review::handle(args, &cli.network, confirmation, cli.quiet).await
        }
        Commands::Decode(args) => cli::decode::handle(args, &cli.network, cli.quiet).await,
        Commands::Config { action } => cli::config::handle(action).await,
    }
}
