use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use estuary::app::AppContext;
use estuary::cli::{commands, Cli, Commands};
use estuary::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Refresh => {
            commands::refresh(&ctx).await?;
        }
        Commands::List { limit, translate } => {
            commands::list(&ctx, limit, translate).await?;
        }
        Commands::Search { query } => {
            commands::search(&ctx, &query).await?;
        }
        Commands::Show { id } => {
            commands::show(&ctx, &id).await?;
        }
        Commands::Sources => {
            commands::sources(&ctx)?;
        }
    }

    Ok(())
}
