mod api;
mod cli;
mod config;
mod errors;
mod models;
mod services;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "momentum")]
#[command(about = "Recent-form momentum scores and bet confidence for football matchups")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Compare two teams' recent momentum
    Analyze {
        /// League name or code, CSV URL, or local CSV path
        #[arg(short, long, default_value = "Premier League")]
        source: String,
        #[arg(long)]
        team1: String,
        #[arg(long)]
        team2: String,
        /// Print the analysis as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the teams in a dataset
    Teams {
        #[arg(short, long, default_value = "Premier League")]
        source: String,
    },
    /// List the built-in leagues
    Leagues,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port }) => {
            let port = port.unwrap_or(settings.port);
            tracing::info!("Starting Momentum API server on port {}", port);
            api::serve(settings, port).await?;
        }
        Some(Commands::Analyze { source, team1, team2, json }) => {
            tracing::info!("Analyzing {} vs {} ({})", team1, team2, source);
            cli::analyze_matchup(settings, &source, &team1, &team2, json).await?;
        }
        Some(Commands::Teams { source }) => {
            tracing::info!("Listing teams for {}", source);
            cli::show_teams(settings, &source).await?;
        }
        Some(Commands::Leagues) => {
            cli::show_leagues(&settings);
        }
        None => {
            // Default to serving
            tracing::info!("Starting Momentum API server on port {}", settings.port);
            let port = settings.port;
            api::serve(settings, port).await?;
        }
    }

    Ok(())
}
