mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "availit-cli")]
#[command(about = "Run live hospital sources and the geocoder from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List configured live sources
    Sources,
    /// Scrape one live source and print its records as JSON
    Scrape {
        /// Source key, e.g. `delhi`
        key: String,
        /// Print records in the canonical availability schema
        #[arg(long)]
        canonical: bool,
    },
    /// Geocode a city and print the first match as `lat,lon`
    Locate {
        city: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = availit_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Sources) => commands::run_sources(&config),
        Some(Commands::Scrape { key, canonical }) => {
            commands::run_scrape(&config, &key, canonical).await?;
        }
        Some(Commands::Locate { city }) => commands::run_locate(&config, &city).await?,
        None => println!("availit-cli: pass --help for available commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
