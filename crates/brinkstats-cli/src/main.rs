mod render;

use brinkstats_aggregator::StatsAggregator;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brinkstats-cli")]
#[command(about = "Fetch and display social media statistics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch statistics for every platform and print them
    Stats {
        /// Print the aggregate as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the loaded configuration with secrets redacted
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = brinkstats_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Stats { json: false }) {
        Commands::Stats { json } => {
            let aggregator = StatsAggregator::from_config(&config)?;
            let configured: Vec<_> = aggregator.configured_platforms().collect();
            tracing::info!(configured = ?configured, "fetching platform statistics");

            let stats = aggregator.collect().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", render::render_table(&stats));
            }
        }
        Commands::Config => println!("{config:#?}"),
    }

    Ok(())
}
