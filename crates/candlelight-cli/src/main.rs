use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "candlelight", version, about = "Candlelight CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Light, extinguish and watch the candle
    Candle {
        #[command(subcommand)]
        action: commands::candle::CandleAction,
    },
    /// Today's prayer and prediction
    Today {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Shareable prediction card
    Share {
        /// Wrap width in characters
        #[arg(long, default_value = "40")]
        width: usize,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Role, mode and sound preferences
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
    /// Streak and candle statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CANDLELIGHT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Candle { action } => commands::candle::run(action).await,
        Commands::Today { json } => commands::content::today(json).await,
        Commands::Share { width, json } => commands::content::share(width, json).await,
        Commands::Prefs { action } => commands::prefs::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
