mod commands;
mod config;
mod render;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ringo")]
#[command(about = "Watch apple draws reveal themselves over 24 hours")]
#[command(version)]
struct Cli {
    /// Config file (defaults to <data dir>/ringo/ringo.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the decoy sequence for a draw
    Teasers {
        /// Draw ID
        id: String,
        /// Real apple (bronze, silver, gold, red, poison)
        apple: String,
    },
    /// Show what is displayed at each stage of a full window
    Timeline {
        /// Draw ID
        id: String,
        /// Real apple (bronze, silver, gold, red, poison)
        apple: String,
    },
    /// Live-render a local mock draw
    Preview {
        /// Real apple, random if omitted
        #[arg(short, long)]
        apple: Option<String>,
        /// Draw ID, random if omitted
        #[arg(short, long)]
        id: Option<String>,
        /// Simulated seconds per real second
        #[arg(short, long, default_value_t = 3600)]
        speed: u32,
    },
    /// Follow your current draw from the backend
    Watch {
        /// User ID (overrides config)
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Spend a draw right and start a new draw
    Draw {
        /// User ID (overrides config)
        #[arg(short, long)]
        user: Option<String>,
        /// Referral count sent with the request
        #[arg(short, long, default_value_t = 0)]
        referrals: u32,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "ringo={},ringo_reveal={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::CliConfig::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Teasers { id, apple } => commands::show_teasers(&config, &id, &apple),
        Commands::Timeline { id, apple } => commands::show_timeline(&config, &id, &apple),
        Commands::Preview { apple, id, speed } => {
            commands::preview(&config, apple.as_deref(), id, speed).await
        }
        Commands::Watch { user } => commands::watch_current(&config, user).await,
        Commands::Draw {
            user,
            referrals,
            yes,
        } => commands::create_draw(&config, user, referrals, yes).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
