mod commands;
mod config;
mod frontend;

use clap::{Parser, Subcommand};
use config::CliConfig;
use fairdice_core::FairDiceError;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fairdice")]
#[command(about = "Provably fair non-transitive dice against the house")]
#[command(version)]
struct Cli {
    /// Data directory for game history
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game against the house
    Play {
        /// Dice as comma-separated faces, e.g. 2,2,4,4,9,9 (at least 3 dice)
        dice: Vec<String>,
        /// Read dice from a JSON file instead: [[2,2,4,4,9,9],...]
        #[arg(short = 'f', long)]
        dice_file: Option<PathBuf>,
        /// Do not record the finished game
        #[arg(long)]
        no_history: bool,
    },
    /// Show the winning odds between every pair of dice
    Odds {
        /// Dice as comma-separated faces
        dice: Vec<String>,
        /// Read dice from a JSON file instead
        #[arg(short = 'f', long)]
        dice_file: Option<PathBuf>,
    },
    /// Check a revealed number and key against a published HMAC
    Verify {
        /// Revealed number
        #[arg(short, long)]
        number: u64,
        /// Revealed key (hex)
        #[arg(short, long)]
        key: String,
        /// Published HMAC (hex)
        #[arg(short, long)]
        tag: String,
    },
    /// List recorded games
    History {
        /// Re-verify every recorded commitment
        #[arg(long)]
        verify: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let no_history = matches!(cli.command, Commands::Play { no_history: true, .. });
    let config = CliConfig::new(cli.data_dir, cli.verbose, no_history);

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_filter()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Play {
            dice, dice_file, ..
        } => commands::play_game(&config, &dice, dice_file.as_deref()).await,
        Commands::Odds { dice, dice_file } => {
            commands::show_odds(&dice, dice_file.as_deref()).await
        }
        Commands::Verify { number, key, tag } => commands::verify_commitment(number, &key, &tag),
        Commands::History { verify } => commands::show_history(&config, verify),
    };

    if let Err(e) = result {
        match e.downcast_ref::<FairDiceError>() {
            Some(FairDiceError::Aborted) => {
                eprintln!("Game aborted.");
            }
            Some(FairDiceError::Configuration(msg)) => {
                eprintln!("Error: Invalid dice configuration: {}", msg);
                eprintln!("Example: fairdice play 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3");
            }
            Some(FairDiceError::EntropyUnavailable(msg)) => {
                eprintln!("Error: Secure randomness unavailable: {}", msg);
            }
            _ => {
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
