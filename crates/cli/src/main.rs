//! Genius CLI — the main entry point.
//!
//! Commands:
//! - `chat`    — Interactive conversation or single-message mode
//! - `history` — Show recent conversation turns
//! - `doctor`  — Diagnose configuration and provider health

use clap::{Parser, Subcommand};

mod commands;
mod session;

#[derive(Parser)]
#[command(
    name = "genius",
    about = "Genius — a context-managed conversational assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Show recent conversation turns
    History {
        /// How many turns to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Diagnose configuration and provider health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::History { limit } => commands::history::run(limit).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
