//! Sembot CLI - custodial SEM tipping wallet in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{address, balance, tip, top, watch, withdraw};

/// Sembot - custodial SEM tipping wallet
#[derive(Parser)]
#[command(name = "sembot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a user's deposit address, creating their wallet if needed
    Address {
        /// External user id
        user: String,
        /// Display name shown on leaderboards (defaults to the user id)
        #[arg(long)]
        name: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a user's ledger balance
    Balance {
        /// External user id
        user: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Tip SEM from one user to another
    Tip {
        /// Sending user id
        sender: String,
        /// Receiving user id (their wallet is created if needed)
        recipient: String,
        /// Amount in SEM, e.g. "1.5"
        amount: String,
        /// On-chain memo (defaults to "tip")
        #[arg(long)]
        memo: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Withdraw SEM from a user's wallet to an external address
    Withdraw {
        /// Sending user id
        user: String,
        /// Destination address, 0x-prefixed hex
        address: String,
        /// Amount in SEM; the exact balance sends everything minus the fee
        amount: String,
        /// On-chain memo (defaults to "tip")
        #[arg(long)]
        memo: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the tip leaderboard
    Top {
        /// Rank by received instead of sent
        #[arg(long)]
        received: bool,
        /// Number of entries
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the whale-alert watcher until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Address { user, name, json } => address::run(&user, name.as_deref(), json).await,
        Commands::Balance { user, json } => balance::run(&user, json).await,
        Commands::Tip {
            sender,
            recipient,
            amount,
            memo,
            json,
        } => tip::run(&sender, &recipient, &amount, memo.as_deref(), json).await,
        Commands::Withdraw {
            user,
            address,
            amount,
            memo,
            json,
        } => withdraw::run(&user, &address, &amount, memo.as_deref(), json).await,
        Commands::Top {
            received,
            limit,
            json,
        } => top::run(received, limit, json).await,
        Commands::Watch => watch::run().await,
    }
}
