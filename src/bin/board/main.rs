//! Bounty Board CLI
//!
//! Command-line view over the bounty board: list and filter bounties,
//! create and complete them, and reveal descriptions behind the wallet
//! signature gate.

mod commands;
mod style;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use style::print_error;

#[derive(Parser)]
#[command(name = "bounty-board")]
#[command(version)]
#[command(about = "Browse, create and complete bounties on a key/value contract", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Contract bridge endpoint
    #[arg(short, long, env = "GATEWAY_URL", global = true)]
    gateway: Option<String>,

    /// Path to config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bounties
    #[command(visible_alias = "ls")]
    List {
        /// Status tab: all, open or completed
        #[arg(short, long, default_value = "all")]
        tab: String,

        /// Case-insensitive search over title and creator
        #[arg(short, long)]
        search: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a bounty (interactive wizard when fields are omitted)
    #[command(visible_alias = "c")]
    Create {
        #[arg(long)]
        title: Option<String>,

        /// Reward amount in ETH
        #[arg(long)]
        reward: Option<f64>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Mark one of your bounties as completed
    Complete {
        /// Bounty id
        id: String,
    },

    /// Reveal a bounty description (requires a wallet signature)
    Reveal {
        /// Bounty id
        id: String,
    },

    /// Show board statistics
    Stats {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("info").init();
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::List { tab, search, json } => {
            commands::list::run(&config, &tab, search, json).await
        }
        Commands::Create {
            title,
            reward,
            description,
        } => commands::create::run(&config, title, reward, description).await,
        Commands::Complete { id } => commands::complete::run(&config, &id).await,
        Commands::Reveal { id } => commands::reveal::run(&config, &id).await,
        Commands::Stats { json } => commands::stats::run(&config, json).await,
    };

    if let Err(e) = result {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<bounty_board::Config> {
    let mut config = match &cli.config {
        Some(path) => bounty_board::Config::load_from(path)?,
        None => bounty_board::Config::load()?,
    };
    if let Some(gateway) = &cli.gateway {
        config.gateway.url = gateway.clone();
    }
    Ok(config)
}
