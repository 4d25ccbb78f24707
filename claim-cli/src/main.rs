mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use straightedge_migrate::AppConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "straightedge-claim")]
#[command(about = "Move funds from a legacy sr25519 Straightedge account to its secp256k1 address")]
struct Cli {
    /// Override the configured LCD endpoint
    #[arg(long, global = true)]
    lcd_url: Option<String>,

    /// Read the mnemonic from a file instead of prompting for it
    #[arg(long, global = true)]
    mnemonic_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the sr25519 source and secp256k1 destination addresses
    Addresses,
    /// Show the balance held by the sr25519 account
    Balance,
    /// Transfer the whole balance, minus the fee, to the secp256k1 address
    Claim {
        /// Print the signed transaction instead of broadcasting it
        #[arg(long)]
        dry_run: bool,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "straightedge_migrate=info,straightedge_claim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(url) = cli.lcd_url {
        config.lcd.url = url;
    }
    info!(chain_id = %config.chain.chain_id, lcd = %config.lcd.url, "Configuration loaded");

    let mnemonic = commands::read_mnemonic(cli.mnemonic_file.as_deref())?;

    match cli.command {
        Commands::Addresses => commands::addresses(&config, &mnemonic),
        Commands::Balance => commands::balance(&config, &mnemonic).await,
        Commands::Claim { dry_run, yes } => {
            commands::claim(&config, &mnemonic, dry_run, yes).await
        }
    }
}
