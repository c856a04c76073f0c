//! Address registry CLI - database migrations.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! address-registry-cli migrate
//!
//! # List migrations and whether they are applied
//! address-registry-cli migrate --status
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "address-registry-cli")]
#[command(author, version, about = "Address registry CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        /// Only report which migrations are applied
        #[arg(long)]
        status: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::migrate::MigrationError> {
    match cli.command {
        Commands::Migrate { status: false } => commands::migrate::run().await,
        Commands::Migrate { status: true } => commands::migrate::status().await,
    }
}
