//! Sweet Dessert CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! sweet-dessert-cli migrate
//!
//! # Create a staff account
//! sweet-dessert-cli admin create -u noor -e noor@example.com -p <password>
//!
//! # Seed the catalog, CMS pages, and FAQ with starter data
//! sweet-dessert-cli seed
//!
//! # Rebuild the semantic product search index
//! sweet-dessert-cli index
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create` - Create staff accounts
//! - `seed` - Seed the database with starter data
//! - `index` - Rebuild the semantic search index

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sweet-dessert-cli")]
#[command(author, version, about = "Sweet Dessert CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage staff accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database with starter data
    Seed {
        /// Seed even when the catalog already has data
        #[arg(long)]
        force: bool,
    },
    /// Rebuild the semantic product search index
    Index,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new staff account
    Create {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (min 8 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                username,
                email,
                password,
            } => {
                commands::admin::create_staff(&username, &email, &password).await?;
            }
        },
        Commands::Seed { force } => commands::seed::run(force).await?,
        Commands::Index => commands::index::run().await?,
    }
    Ok(())
}
