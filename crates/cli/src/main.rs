//! Viet Long CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply PostgreSQL migrations (postgres backend only)
//! vietlong-cli migrate
//!
//! # Seed the initial catalog into the configured backend
//! vietlong-cli seed
//!
//! # Seed and create the bootstrap administrator
//! vietlong-cli seed --admin-password <password>
//!
//! # Create an additional admin account
//! vietlong-cli admin create -e admin2@vietlong.com -n "Thu Hà" -p <password>
//! ```
//!
//! # Commands
//!
//! - `migrate` - Apply database migrations
//! - `seed` - Install the initial catalog and optional bootstrap admin
//! - `admin create` - Create admin accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vietlong-cli")]
#[command(author, version, about = "Viet Long CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply PostgreSQL database migrations
    Migrate,
    /// Seed the configured backend with the initial catalog
    Seed {
        /// Also create the bootstrap administrator with this password
        #[arg(long)]
        admin_password: Option<String>,
    },
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin password
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
        Commands::Seed { admin_password } => {
            commands::seed::run(admin_password.as_deref()).await?;
        }
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                password,
            } => {
                commands::admin::create_user(&email, &name, &password).await?;
            }
        },
    }
    Ok(())
}
