//! Comforty CLI - Database setup and content tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the session table the storefront keeps carts and wishlists in
//! comforty migrate
//!
//! # Fetch a product (and its related products) from Sanity
//! comforty product library-stool-chair
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create the `tower_sessions` schema and table
//! - `product` - Query one product by slug, printed as JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "comforty")]
#[command(author, version, about = "Comforty CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the session store table
    Migrate,
    /// Fetch a product from the content backend
    Product {
        /// Product slug
        slug: String,

        /// Also fetch related products from the same category
        #[arg(short, long)]
        related: bool,
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
        Commands::Migrate => commands::migrate::sessions().await?,
        Commands::Product { slug, related } => {
            commands::product::show(&slug, related).await?;
        }
    }
    Ok(())
}
