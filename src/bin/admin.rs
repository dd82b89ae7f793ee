//! CLI administration tool for kv-shortener.
//!
//! Lets operators derive codes offline and inspect the configured store
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Print the code a (URL, user) pair maps to, without touching the store
//! cargo run --bin admin -- derive --url https://example.com/a --user user1
//!
//! # Create a mapping through the same path as the API
//! cargo run --bin admin -- create --url https://example.com/a --user user1
//!
//! # Look up a code and show why it does not resolve
//! cargo run --bin admin -- inspect wLkJasyJ
//!
//! # Check store connectivity
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `REDIS_URL` / `REDIS_ADDR`, `STORE_BACKEND`, `BASE_URL`.

use kv_shortener::application::services::UrlService;
use kv_shortener::config;
use kv_shortener::domain::entities::{MAPPING_TTL, expires_at};
use kv_shortener::domain::repositories::StoreError;
use kv_shortener::server::open_store;
use kv_shortener::utils::code_generator::derive_short_code;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing kv-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Derive the short code for a URL and user (offline)
    Derive {
        #[arg(short, long)]
        url: String,

        #[arg(short = 'U', long)]
        user: String,
    },

    /// Create a mapping in the configured store
    Create {
        #[arg(short, long)]
        url: String,

        #[arg(short = 'U', long)]
        user: String,
    },

    /// Look up a short code in the configured store
    Inspect {
        /// Short code to look up
        code: String,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Store operation subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Derive { url, user } => derive(&url, &user),
        Commands::Create { url, user } => create(&url, &user).await?,
        Commands::Inspect { code } => inspect(&code).await?,
        Commands::Store {
            action: StoreAction::Check,
        } => check_store().await?,
    }

    Ok(())
}

fn derive(url: &str, user: &str) {
    let code = derive_short_code(url, user);

    println!("{}", "Derived short code".bright_blue().bold());
    println!("  URL:  {}", url.cyan());
    println!("  User: {}", user.cyan());
    println!("  Code: {}", code.bright_yellow().bold());
}

async fn create(url: &str, user: &str) -> Result<()> {
    let config = config::load_from_env()?;
    let store = open_store(&config).await?;
    let service = UrlService::new(store, config.base_url.clone());

    let code = service
        .create_short_url(url, user)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short URL: {}", e))?;

    println!("{}", "✅ Short URL created".green().bold());
    println!("  Short URL: {}", service.short_url(&code).bright_yellow());
    println!(
        "  Expires:   {}",
        expires_at(chrono::Utc::now(), MAPPING_TTL).to_rfc3339()
    );

    Ok(())
}

/// Unlike the API, reports store failures separately from missing codes.
async fn inspect(code: &str) -> Result<()> {
    let config = config::load_from_env()?;
    let store = open_store(&config).await?;

    match store.retrieve(code).await {
        Ok(url) => {
            println!("{} {}", "✅ Found:".green().bold(), code.cyan());
            println!("  Long URL: {}", url.bright_white());
        }
        Err(StoreError::NotFound) => {
            println!(
                "{} {} {}",
                "❌".red(),
                code.cyan(),
                "is not stored or has expired".red()
            );
        }
        Err(e) => {
            println!("{} {}", "⚠️  Store error:".yellow().bold(), e);
        }
    }

    Ok(())
}

async fn check_store() -> Result<()> {
    let config = config::load_from_env()?;

    println!("{}", "🔍 Checking store connection...".bright_blue());

    let store = open_store(&config).await?;

    if store.health_check().await {
        println!(
            "{} {}",
            "✅ Store reachable:".green().bold(),
            config.store_backend
        );
    } else {
        anyhow::bail!("Store did not answer PING");
    }

    Ok(())
}
