//! CLI administration tool for urlsnip.
//!
//! Provides link and database operations without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show PostgreSQL version
//! cargo run --bin admin -- db info
//!
//! # Count stored links
//! cargo run --bin admin -- stats
//!
//! # Shorten a URL
//! cargo run --bin admin -- link shorten https://example.com
//!
//! # Look up a short id
//! cargo run --bin admin -- link show aZ3kP9qL
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; `DATABASE_URL` must point at PostgreSQL.

use urlsnip::application::services::LinkService;
use urlsnip::config::{self, Config};
use urlsnip::infrastructure::persistence::PgLinkRepository;
use urlsnip::utils::short_id::RandomShortIdGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing urlsnip.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Shorten a URL (returns the existing link if already shortened)
    Shorten {
        /// Absolute http(s) URL
        url: String,
    },

    /// Show the link for a short id
    Show {
        short_id: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.uses_memory_store() {
        anyhow::bail!("admin requires a PostgreSQL DATABASE_URL");
    }

    let pool = urlsnip::server::connect_pool(&config).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config, &pool).await?,
        Commands::Stats => handle_stats(&config, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn link_service(config: &Config, pool: &PgPool) -> LinkService<PgLinkRepository> {
    LinkService::new(
        Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))),
        Arc::new(RandomShortIdGenerator::default()),
        config.base_url.clone(),
    )
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, config: &Config, pool: &PgPool) -> Result<()> {
    let service = link_service(config, pool);

    match action {
        LinkAction::Shorten { url } => {
            println!("{}", "Shorten URL".bright_blue().bold());
            println!();

            let link = service
                .shorten(&url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

            println!("  ID:        {}", link.id.to_string().bright_black());
            println!("  Short id:  {}", link.short_id.bright_yellow().bold());
            println!("  Short URL: {}", service.short_url(&link).cyan());
            println!("  Target:    {}", link.target_url);
            println!();
        }
        LinkAction::Show { short_id } => {
            let link = service
                .resolve(&short_id)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            let Some(link) = link else {
                println!("{} {}", "No link for".yellow(), short_id.bright_white());
                return Ok(());
            };

            println!("  ID:        {}", link.id.to_string().bright_black());
            println!("  Short URL: {}", service.short_url(&link).cyan());
            println!("  Target:    {}", link.target_url);
            println!();
        }
    }

    Ok(())
}

/// Displays the number of stored links.
async fn handle_stats(config: &Config, pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links_count = link_service(config, pool)
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    println!(
        "  Links: {}",
        links_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1")
                .fetch_one(pool)
                .await
                .context("Database connection failed")?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
