//! # eterno
//!
//! Command-line front end for the Eterno order tracker.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  argv ──► clap ──► AppConfig::load ──► command ──► JSON on stdout      │
//! │                         │                 │                             │
//! │                         ▼                 ▼                             │
//! │                  PricingConfig      eterno-db (store commands only)    │
//! │                                                                         │
//! │  Logs go to stderr (RUST_LOG, default "info").                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Examples
//! ```text
//! eterno quote --product Large --quantity 2 --discount 10 \
//!              --advance 5000 --installments-advance 3
//! eterno add --client "Ana Torres" --product Small --session-date 2026-11-15
//! eterno summary --from 2026-10-01 --to 2026-10-31
//! ```

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use eterno_db::{Database, DbConfig};

use crate::commands::{OrderArgs, RangeArgs, TermsArgs};
use crate::config::{AppConfig, ENV_CONFIG};

#[derive(Parser, Debug)]
#[command(name = "eterno", version, about = "Price and track Eterno studio orders")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true, env = ENV_CONFIG)]
    config: Option<PathBuf>,

    /// SQLite database file; overrides config and ETERNO_DB_PATH
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the product catalog and financing surcharges
    Catalog,
    /// Price an order without storing it
    Quote(TermsArgs),
    /// Store a new order
    Add(OrderArgs),
    /// Replace a stored order's details
    Update {
        id: i64,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Delete a stored order
    Delete { id: i64 },
    /// Mark an order's balance as collected
    MarkPaid { id: i64 },
    /// List stored orders with their breakdowns, newest first
    List(RangeArgs),
    /// Dashboard totals
    Summary(RangeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.clone()).context("Failed to load configuration")?;
    if let Some(path) = cli.db.clone() {
        debug!(?path, "Overriding database path from command line");
        config.database.path = path;
    }

    let today = Local::now().date_naive();
    run(cli.command, &config, today).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=eterno_db=debug` - Show store queries only
/// - Default: INFO, sqlx at WARN
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command, config: &AppConfig, today: NaiveDate) -> Result<()> {
    let pricing = &config.pricing;

    match command {
        Command::Catalog => print_json(commands::catalog(pricing)),
        Command::Quote(args) => print_json(&commands::quote(pricing, &args, today)?),
        Command::Add(args) => {
            let db = open_store(config).await?;
            print_json(&commands::add(&db, pricing, &args, today).await?)
        }
        Command::Update { id, order } => {
            let db = open_store(config).await?;
            print_json(&commands::update(&db, pricing, id, &order, today).await?)
        }
        Command::Delete { id } => {
            let db = open_store(config).await?;
            print_json(&commands::delete(&db, id).await?)
        }
        Command::MarkPaid { id } => {
            let db = open_store(config).await?;
            print_json(&commands::mark_paid(&db, pricing, id, today).await?)
        }
        Command::List(args) => {
            let db = open_store(config).await?;
            print_json(&commands::list(&db, pricing, &args, today).await?)
        }
        Command::Summary(args) => {
            let db = open_store(config).await?;
            print_json(&commands::summary(&db, pricing, &args, today).await?)
        }
    }
}

/// Opens the order store, creating the parent directory if needed.
async fn open_store(config: &AppConfig) -> Result<Database> {
    let path = &config.database.path;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    info!(path = %path.display(), "Opening order store");
    Database::new(DbConfig::new(path))
        .await
        .with_context(|| format!("Failed to open database {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_quote() {
        let cli = Cli::try_parse_from([
            "eterno",
            "quote",
            "--product",
            "Large",
            "--quantity",
            "2",
            "--discount",
            "10",
            "--advance",
            "5000.50",
            "--installments-advance",
            "3",
            "--session-date",
            "2026-11-15",
        ])
        .unwrap();

        match cli.command {
            Command::Quote(args) => {
                assert_eq!(args.quantity, 2);
                assert_eq!(args.advance.cents(), 500_050);
                assert_eq!(args.installments_advance, 3);
                assert_eq!(
                    args.session_date,
                    NaiveDate::from_ymd_opt(2026, 11, 15)
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_update_with_global_db() {
        let cli = Cli::try_parse_from([
            "eterno", "update", "7", "--client", "Ana", "--product", "Small", "--db", "/tmp/x.db",
        ])
        .unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        match cli.command {
            Command::Update { id, order } => {
                assert_eq!(id, 7);
                assert_eq!(order.client, "Ana");
                assert_eq!(order.terms.quantity, 1);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert!(Cli::try_parse_from(["eterno", "quote", "--product", "Large", "--advance", "12.345"]).is_err());
        assert!(Cli::try_parse_from(["eterno", "list", "--from", "18/10/2026"]).is_err());
    }
}
