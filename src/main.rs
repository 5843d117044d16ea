use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use trade_journal::config::Config;
use trade_journal::models::{NewTrade, Side};
use trade_journal::store::JsonFileStore;
use trade_journal::trading::TradeJournal;

#[derive(Parser, Debug)]
#[command(name = "trade-journal", about = "Trading journal and performance statistics")]
struct Cli {
    /// Journal file (overrides JOURNAL_FILE)
    #[arg(long, global = true)]
    journal: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Performance statistics for one owner
    Stats { owner: String },
    /// Anonymized aggregate across all owners
    Dashboard,
    /// Log a new trade
    Log {
        owner: String,
        symbol: String,
        side: Side,
        quantity: f64,
        entry: f64,
        #[arg(long)]
        exit: Option<f64>,
        #[arg(long)]
        leverage: Option<f64>,
        #[arg(long)]
        contract_size: Option<f64>,
        /// RFC 3339 timestamp, defaults to now
        #[arg(long)]
        date: Option<DateTime<Utc>>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Close an open trade
    Close { owner: String, id: u64, exit: f64 },
    /// Delete a trade
    Delete { owner: String, id: u64 },
    /// List trades, newest first
    List {
        owner: String,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = Config::from_env();
    if let Some(path) = cli.journal {
        cfg.journal_file = path;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    // stdout carries the JSON output
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let store = JsonFileStore::open(&cfg.journal_file)
        .await
        .with_context(|| format!("failed to open journal {}", cfg.journal_file))?;
    info!("Using journal {}", store.path().display());
    let journal = TradeJournal::new(Arc::new(store), &cfg);

    match cli.command {
        Command::Stats { owner } => print_json(&journal.statistics(&owner).await?)?,
        Command::Dashboard => print_json(&journal.dashboard().await?)?,
        Command::Log {
            owner,
            symbol,
            side,
            quantity,
            entry,
            exit,
            leverage,
            contract_size,
            date,
            notes,
        } => {
            let trade = NewTrade {
                exit_price: exit,
                leverage,
                contract_size,
                trade_date: date,
                notes,
                ..NewTrade::new(&symbol, side, quantity, entry)
            };
            print_json(&journal.log_trade(&owner, trade).await?)?;
        }
        Command::Close { owner, id, exit } => {
            print_json(&journal.close_trade(&owner, id, exit).await?)?
        }
        Command::Delete { owner, id } => journal.delete_trade(&owner, id).await?,
        Command::List {
            owner,
            limit,
            offset,
        } => {
            let limit = limit.unwrap_or(cfg.default_page_size);
            print_json(&journal.list_trades(&owner, limit, offset).await?)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
