use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;

use trade_journal::config::Config;
use trade_journal::models::{NewTrade, Side};

pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// A trade dated `day_offset` days after the base date, closed if `exit` is set.
pub fn make_trade(
    symbol: &str,
    side: Side,
    quantity: f64,
    entry: f64,
    exit: Option<f64>,
    day_offset: i64,
) -> NewTrade {
    NewTrade {
        exit_price: exit,
        trade_date: Some(base_time() + Duration::days(day_offset)),
        ..NewTrade::new(symbol, side, quantity, entry)
    }
}

/// Per-test journal path under the temp dir, removed if left over.
pub fn journal_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir()
        .join(format!("trade_journal_integ_{}", std::process::id()))
        .join(format!("{}.json", name));
    let _ = std::fs::remove_file(&path);
    path
}

pub fn test_config(path: &PathBuf) -> Config {
    let mut cfg = Config::from_env();
    cfg.journal_file = path.to_string_lossy().to_string();
    cfg.default_leverage = 1.0;
    cfg.default_contract_size = 1.0;
    cfg
}
