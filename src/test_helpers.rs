use chrono::{DateTime, Duration, Utc};

use crate::config::Config;
use crate::models::{Side, TradeRecord, TradeStatus};

fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Open trade dated `day_offset` days after the base date.
pub fn open_trade(
    owner: &str,
    symbol: &str,
    side: Side,
    quantity: f64,
    entry_price: f64,
    day_offset: i64,
) -> TradeRecord {
    TradeRecord {
        id: 1000 + day_offset as u64,
        owner_id: owner.to_string(),
        symbol: symbol.to_string(),
        side,
        quantity,
        entry_price,
        exit_price: None,
        leverage: 1.0,
        contract_size: 1.0,
        trade_date: base_time() + Duration::days(day_offset),
        status: TradeStatus::Open,
        pnl: None,
        notes: String::new(),
    }
}

/// Closed long trade with a fixed pnl, bypassing the P&L calculation.
pub fn closed_with_pnl(
    id: u64,
    pnl: f64,
    entry_price: f64,
    quantity: f64,
    day_offset: i64,
) -> TradeRecord {
    TradeRecord {
        id,
        owner_id: "trader".to_string(),
        symbol: "ES".to_string(),
        side: Side::Long,
        quantity,
        entry_price,
        exit_price: Some(entry_price + pnl / quantity),
        leverage: 1.0,
        contract_size: 1.0,
        trade_date: base_time() + Duration::days(day_offset),
        status: TradeStatus::Closed,
        pnl: Some(pnl),
        notes: String::new(),
    }
}

/// Closed trade for a given owner and symbol.
pub fn owned_closed(owner: &str, symbol: &str, id: u64, pnl: f64, day_offset: i64) -> TradeRecord {
    let mut t = closed_with_pnl(id, pnl, 100.0, 1.0, day_offset);
    t.owner_id = owner.to_string();
    t.symbol = symbol.to_string();
    t
}

pub fn default_test_config() -> Config {
    Config {
        journal_file: std::env::temp_dir()
            .join(format!("trade_journal_test_{}.json", std::process::id()))
            .to_string_lossy()
            .to_string(),
        log_level: "info".to_string(),
        default_leverage: 1.0,
        default_contract_size: 1.0,
        default_page_size: 50,
    }
}
