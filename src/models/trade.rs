use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Side, TradeStatus};
use crate::trading::pnl::calculate_pnl;

fn default_one() -> f64 {
    1.0
}

/// A single journaled trade, owned by exactly one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: u64,
    pub owner_id: String,
    pub symbol: String,
    pub side: Side,
    pub quantity: f64,
    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default = "default_one")]
    pub leverage: f64,
    #[serde(default = "default_one")]
    pub contract_size: f64,
    pub trade_date: DateTime<Utc>,
    pub status: TradeStatus,
    #[serde(default)]
    pub pnl: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

impl TradeRecord {
    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    /// Closed with a realized P&L. Only these feed the performance ratios.
    pub fn realized_pnl(&self) -> Option<f64> {
        if self.is_closed() {
            self.pnl
        } else {
            None
        }
    }

    pub fn close(&mut self, exit_price: f64) {
        self.exit_price = Some(exit_price);
        self.recompute();
    }

    pub fn reopen(&mut self) {
        self.exit_price = None;
        self.recompute();
    }

    /// Re-derive status and pnl from the exit price.
    pub fn recompute(&mut self) {
        match self.exit_price {
            Some(exit) => {
                self.status = TradeStatus::Closed;
                self.pnl = Some(calculate_pnl(
                    self.side,
                    self.quantity,
                    self.entry_price,
                    exit,
                    self.leverage,
                    self.contract_size,
                ));
            }
            None => {
                self.status = TradeStatus::Open;
                self.pnl = None;
            }
        }
    }
}

/// Input for logging a trade. Unset leverage / contract size fall back to
/// the journal defaults; an unset date means "now".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub symbol: String,
    pub side: Side,
    pub quantity: f64,
    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub leverage: Option<f64>,
    #[serde(default)]
    pub contract_size: Option<f64>,
    #[serde(default)]
    pub trade_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
}

impl NewTrade {
    pub fn new(symbol: &str, side: Side, quantity: f64, entry_price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            side,
            quantity,
            entry_price,
            exit_price: None,
            leverage: None,
            contract_size: None,
            trade_date: None,
            notes: String::new(),
        }
    }
}

/// Partial edit. `exit_price: Some(None)` reopens a closed trade.
#[derive(Debug, Clone, Default)]
pub struct TradeUpdate {
    pub symbol: Option<String>,
    pub side: Option<Side>,
    pub quantity: Option<f64>,
    pub entry_price: Option<f64>,
    pub exit_price: Option<Option<f64>>,
    pub leverage: Option<f64>,
    pub contract_size: Option<f64>,
    pub trade_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl TradeUpdate {
    pub fn apply(self, record: &mut TradeRecord) {
        if let Some(symbol) = self.symbol {
            record.symbol = symbol;
        }
        if let Some(side) = self.side {
            record.side = side;
        }
        if let Some(quantity) = self.quantity {
            record.quantity = quantity;
        }
        if let Some(entry) = self.entry_price {
            record.entry_price = entry;
        }
        if let Some(exit) = self.exit_price {
            record.exit_price = exit;
        }
        if let Some(leverage) = self.leverage {
            record.leverage = leverage;
        }
        if let Some(contract_size) = self.contract_size {
            record.contract_size = contract_size;
        }
        if let Some(date) = self.trade_date {
            record.trade_date = date;
        }
        if let Some(notes) = self.notes {
            record.notes = notes;
        }
        record.recompute();
    }
}
