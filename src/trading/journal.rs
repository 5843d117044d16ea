use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{JournalError, Result};
use crate::models::{NewTrade, TradeRecord, TradeStatus, TradeUpdate};
use crate::store::TradeStore;
use crate::trading::dashboard::{build_dashboard, DashboardSummary};
use crate::trading::statistics::{compute_statistics, StatisticsSummary};

/// Trade lifecycle operations over a [`TradeStore`].
pub struct TradeJournal {
    store: Arc<dyn TradeStore>,
    default_leverage: f64,
    default_contract_size: f64,
}

impl TradeJournal {
    pub fn new(store: Arc<dyn TradeStore>, cfg: &Config) -> Self {
        Self {
            store,
            default_leverage: cfg.default_leverage,
            default_contract_size: cfg.default_contract_size,
        }
    }

    pub async fn log_trade(&self, owner: &str, trade: NewTrade) -> Result<TradeRecord> {
        let owner = validate_owner(owner)?;
        let mut record = TradeRecord {
            id: 0,
            owner_id: owner.to_string(),
            symbol: normalize_symbol(&trade.symbol),
            side: trade.side,
            quantity: trade.quantity,
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            leverage: trade.leverage.unwrap_or(self.default_leverage),
            contract_size: trade.contract_size.unwrap_or(self.default_contract_size),
            trade_date: trade.trade_date.unwrap_or_else(Utc::now),
            status: TradeStatus::Open,
            pnl: None,
            notes: trade.notes,
        };
        validate(&record)?;
        record.recompute();

        let record = self.store.insert(record).await?;
        info!(
            "Logged trade #{} {} {} x{} @ {:.2} [{}]",
            record.id, record.side, record.symbol, record.quantity, record.entry_price, record.status
        );
        Ok(record)
    }

    pub async fn close_trade(&self, owner: &str, id: u64, exit_price: f64) -> Result<TradeRecord> {
        check_positive("exit price", exit_price)?;
        let mut record = self.fetch(owner, id).await?;
        if record.is_closed() {
            warn!("Trade #{} already closed, overwriting exit price", id);
        }
        record.close(exit_price);
        let record = self.store.update(record).await?;
        info!(
            "Closed trade #{} {} @ {:.2} → PnL {:+.2}",
            record.id,
            record.symbol,
            exit_price,
            record.pnl.unwrap_or(0.0)
        );
        Ok(record)
    }

    pub async fn edit_trade(&self, owner: &str, id: u64, update: TradeUpdate) -> Result<TradeRecord> {
        let mut record = self.fetch(owner, id).await?;
        update.apply(&mut record);
        record.symbol = normalize_symbol(&record.symbol);
        validate(&record)?;
        record.recompute();
        let record = self.store.update(record).await?;
        debug!("Edited trade #{}", record.id);
        Ok(record)
    }

    pub async fn delete_trade(&self, owner: &str, id: u64) -> Result<()> {
        if !self.store.delete(owner, id).await? {
            return Err(JournalError::NotFound {
                owner: owner.to_string(),
                id,
            });
        }
        info!("Deleted trade #{}", id);
        Ok(())
    }

    /// Newest-first page for display. Not for statistics.
    pub async fn list_trades(&self, owner: &str, limit: usize, offset: usize) -> Result<Vec<TradeRecord>> {
        let trades = self.store.list_by_owner(owner).await?;
        Ok(trades.into_iter().skip(offset).take(limit).collect())
    }

    /// Statistics over the owner's complete trade set.
    pub async fn statistics(&self, owner: &str) -> Result<StatisticsSummary> {
        let trades = self.store.list_by_owner(owner).await?;
        debug!("Computing statistics over {} trade(s)", trades.len());
        Ok(compute_statistics(&trades))
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary> {
        let trades = self.store.all().await?;
        Ok(build_dashboard(&trades))
    }

    async fn fetch(&self, owner: &str, id: u64) -> Result<TradeRecord> {
        self.store
            .get(owner, id)
            .await?
            .ok_or_else(|| JournalError::NotFound {
                owner: owner.to_string(),
                id,
            })
    }
}

fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

fn validate_owner(owner: &str) -> Result<&str> {
    let owner = owner.trim();
    if owner.is_empty() {
        return Err(JournalError::Validation("owner is required".to_string()));
    }
    Ok(owner)
}

fn check_positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(JournalError::Validation(format!(
            "{} must be a positive number, got {}",
            field, value
        )))
    }
}

fn validate(record: &TradeRecord) -> Result<()> {
    if record.symbol.is_empty() {
        return Err(JournalError::Validation("symbol is required".to_string()));
    }
    check_positive("quantity", record.quantity)?;
    check_positive("entry price", record.entry_price)?;
    if let Some(exit) = record.exit_price {
        check_positive("exit price", exit)?;
    }
    check_positive("leverage", record.leverage)?;
    check_positive("contract size", record.contract_size)?;
    Ok(())
}
