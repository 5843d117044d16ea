pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{JournalError, Result};
use crate::models::TradeRecord;

/// Owner-scoped trade storage.
///
/// `list_by_owner` must return the owner's complete set; statistics are
/// computed from it directly.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Stores a new record, assigning the next id.
    async fn insert(&self, record: TradeRecord) -> Result<TradeRecord>;
    async fn get(&self, owner: &str, id: u64) -> Result<Option<TradeRecord>>;
    async fn update(&self, record: TradeRecord) -> Result<TradeRecord>;
    async fn delete(&self, owner: &str, id: u64) -> Result<bool>;
    /// Newest first.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<TradeRecord>>;
    async fn owners(&self) -> Result<Vec<String>>;
    async fn all(&self) -> Result<Vec<TradeRecord>>;
}

/// Serialized form of a journal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSnapshot {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub trades: Vec<TradeRecord>,
}

/// In-memory table shared by both store implementations.
#[derive(Debug, Clone, Default)]
pub(crate) struct TradeTable {
    next_id: u64,
    trades: BTreeMap<u64, TradeRecord>,
}

impl TradeTable {
    pub(crate) fn from_snapshot(snapshot: JournalSnapshot) -> Self {
        let max_id = snapshot.trades.iter().map(|t| t.id).max().unwrap_or(0);
        let trades = snapshot.trades.into_iter().map(|t| (t.id, t)).collect();
        Self {
            next_id: snapshot.next_id.max(max_id),
            trades,
        }
    }

    pub(crate) fn snapshot(&self) -> JournalSnapshot {
        JournalSnapshot {
            next_id: self.next_id,
            trades: self.trades.values().cloned().collect(),
        }
    }

    pub(crate) fn insert(&mut self, mut record: TradeRecord) -> TradeRecord {
        self.next_id += 1;
        record.id = self.next_id;
        self.trades.insert(record.id, record.clone());
        record
    }

    pub(crate) fn get(&self, owner: &str, id: u64) -> Option<TradeRecord> {
        self.trades
            .get(&id)
            .filter(|t| t.owner_id == owner)
            .cloned()
    }

    pub(crate) fn update(&mut self, record: TradeRecord) -> Result<TradeRecord> {
        match self.trades.get_mut(&record.id) {
            Some(existing) if existing.owner_id == record.owner_id => {
                *existing = record.clone();
                Ok(record)
            }
            _ => Err(JournalError::NotFound {
                owner: record.owner_id,
                id: record.id,
            }),
        }
    }

    pub(crate) fn delete(&mut self, owner: &str, id: u64) -> bool {
        if self.get(owner, id).is_none() {
            return false;
        }
        self.trades.remove(&id).is_some()
    }

    pub(crate) fn list_by_owner(&self, owner: &str) -> Vec<TradeRecord> {
        let mut out: Vec<TradeRecord> = self
            .trades
            .values()
            .filter(|t| t.owner_id == owner)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.trade_date.cmp(&a.trade_date).then(b.id.cmp(&a.id)));
        out
    }

    pub(crate) fn owners(&self) -> Vec<String> {
        let owners: BTreeSet<&str> = self.trades.values().map(|t| t.owner_id.as_str()).collect();
        owners.into_iter().map(str::to_string).collect()
    }

    pub(crate) fn all(&self) -> Vec<TradeRecord> {
        self.trades.values().cloned().collect()
    }
}
