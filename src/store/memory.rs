use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::TradeRecord;
use crate::store::{JournalSnapshot, TradeStore, TradeTable};

/// Volatile store. Reads run concurrently, writes are exclusive.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<TradeTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: JournalSnapshot) -> Self {
        Self {
            table: RwLock::new(TradeTable::from_snapshot(snapshot)),
        }
    }

    pub async fn snapshot(&self) -> JournalSnapshot {
        self.table.read().await.snapshot()
    }
}

#[async_trait]
impl TradeStore for MemoryStore {
    async fn insert(&self, record: TradeRecord) -> Result<TradeRecord> {
        Ok(self.table.write().await.insert(record))
    }

    async fn get(&self, owner: &str, id: u64) -> Result<Option<TradeRecord>> {
        Ok(self.table.read().await.get(owner, id))
    }

    async fn update(&self, record: TradeRecord) -> Result<TradeRecord> {
        self.table.write().await.update(record)
    }

    async fn delete(&self, owner: &str, id: u64) -> Result<bool> {
        Ok(self.table.write().await.delete(owner, id))
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<TradeRecord>> {
        Ok(self.table.read().await.list_by_owner(owner))
    }

    async fn owners(&self) -> Result<Vec<String>> {
        Ok(self.table.read().await.owners())
    }

    async fn all(&self) -> Result<Vec<TradeRecord>> {
        Ok(self.table.read().await.all())
    }
}
