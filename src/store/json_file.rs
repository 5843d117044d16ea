use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::TradeRecord;
use crate::store::{JournalSnapshot, TradeStore, TradeTable};

/// Store backed by a JSON snapshot file, rewritten after every mutation.
///
/// Mutations are applied to a copy of the table and committed only once the
/// snapshot is on disk, all under the write lock. A failed write leaves both
/// the file and the in-memory table unchanged.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    table: RwLock<TradeTable>,
}

impl JsonFileStore {
    /// Loads `path`, starting empty if it does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = match fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str::<JournalSnapshot>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No journal at {}, starting empty", path.display());
                JournalSnapshot::default()
            }
            Err(e) => return Err(e.into()),
        };
        info!(
            "Loaded {} trade(s) from {}",
            snapshot.trades.len(),
            path.display()
        );
        Ok(Self {
            path,
            table: RwLock::new(TradeTable::from_snapshot(snapshot)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, table: &TradeTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(&table.snapshot())?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!("Journal written to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl TradeStore for JsonFileStore {
    async fn insert(&self, record: TradeRecord) -> Result<TradeRecord> {
        let mut table = self.table.write().await;
        let mut next = table.clone();
        let record = next.insert(record);
        self.persist(&next).await?;
        *table = next;
        Ok(record)
    }

    async fn get(&self, owner: &str, id: u64) -> Result<Option<TradeRecord>> {
        Ok(self.table.read().await.get(owner, id))
    }

    async fn update(&self, record: TradeRecord) -> Result<TradeRecord> {
        let mut table = self.table.write().await;
        let mut next = table.clone();
        let record = next.update(record)?;
        self.persist(&next).await?;
        *table = next;
        Ok(record)
    }

    async fn delete(&self, owner: &str, id: u64) -> Result<bool> {
        let mut table = self.table.write().await;
        let mut next = table.clone();
        let removed = next.delete(owner, id);
        if removed {
            self.persist(&next).await?;
            *table = next;
        }
        Ok(removed)
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
