use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::model::*;
use super::repo::*;

/// Volatile storage used as a test double for the SQLite repository.
#[derive(Default)]
pub struct MemoryRepository {
    entries: RwLock<BTreeMap<String, StorageEntry>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueRepo for MemoryRepository {
    async fn get_entry(&self, key: &str) -> DbResult<StorageEntry> {
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| DbError::NotFound(format!("Storage key not found: {}", key)))
    }

    async fn upsert_entry(&self, key: &str, value: &str) -> DbResult<()> {
        let entry = StorageEntry {
            key: key.to_string(),
            value: value.to_string(),
            updated: Some(Utc::now()),
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete_entry(&self, key: &str) -> DbResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
