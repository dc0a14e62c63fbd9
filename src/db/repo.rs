use async_trait::async_trait;

use super::model::*;

/// String key-value storage, the durable equivalent of browser local storage.
#[async_trait]
pub trait KeyValueRepo: Send + Sync {
    async fn get_entry(&self, key: &str) -> DbResult<StorageEntry>;
    async fn upsert_entry(&self, key: &str, value: &str) -> DbResult<()>;
    async fn delete_entry(&self, key: &str) -> DbResult<()>;
}
