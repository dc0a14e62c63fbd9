use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::model::*;
use super::repo::*;

pub struct SqliteRepository {
    pool: SqlitePool,
    entry_cache: Arc<RwLock<HashMap<String, StorageEntry>>>,
}

impl SqliteRepository {
    pub async fn new(db_path: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let repo = Self {
            pool,
            entry_cache: Arc::new(RwLock::new(HashMap::new())),
        };

        repo.init_schema().await?;

        info!("Storage initialized at {}", db_path);

        Ok(repo)
    }

    async fn init_schema(&self) -> DbResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::query(schema).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl KeyValueRepo for SqliteRepository {
    async fn get_entry(&self, key: &str) -> DbResult<StorageEntry> {
        {
            let cache = self.entry_cache.read().await;
            if let Some(entry) = cache.get(key) {
                return Ok(entry.clone());
            }
        }

        let entry = sqlx::query_as::<_, StorageEntry>(
            "SELECT key, value, updated FROM storage WHERE key = ?",
        )
        .bind(key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => DbError::NotFound(format!("Storage key not found: {}", key)),
            _ => DbError::Sqlx(e),
        })?;

        self.entry_cache
            .write()
            .await
            .insert(key.to_string(), entry.clone());

        Ok(entry)
    }

    async fn upsert_entry(&self, key: &str, value: &str) -> DbResult<()> {
        let entry = StorageEntry {
            key: key.to_string(),
            value: value.to_string(),
            updated: Some(Utc::now()),
        };

        sqlx::query("INSERT OR REPLACE INTO storage (key, value, updated) VALUES (?, ?, ?)")
            .bind(&entry.key)
            .bind(&entry.value)
            .bind(entry.updated)
            .execute(&self.pool)
            .await?;

        debug!(key = key, bytes = value.len(), "storage entry written");
        self.entry_cache.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete_entry(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        self.entry_cache.write().await.remove(key);
        Ok(())
    }
}
