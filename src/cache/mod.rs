//! Recommendation lists shown as carousels next to the search results.
//!
//! Each search response carries a snapshot of the "recently opened" and
//! "top scored" lists. They are persisted so later searches (and later runs)
//! can show them before their own response arrives.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::api::Movie;
use crate::db::{DbError, KeyValueRepo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendationList {
    RecentlyOpened,
    TopScored,
}

impl RecommendationList {
    pub const ALL: [RecommendationList; 2] =
        [RecommendationList::RecentlyOpened, RecommendationList::TopScored];

    pub fn storage_key(self) -> &'static str {
        match self {
            RecommendationList::RecentlyOpened => "openMovie",
            RecommendationList::TopScored => "scoreMovie",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RecommendationList::RecentlyOpened => "New Movies!",
            RecommendationList::TopScored => "Hot Movies!",
        }
    }
}

impl fmt::Display for RecommendationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Storage error: {0}")]
    Db(#[from] DbError),
    #[error("Invalid cached list {0}: {1}")]
    Json(RecommendationList, serde_json::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;

#[async_trait]
pub trait RecommendationCache: Send + Sync {
    /// `None` when nothing has been stored under this list yet.
    async fn get(&self, list: RecommendationList) -> CacheResult<Option<Vec<Movie>>>;
    async fn set(&self, list: RecommendationList, movies: &[Movie]) -> CacheResult<()>;
    async fn clear(&self, list: RecommendationList) -> CacheResult<()>;

    /// Store an empty list under every absent key.
    async fn ensure_initialized(&self) -> CacheResult<()> {
        for list in RecommendationList::ALL {
            if self.get(list).await?.is_none() {
                debug!(list = %list, "initializing empty recommendation list");
                self.set(list, &[]).await?;
            }
        }
        Ok(())
    }
}

/// Recommendation lists stored as JSON arrays in a key-value repository.
#[derive(Clone)]
pub struct StoredRecommendations {
    repo: Arc<dyn KeyValueRepo>,
}

impl StoredRecommendations {
    pub fn new(repo: Arc<dyn KeyValueRepo>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RecommendationCache for StoredRecommendations {
    async fn get(&self, list: RecommendationList) -> CacheResult<Option<Vec<Movie>>> {
        let entry = match self.repo.get_entry(list.storage_key()).await {
            Ok(entry) => entry,
            Err(DbError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let movies =
            serde_json::from_str(&entry.value).map_err(|e| CacheError::Json(list, e))?;
        Ok(Some(movies))
    }

    async fn set(&self, list: RecommendationList, movies: &[Movie]) -> CacheResult<()> {
        let value = serde_json::to_string(movies).map_err(|e| CacheError::Json(list, e))?;
        self.repo.upsert_entry(list.storage_key(), &value).await?;
        Ok(())
    }

    async fn clear(&self, list: RecommendationList) -> CacheResult<()> {
        self.repo.delete_entry(list.storage_key()).await?;
        Ok(())
    }
}
