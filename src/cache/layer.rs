//! Cache layer that orchestrates caching logic with network fetching.

use chrono::{Duration, Utc};
use color_eyre::{eyre::eyre, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::collection::Collection;
use super::freshness::is_stale;
use super::store::{CacheEntry, CacheStore};

/// Cache layer that manages caching logic and network fetching.
///
/// This layer sits between the repositories and the remote client,
/// providing transparent caching with offline support. Store access runs
/// on the blocking pool so SQLite never stalls the async runtime.
pub struct CacheLayer<S: CacheStore> {
  storage: Arc<S>,
}

impl<S: CacheStore + 'static> CacheLayer<S> {
  /// Create a new cache layer with the given storage backend.
  pub fn new(storage: S) -> Self {
    Self {
      storage: Arc::new(storage),
    }
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  /// Fetch a collection with a cache-first strategy.
  ///
  /// 1. Check cache - if fresh, return immediately
  /// 2. If stale/missing, fetch from network
  /// 3. On success, replace the snapshot and return the fresh records
  /// 4. On failure, return the stale snapshot if there is one, otherwise error
  ///
  /// The result is always a complete snapshot, never a partial or merged one.
  pub async fn get_or_refresh<T, F, Fut>(
    &self,
    collection: Collection,
    ttl: Duration,
    fetcher: F,
  ) -> Result<Vec<T>>
  where
    T: Serialize + DeserializeOwned + Send + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
  {
    let cached = match self.read(collection).await {
      Some(entry) if !is_stale(entry.cached_at, ttl) => {
        info!(
          %collection,
          age_minutes = age_minutes(&entry),
          ttl_minutes = ttl.num_minutes(),
          "Cache hit"
        );
        return Ok(entry.records);
      }
      other => other,
    };

    info!(
      %collection,
      status = if cached.is_some() { "stale" } else { "miss" },
      "Fetching fresh data from source"
    );

    match fetcher().await {
      Ok(records) => self.write(collection, records, ttl).await,
      Err(fetch_error) => {
        error!(%collection, error = %format!("{:#}", fetch_error), "Fetch failed");

        match cached {
          Some(entry) => {
            // Network failed, return stale cache (offline mode)
            warn!(
              %collection,
              age_minutes = age_minutes(&entry),
              ttl_minutes = ttl.num_minutes(),
              "Returning stale cache after fetch failure"
            );
            Ok(entry.records)
          }
          None => Err(eyre!(
            "Failed to fetch {} from source and no cached data available. Original error: {:#}",
            collection,
            fetch_error
          )),
        }
      }
    }
  }

  async fn read<T>(&self, collection: Collection) -> Option<CacheEntry<T>>
  where
    T: DeserializeOwned + Send + 'static,
  {
    let storage = Arc::clone(&self.storage);
    match tokio::task::spawn_blocking(move || storage.read(collection)).await {
      Ok(entry) => entry,
      Err(e) => {
        warn!(%collection, error = %e, "Cache read task failed");
        None
      }
    }
  }

  /// Persist fresh records, handing them back even if the write itself failed.
  async fn write<T>(
    &self,
    collection: Collection,
    records: Vec<T>,
    ttl: Duration,
  ) -> Result<Vec<T>>
  where
    T: Serialize + Send + 'static,
  {
    let storage = Arc::clone(&self.storage);
    let task = tokio::task::spawn_blocking(move || {
      let result = storage.write(collection, &records, ttl);
      (records, result)
    });

    let (records, result) = task
      .await
      .map_err(|e| eyre!("Cache write task for {} failed: {}", collection, e))?;

    match result {
      Ok(_) => info!(%collection, count = records.len(), "Fresh data saved to cache"),
      Err(e) => error!(%collection, error = %e, "Failed to save fresh data to cache"),
    }

    Ok(records)
  }
}

fn age_minutes<T>(entry: &CacheEntry<T>) -> i64 {
  (Utc::now() - entry.cached_at).num_minutes()
}

impl<S: CacheStore> Clone for CacheLayer<S> {
  fn clone(&self) -> Self {
    Self {
      storage: Arc::clone(&self.storage),
    }
  }
}
