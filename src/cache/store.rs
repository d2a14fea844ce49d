//! Cache storage trait and SQLite implementation.

use chrono::{DateTime, Duration, Utc};
use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use super::collection::Collection;

/// Every collection table holds a single snapshot row under this id.
const SNAPSHOT_ROW_ID: i64 = 1;

/// How long a writer waits on a lock held by another process.
const BUSY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// A persisted snapshot of one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
  pub collection: Collection,
  /// Records in the order they were fetched
  pub records: Vec<T>,
  /// When the snapshot was written
  pub cached_at: DateTime<Utc>,
}

/// Trait for cache storage backends.
pub trait CacheStore: Send + Sync {
  /// Read the snapshot for a collection.
  ///
  /// Never fails: anything that cannot be read back is logged and treated as absent.
  fn read<T: DeserializeOwned>(&self, collection: Collection) -> Option<CacheEntry<T>>;

  /// Replace the snapshot for a collection with an explicit timestamp.
  ///
  /// `ttl` is recorded alongside the timestamp for inspection only; freshness
  /// is always judged against the TTL of the reading call.
  fn write_at<T: Serialize>(
    &self,
    collection: Collection,
    records: &[T],
    cached_at: DateTime<Utc>,
    ttl: Duration,
  ) -> Result<()>;

  /// Replace the snapshot for a collection, stamped with the current time.
  fn write<T: Serialize>(
    &self,
    collection: Collection,
    records: &[T],
    ttl: Duration,
  ) -> Result<DateTime<Utc>> {
    let now = Utc::now();
    self.write_at(collection, records, now, ttl)?;
    Ok(now)
  }
}

/// SQLite-based cache storage implementation.
pub struct SqliteStore {
  conn: Mutex<Connection>,
}

impl SqliteStore {
  /// Open the store at the default location.
  pub fn open_default() -> Result<Self> {
    Self::open(&Self::default_path()?)
  }

  /// Open or create the store at `path`.
  pub fn open(path: &Path) -> Result<Self> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create cache directory: {}", e))?;
    }

    let conn = Connection::open(path)
      .map_err(|e| eyre!("Failed to open cache database at {}: {}", path.display(), e))?;

    let mode: String = conn
      .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
      .map_err(|e| eyre!("Failed to enable WAL mode: {}", e))?;
    debug!(path = %path.display(), journal_mode = %mode, "Opened cache database");

    Self::from_connection(conn)
  }

  /// Open a throwaway store that lives only as long as the process.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()
      .map_err(|e| eyre!("Failed to open in-memory cache database: {}", e))?;
    Self::from_connection(conn)
  }

  /// Get the default database path.
  pub fn default_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("brevo-dash").join("cache.db"))
  }

  fn from_connection(conn: Connection) -> Result<Self> {
    conn
      .busy_timeout(BUSY_TIMEOUT)
      .map_err(|e| eyre!("Failed to set busy timeout: {}", e))?;

    let storage = Self {
      conn: Mutex::new(conn),
    };
    storage.run_migrations()?;

    Ok(storage)
  }

  /// Create cache tables if they don't exist yet.
  fn run_migrations(&self) -> Result<()> {
    self
      .lock()?
      .execute_batch(CACHE_SCHEMA)
      .map_err(|e| eyre!("Failed to run cache migrations: {}", e))?;

    Ok(())
  }

  fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
    self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))
  }

  fn try_read<T: DeserializeOwned>(&self, collection: Collection) -> Result<Option<CacheEntry<T>>> {
    let (data, timestamp) = {
      let mut conn = self.lock()?;
      let tx = conn
        .transaction()
        .map_err(|e| eyre!("Failed to begin transaction: {}", e))?;

      let data: Option<String> = tx
        .query_row(
          &format!("SELECT data FROM {} WHERE id = ?", collection.table()),
          params![SNAPSHOT_ROW_ID],
          |row| row.get(0),
        )
        .optional()
        .map_err(|e| eyre!("Failed to read cached {}: {}", collection, e))?;

      let timestamp: Option<i64> = tx
        .query_row(
          "SELECT timestamp FROM cache_metadata WHERE key = ?",
          params![collection.key()],
          |row| row.get(0),
        )
        .optional()
        .map_err(|e| eyre!("Failed to read cache metadata for {}: {}", collection, e))?;

      tx.commit()
        .map_err(|e| eyre!("Failed to commit transaction: {}", e))?;

      (data, timestamp)
    };

    // Both rows are written together; one without the other is not a snapshot
    let (Some(data), Some(timestamp)) = (data, timestamp) else {
      return Ok(None);
    };

    let cached_at = DateTime::from_timestamp_millis(timestamp)
      .ok_or_else(|| eyre!("Invalid cache timestamp {} for {}", timestamp, collection))?;

    let records = serde_json::from_str(&data)
      .map_err(|e| eyre!("Failed to deserialize cached {}: {}", collection, e))?;

    Ok(Some(CacheEntry {
      collection,
      records,
      cached_at,
    }))
  }
}

/// Schema for cache tables.
const CACHE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS campaigns (
    id INTEGER PRIMARY KEY,
    data TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY,
    data TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

-- Last refresh per collection (unix millis) and the TTL it was refreshed under
CREATE TABLE IF NOT EXISTS cache_metadata (
    key TEXT PRIMARY KEY,
    timestamp INTEGER NOT NULL,
    ttl_minutes INTEGER NOT NULL DEFAULT 15
);
"#;

impl CacheStore for SqliteStore {
  fn read<T: DeserializeOwned>(&self, collection: Collection) -> Option<CacheEntry<T>> {
    match self.try_read(collection) {
      Ok(entry) => entry,
      Err(e) => {
        warn!(%collection, error = %e, "Ignoring unreadable cache entry");
        None
      }
    }
  }

  fn write_at<T: Serialize>(
    &self,
    collection: Collection,
    records: &[T],
    cached_at: DateTime<Utc>,
    ttl: Duration,
  ) -> Result<()> {
    let data = serde_json::to_string(records)
      .map_err(|e| eyre!("Failed to serialize {}: {}", collection, e))?;
    let timestamp = cached_at.timestamp_millis();
    let ttl_minutes = ttl.num_minutes().max(0);

    let mut conn = self.lock()?;
    let tx = conn
      .transaction()
      .map_err(|e| eyre!("Failed to begin transaction: {}", e))?;

    tx.execute(
      &format!(
        "INSERT OR REPLACE INTO {} (id, data, created_at) VALUES (?, ?, ?)",
        collection.table()
      ),
      params![SNAPSHOT_ROW_ID, data, timestamp],
    )
    .map_err(|e| eyre!("Failed to store {}: {}", collection, e))?;

    tx.execute(
      "INSERT INTO cache_metadata (key, timestamp, ttl_minutes) VALUES (?, ?, ?)
       ON CONFLICT(key) DO UPDATE SET
         timestamp = excluded.timestamp,
         ttl_minutes = excluded.ttl_minutes",
      params![collection.key(), timestamp, ttl_minutes],
    )
    .map_err(|e| eyre!("Failed to update cache metadata: {}", e))?;

    tx.commit()
      .map_err(|e| eyre!("Failed to commit transaction: {}", e))?;

    debug!(%collection, count = records.len(), "Stored snapshot");
    Ok(())
  }
}
