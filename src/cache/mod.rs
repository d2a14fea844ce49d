//! Cache-aside persistence for remote entity collections.
//!
//! This module provides a source-agnostic caching mechanism that:
//! - Persists one snapshot per collection in SQLite, replaced atomically on refresh
//! - Serves fresh snapshots without touching the network
//! - Falls back to stale snapshots when a refresh fails (offline mode)
//! - Accumulates paginated sources into a single logical fetch

mod collection;
mod freshness;
mod layer;
mod pagination;
mod store;

pub use collection::Collection;
pub use freshness::{is_stale, is_stale_at, ttl_from_minutes, DEFAULT_TTL_MINUTES};
pub use layer::CacheLayer;
pub use pagination::fetch_all_pages;
pub use store::{CacheEntry, CacheStore, SqliteStore};
