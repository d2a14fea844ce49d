//! Brevo campaigns and contacts behind a local cache-aside store.
//!
//! Data flows from [`repositories`] through [`cache::CacheLayer`], which serves a
//! fresh SQLite snapshot when it can, refetches through the [`brevo`] client when
//! the snapshot is missing or stale, and falls back to stale rows when the API fails.

pub mod app;
pub mod brevo;
pub mod cache;
pub mod commands;
pub mod config;
pub mod event;
pub mod logging;
pub mod repositories;
pub mod ui;
