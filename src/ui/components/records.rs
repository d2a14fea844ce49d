use crate::cache::Collection;
use color_eyre::{eyre::eyre, Result};
use ratatui::widgets::TableState;
use std::future::Future;
use tokio::sync::oneshot;
use tracing::warn;

/// Rows of one collection, loaded in the background.
///
/// The last good rows stay on screen while a reload runs and after a reload
/// fails; the failure is shown in the title instead.
pub struct RecordTable<T> {
  collection: Collection,
  records: Vec<T>,
  pending: Option<oneshot::Receiver<Result<Vec<T>>>>,
  error: Option<String>,
  state: TableState,
}

impl<T: Send + 'static> RecordTable<T> {
  pub fn new(collection: Collection) -> Self {
    Self {
      collection,
      records: Vec::new(),
      pending: None,
      error: None,
      state: TableState::default(),
    }
  }

  /// Start a load on the runtime. A load still in flight is abandoned and its
  /// result never shows up.
  pub fn load<F>(&mut self, fetch: F)
  where
    F: Future<Output = Result<Vec<T>>> + Send + 'static,
  {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      // Receiver is gone when a newer load replaced this one
      let _ = tx.send(fetch.await);
    });
    self.pending = Some(rx);
  }

  pub fn collection(&self) -> Collection {
    self.collection
  }

  pub fn records(&self) -> &[T] {
    &self.records
  }

  pub fn state_mut(&mut self) -> &mut TableState {
    &mut self.state
  }

  pub fn is_loading(&self) -> bool {
    self.pending.is_some()
  }

  /// Error of the last finished load, if it failed.
  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  /// Pick up a finished load; returns true if rows or error changed.
  pub fn tick(&mut self) -> bool {
    let Some(rx) = self.pending.as_mut() else {
      return false;
    };

    let result = match rx.try_recv() {
      Ok(result) => result,
      Err(oneshot::error::TryRecvError::Empty) => return false,
      Err(oneshot::error::TryRecvError::Closed) => {
        Err(eyre!("Loading {} stopped without a result", self.collection))
      }
    };
    self.pending = None;

    match result {
      Ok(records) => {
        self.records = records;
        self.error = None;
        self.ensure_valid_selection();
      }
      Err(e) => {
        let message = format!("{:#}", e);
        warn!(collection = %self.collection, error = %message, "Dashboard load failed");
        self.error = Some(message);
      }
    }
    true
  }

  /// Block title like " Campaigns (42) "
  pub fn title(&self) -> String {
    let name = self.collection.label();
    if self.is_loading() {
      format!(" {} (loading...) ", name)
    } else if let Some(e) = &self.error {
      format!(" {} ({}, error: {}) ", name, self.records.len(), e)
    } else {
      format!(" {} ({}) ", name, self.records.len())
    }
  }

  pub fn select_next(&mut self) {
    if !self.records.is_empty() {
      let next = self
        .state
        .selected()
        .map_or(0, |i| (i + 1).min(self.records.len() - 1));
      self.state.select(Some(next));
    }
  }

  pub fn select_previous(&mut self) {
    if !self.records.is_empty() {
      let prev = self.state.selected().map_or(0, |i| i.saturating_sub(1));
      self.state.select(Some(prev));
    }
  }

  /// Keep the selection inside the row range after the rows change
  fn ensure_valid_selection(&mut self) {
    let len = self.records.len();
    match self.state.selected() {
      _ if len == 0 => self.state.select(None),
      Some(i) if i >= len => self.state.select(Some(len - 1)),
      None => self.state.select(Some(0)),
      Some(_) => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::brevo::fake::FakeApi;
  use crate::brevo::Contact;
  use crate::cache::{CacheLayer, SqliteStore};
  use crate::repositories::ContactRepository;
  use chrono::Duration;
  use std::sync::Arc;

  type Contacts = Arc<ContactRepository<SqliteStore, FakeApi>>;

  fn contacts(api: Arc<FakeApi>) -> Contacts {
    let cache = CacheLayer::new(SqliteStore::open_in_memory().unwrap());
    Arc::new(ContactRepository::new(cache, api, Duration::minutes(15), 10))
  }

  fn load(table: &mut RecordTable<Contact>, repo: &Contacts, ttl: Duration) {
    let repo = Arc::clone(repo);
    table.load(async move { repo.get_with_ttl(ttl).await });
  }

  /// Tick until the pending load has landed.
  async fn settle(table: &mut RecordTable<Contact>) {
    tokio::time::timeout(std::time::Duration::from_secs(2), async {
      while !table.tick() {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
      }
    })
    .await
    .unwrap();
  }

  #[tokio::test]
  async fn test_rows_arrive_on_tick() {
    let repo = contacts(Arc::new(FakeApi::with_contacts(23)));
    let mut table = RecordTable::new(Collection::Contacts);

    load(&mut table, &repo, repo.ttl());
    assert!(table.is_loading());
    assert_eq!(table.title(), " Contacts (loading...) ");

    settle(&mut table).await;
    assert_eq!(table.records().len(), 23);
    assert_eq!(table.title(), " Contacts (23) ");
    assert_eq!(table.state_mut().selected(), Some(0));
  }

  #[tokio::test]
  async fn test_reload_keeps_rows_until_result_lands() {
    let api = Arc::new(FakeApi::with_contacts(3));
    let repo = contacts(Arc::clone(&api));
    let mut table = RecordTable::new(Collection::Contacts);
    load(&mut table, &repo, repo.ttl());
    settle(&mut table).await;

    // Let the snapshot age past a zero TTL
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    load(&mut table, &repo, Duration::zero());
    assert!(table.is_loading());
    assert_eq!(table.records().len(), 3);

    settle(&mut table).await;
    assert_eq!(table.records().len(), 3);
    assert_eq!(api.contact_calls(), 2);
  }

  #[tokio::test]
  async fn test_failed_load_keeps_rows_and_names_collection() {
    let healthy = contacts(Arc::new(FakeApi::with_contacts(2)));
    let offline_api = Arc::new(FakeApi::with_contacts(2));
    offline_api.set_failing(true);
    let offline = contacts(offline_api);

    let mut table = RecordTable::new(Collection::Contacts);
    load(&mut table, &healthy, healthy.ttl());
    settle(&mut table).await;

    // No cache behind this repository, so the failure surfaces
    load(&mut table, &offline, offline.ttl());
    settle(&mut table).await;

    assert_eq!(table.records().len(), 2);
    let error = table.error().unwrap();
    assert!(error.contains("contacts"));
    assert!(error.contains("rate limit exceeded"));
    assert!(table.title().starts_with(" Contacts (2, error: "));
  }

  #[tokio::test]
  async fn test_newer_load_replaces_pending_one() {
    let small = contacts(Arc::new(FakeApi::with_contacts(3)));
    let large = contacts(Arc::new(FakeApi::with_contacts(15)));
    let mut table = RecordTable::new(Collection::Contacts);

    load(&mut table, &small, small.ttl());
    load(&mut table, &large, large.ttl());
    settle(&mut table).await;

    assert_eq!(table.records().len(), 15);
    assert!(!table.is_loading());
  }

  #[tokio::test]
  async fn test_selection_clamps() {
    let repo = contacts(Arc::new(FakeApi::with_contacts(2)));
    let mut table = RecordTable::new(Collection::Contacts);
    load(&mut table, &repo, repo.ttl());
    settle(&mut table).await;

    table.select_next();
    table.select_next();
    assert_eq!(table.state_mut().selected(), Some(1));

    table.select_previous();
    table.select_previous();
    assert_eq!(table.state_mut().selected(), Some(0));
  }
}
