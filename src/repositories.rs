//! Collection repositories binding remote fetches to the cache layer.

use chrono::Duration;
use color_eyre::Result;
use std::sync::Arc;

use crate::brevo::{BrevoApi, Campaign, Contact};
use crate::cache::{fetch_all_pages, CacheLayer, CacheStore, Collection};
use crate::config::Config;

/// Campaigns, fetched in a single call.
pub struct CampaignRepository<S: CacheStore, A: BrevoApi> {
  cache: CacheLayer<S>,
  api: Arc<A>,
  ttl: Duration,
}

impl<S: CacheStore + 'static, A: BrevoApi> CampaignRepository<S, A> {
  pub fn new(cache: CacheLayer<S>, api: Arc<A>, ttl: Duration) -> Self {
    Self { cache, api, ttl }
  }

  pub fn ttl(&self) -> Duration {
    self.ttl
  }

  /// Campaigns using the configured TTL.
  pub async fn get(&self) -> Result<Vec<Campaign>> {
    self.get_with_ttl(self.ttl).await
  }

  /// Campaigns using a TTL for this call only.
  pub async fn get_with_ttl(&self, ttl: Duration) -> Result<Vec<Campaign>> {
    self
      .cache
      .get_or_refresh(Collection::Campaigns, ttl, || self.api.fetch_campaigns())
      .await
  }
}

/// Contacts, accumulated page by page.
pub struct ContactRepository<S: CacheStore, A: BrevoApi> {
  cache: CacheLayer<S>,
  api: Arc<A>,
  ttl: Duration,
  page_size: usize,
}

impl<S: CacheStore + 'static, A: BrevoApi> ContactRepository<S, A> {
  pub fn new(cache: CacheLayer<S>, api: Arc<A>, ttl: Duration, page_size: usize) -> Self {
    Self {
      cache,
      api,
      ttl,
      page_size,
    }
  }

  pub fn ttl(&self) -> Duration {
    self.ttl
  }

  /// Contacts using the configured TTL.
  pub async fn get(&self) -> Result<Vec<Contact>> {
    self.get_with_ttl(self.ttl).await
  }

  /// Contacts using a TTL for this call only.
  pub async fn get_with_ttl(&self, ttl: Duration) -> Result<Vec<Contact>> {
    let api = &self.api;
    let page_size = self.page_size;

    self
      .cache
      .get_or_refresh(Collection::Contacts, ttl, move || {
        fetch_all_pages(page_size, move |limit, offset| api.fetch_contacts(limit, offset))
      })
      .await
  }
}

/// Both repositories over one shared store and client.
pub struct Repositories<S: CacheStore, A: BrevoApi> {
  pub campaigns: Arc<CampaignRepository<S, A>>,
  pub contacts: Arc<ContactRepository<S, A>>,
}

impl<S: CacheStore + 'static, A: BrevoApi> Repositories<S, A> {
  pub fn new(store: S, api: A, config: &Config) -> Self {
    let cache = CacheLayer::new(store);
    let api = Arc::new(api);

    Self {
      campaigns: Arc::new(CampaignRepository::new(
        cache.clone(),
        Arc::clone(&api),
        config.cache.ttl_for(Collection::Campaigns),
      )),
      contacts: Arc::new(ContactRepository::new(
        cache,
        api,
        config.cache.ttl_for(Collection::Contacts),
        config.contacts.page_size,
      )),
    }
  }
}

impl<S: CacheStore, A: BrevoApi> Clone for Repositories<S, A> {
  fn clone(&self) -> Self {
    Self {
      campaigns: Arc::clone(&self.campaigns),
      contacts: Arc::clone(&self.contacts),
    }
  }
}
