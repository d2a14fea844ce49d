//! In-memory stand-in for the Brevo API, shared by tests.

use super::{BrevoApi, Campaign, Contact};
use color_eyre::{eyre::eyre, Result};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
pub struct FakeApi {
  pub campaigns: Vec<Campaign>,
  pub contacts: Vec<Contact>,
  /// Every call fails while set
  pub failing: AtomicBool,
  /// Contact pages at or past this offset fail
  pub fail_from_offset: Option<usize>,
  pub campaign_calls: AtomicUsize,
  pub contact_calls: AtomicUsize,
}

impl FakeApi {
  pub fn with_contacts(n: u64) -> Self {
    Self {
      contacts: (0..n).map(contact).collect(),
      ..Default::default()
    }
  }

  pub fn set_failing(&self, failing: bool) {
    self.failing.store(failing, Ordering::SeqCst);
  }

  pub fn campaign_calls(&self) -> usize {
    self.campaign_calls.load(Ordering::SeqCst)
  }

  pub fn contact_calls(&self) -> usize {
    self.contact_calls.load(Ordering::SeqCst)
  }
}

impl BrevoApi for FakeApi {
  fn fetch_campaigns(&self) -> impl Future<Output = Result<Vec<Campaign>>> + Send {
    self.campaign_calls.fetch_add(1, Ordering::SeqCst);
    let result = if self.failing.load(Ordering::SeqCst) {
      Err(eyre!("Brevo API server error (500). Please try again later."))
    } else {
      Ok(self.campaigns.clone())
    };
    async move { result }
  }

  fn fetch_contacts(
    &self,
    limit: usize,
    offset: usize,
  ) -> impl Future<Output = Result<Vec<Contact>>> + Send {
    self.contact_calls.fetch_add(1, Ordering::SeqCst);
    let page_fails = self.fail_from_offset.is_some_and(|from| offset >= from);
    let result = if self.failing.load(Ordering::SeqCst) || page_fails {
      Err(eyre!("Brevo API rate limit exceeded. Please try again later."))
    } else {
      Ok(
        self
          .contacts
          .iter()
          .skip(offset)
          .take(limit)
          .cloned()
          .collect(),
      )
    };
    async move { result }
  }
}

pub fn contact(id: u64) -> Contact {
  serde_json::from_value(serde_json::json!({ "id": id, "email": format!("c{}@example.com", id) }))
    .unwrap()
}

pub fn campaign(id: u64) -> Campaign {
  serde_json::from_value(serde_json::json!({ "id": id, "name": "Promo", "status": "sent" }))
    .unwrap()
}
