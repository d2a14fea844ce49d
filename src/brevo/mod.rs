//! Brevo API collaborator: HTTP client, response mapping and domain types.

pub mod api_types;
pub mod client;
#[cfg(test)]
pub(crate) mod fake;
pub mod metrics;
pub mod types;

use color_eyre::Result;
use std::future::Future;

pub use client::BrevoClient;
pub use metrics::{CampaignMetrics, ContactMetrics};
pub use types::{Campaign, CampaignStats, Contact};

/// Remote operations the repositories are built on.
///
/// Each call either yields the complete list it asked for or fails with a
/// human-readable cause. Retrying is left to the caller.
pub trait BrevoApi: Send + Sync {
  /// All email campaigns, unpaginated.
  fn fetch_campaigns(&self) -> impl Future<Output = Result<Vec<Campaign>>> + Send;

  /// At most `limit` contacts starting at `offset`.
  fn fetch_contacts(
    &self,
    limit: usize,
    offset: usize,
  ) -> impl Future<Output = Result<Vec<Contact>>> + Send;
}
