use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Email campaign with its global statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
  pub id: u64,
  #[serde(default)]
  pub name: String,
  /// "draft", "sent", "queued", "suspended", ...
  #[serde(default)]
  pub status: String,
  /// `statistics.globalStats` from the API, absent for unsent campaigns
  pub stats: Option<CampaignStats>,
  /// Remaining API fields, kept as-is
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Campaign {
  pub fn is_sent(&self) -> bool {
    self.status == "sent"
  }
}

/// Global campaign counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignStats {
  pub sent: u64,
  pub delivered: u64,
  pub unique_views: u64,
  pub unique_clicks: u64,
  pub hard_bounces: u64,
  pub soft_bounces: u64,
  pub unsubscriptions: u64,
  pub complaints: u64,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Contact with its name attributes flattened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id: u64,
  pub email: Option<String>,
  pub first_name: Option<String>,
  pub last_name: Option<String>,
  #[serde(default)]
  pub email_blacklisted: bool,
  #[serde(default)]
  pub sms_blacklisted: bool,
  pub created_at: Option<String>,
  pub modified_at: Option<String>,
  #[serde(default)]
  pub attributes: Map<String, Value>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Contact {
  /// "First Last", whichever parts are known
  pub fn full_name(&self) -> String {
    [self.first_name.as_deref(), self.last_name.as_deref()]
      .into_iter()
      .flatten()
      .filter(|s| !s.is_empty())
      .collect::<Vec<_>>()
      .join(" ")
  }
}
