//! Serde-deserializable types matching Brevo API responses.
//!
//! These types are separate from domain types to allow clean deserialization
//! while keeping domain types focused on application needs.

use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::types::{Campaign, CampaignStats, Contact};

/// Contact attributes holding the first name, in lookup order.
const FIRST_NAME_ATTRIBUTES: &[&str] = &["NOME", "FIRSTNAME"];
/// Contact attributes holding the last name, in lookup order.
const LAST_NAME_ATTRIBUTES: &[&str] = &["COGNOME", "LASTNAME"];

/// Pull the array stored under `field` out of a list response body.
pub fn extract_array(body: Value, field: &str) -> Result<Vec<Value>> {
  let Value::Object(mut object) = body else {
    return Err(eyre!(
      "Unexpected response format from Brevo API: response is not an object"
    ));
  };

  match object.remove(field) {
    Some(Value::Array(items)) => Ok(items),
    // Brevo omits the array entirely when a list is empty
    None if object.get("count").and_then(Value::as_u64) == Some(0) => Ok(Vec::new()),
    _ => Err(eyre!(
      "Unexpected response format from Brevo API: {} is not an array",
      field
    )),
  }
}

// ============================================================================
// Campaigns
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiCampaign {
  pub id: u64,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub status: String,
  pub statistics: Option<ApiStatistics>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct ApiStatistics {
  #[serde(rename = "globalStats")]
  pub global_stats: Option<Value>,
}

impl ApiCampaign {
  /// Expose `statistics.globalStats` as `stats`.
  pub fn into_campaign(self) -> Campaign {
    let id = self.id;
    let stats = self
      .statistics
      .and_then(|s| s.global_stats)
      .filter(Value::is_object)
      .and_then(|v| match serde_json::from_value::<CampaignStats>(v) {
        Ok(stats) => Some(stats),
        Err(e) => {
          warn!(campaign_id = id, error = %e, "Ignoring undecodable globalStats");
          None
        }
      });

    Campaign {
      id: self.id,
      name: self.name,
      status: self.status,
      stats,
      extra: self.extra,
    }
  }
}

// ============================================================================
// Contacts
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContact {
  pub id: u64,
  pub email: Option<String>,
  #[serde(default)]
  pub email_blacklisted: bool,
  #[serde(default)]
  pub sms_blacklisted: bool,
  pub created_at: Option<String>,
  pub modified_at: Option<String>,
  pub attributes: Option<Value>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl ApiContact {
  /// Flatten the name attributes into `first_name` / `last_name`.
  pub fn into_contact(self) -> Contact {
    let attributes = match self.attributes {
      Some(Value::Object(map)) => map,
      _ => Map::new(),
    };

    Contact {
      id: self.id,
      email: self.email,
      first_name: first_string(&attributes, FIRST_NAME_ATTRIBUTES),
      last_name: first_string(&attributes, LAST_NAME_ATTRIBUTES),
      email_blacklisted: self.email_blacklisted,
      sms_blacklisted: self.sms_blacklisted,
      created_at: self.created_at,
      modified_at: self.modified_at,
      attributes,
      extra: self.extra,
    }
  }
}

fn first_string(attributes: &Map<String, Value>, keys: &[&str]) -> Option<String> {
  keys
    .iter()
    .filter_map(|key| attributes.get(*key))
    .find_map(|value| match value {
      Value::String(s) => Some(s.clone()),
      Value::Null => None,
      other => Some(other.to_string()),
    })
}
