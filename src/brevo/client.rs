use crate::brevo::api_types::{extract_array, ApiCampaign, ApiContact};
use crate::brevo::types::{Campaign, Contact};
use crate::brevo::BrevoApi;
use crate::config::Config;
use color_eyre::{eyre::eyre, Result};
use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("brevo-dash/", env!("CARGO_PKG_VERSION"));

/// Brevo REST API client
#[derive(Clone)]
pub struct BrevoClient {
  http: reqwest::Client,
  base_url: Url,
  api_key: String,
}

impl BrevoClient {
  pub fn new(config: &Config) -> Result<Self> {
    let api_key = Config::get_api_key()?;
    Self::with_api_key(&config.brevo.url, api_key)
  }

  pub fn with_api_key(base_url: &str, api_key: String) -> Result<Self> {
    if api_key.trim().is_empty() {
      return Err(eyre!("Brevo API key is empty"));
    }

    // Url::join drops the last segment unless the base ends with '/'
    let base = if base_url.ends_with('/') {
      base_url.to_string()
    } else {
      format!("{}/", base_url)
    };
    let base_url =
      Url::parse(&base).map_err(|e| eyre!("Invalid Brevo API URL {}: {}", base_url, e))?;

    let http = reqwest::Client::builder()
      .user_agent(USER_AGENT)
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      http,
      base_url,
      api_key,
    })
  }

  /// Get all email campaigns with their global statistics
  pub async fn get_campaigns(&self) -> Result<Vec<Campaign>> {
    let url = self.endpoint("emailCampaigns", &[("statistics", "globalStats".to_string())])?;
    let items = extract_array(self.get_json(url).await?, "campaigns")?;

    items
      .into_iter()
      .map(|item| parse_item::<ApiCampaign>(item, "campaign").map(ApiCampaign::into_campaign))
      .collect()
  }

  /// Get one page of contacts
  pub async fn get_contacts(&self, limit: usize, offset: usize) -> Result<Vec<Contact>> {
    let url = self.endpoint(
      "contacts",
      &[("limit", limit.to_string()), ("offset", offset.to_string())],
    )?;
    let items = extract_array(self.get_json(url).await?, "contacts")?;

    items
      .into_iter()
      .map(|item| parse_item::<ApiContact>(item, "contact").map(ApiContact::into_contact))
      .collect()
  }

  fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
    let mut url = self
      .base_url
      .join(path)
      .map_err(|e| eyre!("Invalid Brevo endpoint {}: {}", path, e))?;
    url
      .query_pairs_mut()
      .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    Ok(url)
  }

  async fn get_json(&self, url: Url) -> Result<Value> {
    debug!(%url, "GET");

    let response = self
      .http
      .get(url)
      .header("api-key", &self.api_key)
      .header(header::ACCEPT, "application/json")
      .send()
      .await
      .map_err(|e| {
        if e.is_connect() || e.is_timeout() || e.is_request() {
          eyre!(
            "Network error: Unable to connect to Brevo API. Please check your internet connection. ({})",
            e
          )
        } else {
          eyre!("Brevo API request failed: {}", e)
        }
      })?;

    let status = response.status();
    if !status.is_success() {
      return Err(eyre!(describe_status(status)));
    }

    response
      .json::<Value>()
      .await
      .map_err(|e| eyre!("Unexpected response format from Brevo API: {}", e))
  }
}

impl BrevoApi for BrevoClient {
  fn fetch_campaigns(&self) -> impl Future<Output = Result<Vec<Campaign>>> + Send {
    self.get_campaigns()
  }

  fn fetch_contacts(
    &self,
    limit: usize,
    offset: usize,
  ) -> impl Future<Output = Result<Vec<Contact>>> + Send {
    self.get_contacts(limit, offset)
  }
}

fn parse_item<T: DeserializeOwned>(item: Value, kind: &str) -> Result<T> {
  serde_json::from_value(item)
    .map_err(|e| eyre!("Unexpected response format from Brevo API: invalid {}: {}", kind, e))
}

/// Human-readable cause for a non-success HTTP status
pub fn describe_status(status: StatusCode) -> String {
  match status.as_u16() {
    401 | 403 => format!(
      "Brevo API authentication failed ({}). Please check your API Key.",
      status.as_u16()
    ),
    429 => "Brevo API rate limit exceeded. Please try again later.".to_string(),
    code if code >= 500 => format!(
      "Brevo API server error ({}). Please try again later.",
      code
    ),
    code => format!(
      "Brevo API error ({}): {}",
      code,
      status.canonical_reason().unwrap_or("Unknown")
    ),
  }
}
