use chrono::Duration;
use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cache::{ttl_from_minutes, Collection, DEFAULT_TTL_MINUTES};

pub const DEFAULT_API_URL: &str = "https://api.brevo.com/v3";
pub const DEFAULT_CONTACTS_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub brevo: BrevoConfig,
  #[serde(default)]
  pub cache: CacheConfig,
  #[serde(default)]
  pub contacts: ContactsConfig,
  /// Custom title for header (defaults to the API host if not set)
  pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrevoConfig {
  #[serde(default = "default_api_url")]
  pub url: String,
}

impl Default for BrevoConfig {
  fn default() -> Self {
    Self {
      url: default_api_url(),
    }
  }
}

fn default_api_url() -> String {
  DEFAULT_API_URL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
  /// Minutes before a cached collection is refetched
  #[serde(default = "default_ttl_minutes")]
  pub ttl_minutes: i64,
  /// Per-collection overrides of `ttl_minutes`
  pub campaigns_ttl_minutes: Option<i64>,
  pub contacts_ttl_minutes: Option<i64>,
  /// Database file (defaults to the platform data directory)
  pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      ttl_minutes: DEFAULT_TTL_MINUTES,
      campaigns_ttl_minutes: None,
      contacts_ttl_minutes: None,
      path: None,
    }
  }
}

fn default_ttl_minutes() -> i64 {
  DEFAULT_TTL_MINUTES
}

impl CacheConfig {
  /// Effective TTL for a collection.
  pub fn ttl_for(&self, collection: Collection) -> Duration {
    let minutes = match collection {
      Collection::Campaigns => self.campaigns_ttl_minutes,
      Collection::Contacts => self.contacts_ttl_minutes,
    };
    ttl_from_minutes(minutes.unwrap_or(self.ttl_minutes))
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactsConfig {
  /// Contacts requested per API call
  #[serde(default = "default_page_size")]
  pub page_size: usize,
}

impl Default for ContactsConfig {
  fn default() -> Self {
    Self {
      page_size: DEFAULT_CONTACTS_PAGE_SIZE,
    }
  }
}

fn default_page_size() -> usize {
  DEFAULT_CONTACTS_PAGE_SIZE
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./brevo-dash.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/brevo-dash/config.yaml
  ///
  /// Without any file, built-in defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("brevo-dash.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("brevo-dash").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    let config: Config = serde_yaml::from_str(contents)?;
    if config.contacts.page_size == 0 {
      return Err(eyre!("contacts.page_size must be greater than zero"));
    }
    Ok(config)
  }

  /// Get the Brevo API key from environment variables.
  ///
  /// Checks BREVO_DASH_API_KEY first, then BREVO_API_KEY as fallback.
  pub fn get_api_key() -> Result<String> {
    std::env::var("BREVO_DASH_API_KEY")
      .or_else(|_| std::env::var("BREVO_API_KEY"))
      .ok()
      .filter(|key| !key.trim().is_empty())
      .ok_or_else(|| {
        eyre!("Brevo API key not found. Set BREVO_DASH_API_KEY or BREVO_API_KEY environment variable.")
      })
  }
}
