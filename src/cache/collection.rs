use std::fmt;

/// Entity collections that can be cached.
///
/// Each collection owns exactly one snapshot in the store, keyed by its
/// static name. Table names never come from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
  Campaigns,
  Contacts,
}

impl Collection {
  /// Key used in `cache_metadata` and in log/error messages.
  pub const fn key(self) -> &'static str {
    match self {
      Self::Campaigns => "campaigns",
      Self::Contacts => "contacts",
    }
  }

  /// Capitalized name for titles and headers.
  pub const fn label(self) -> &'static str {
    match self {
      Self::Campaigns => "Campaigns",
      Self::Contacts => "Contacts",
    }
  }

  /// Table holding the serialized snapshot.
  pub(crate) const fn table(self) -> &'static str {
    match self {
      Self::Campaigns => "campaigns",
      Self::Contacts => "contacts",
    }
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.key())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display_uses_key() {
    assert_eq!(Collection::Campaigns.to_string(), "campaigns");
    assert_eq!(Collection::Contacts.to_string(), "contacts");
  }

  #[test]
  fn test_labels() {
    assert_eq!(Collection::Campaigns.label(), "Campaigns");
    assert_eq!(Collection::Contacts.label(), "Contacts");
  }

  #[test]
  fn test_keys_are_distinct() {
    assert_ne!(Collection::Campaigns.key(), Collection::Contacts.key());
    assert_ne!(Collection::Campaigns.table(), Collection::Contacts.table());
  }
}
