//! Time-based freshness of cached snapshots.

use chrono::{DateTime, Duration, Utc};

/// TTL applied when nothing more specific is configured.
pub const DEFAULT_TTL_MINUTES: i64 = 15;

/// Check if a snapshot cached at `timestamp` has outlived `ttl`.
pub fn is_stale(timestamp: DateTime<Utc>, ttl: Duration) -> bool {
  is_stale_at(Utc::now(), timestamp, ttl)
}

/// Same as [`is_stale`] with an explicit clock.
///
/// An age equal to the TTL is still fresh. Negative TTLs count as zero.
pub fn is_stale_at(now: DateTime<Utc>, timestamp: DateTime<Utc>, ttl: Duration) -> bool {
  let ttl = ttl.max(Duration::zero());
  now - timestamp > ttl
}

/// Convert a configured TTL in minutes, clamping negatives to zero.
pub fn ttl_from_minutes(minutes: i64) -> Duration {
  Duration::try_minutes(minutes.max(0)).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
  }

  #[test]
  fn test_age_below_ttl_is_fresh() {
    assert!(!is_stale_at(at(60), at(0), Duration::minutes(15)));
  }

  #[test]
  fn test_age_equal_to_ttl_is_fresh() {
    assert!(!is_stale_at(at(900), at(0), Duration::minutes(15)));
  }

  #[test]
  fn test_age_above_ttl_is_stale() {
    assert!(is_stale_at(at(901), at(0), Duration::minutes(15)));
  }

  #[test]
  fn test_zero_ttl() {
    assert!(!is_stale_at(at(0), at(0), Duration::zero()));
    assert!(is_stale_at(at(1), at(0), Duration::zero()));
  }

  #[test]
  fn test_negative_ttl_behaves_like_zero() {
    assert!(is_stale_at(at(1), at(0), Duration::minutes(-5)));
    assert!(!is_stale_at(at(0), at(0), Duration::minutes(-5)));
  }

  #[test]
  fn test_future_timestamp_is_fresh() {
    assert!(!is_stale_at(at(0), at(30), Duration::zero()));
  }

  #[test]
  fn test_ttl_from_minutes() {
    assert_eq!(ttl_from_minutes(15), Duration::minutes(15));
    assert_eq!(ttl_from_minutes(-3), Duration::zero());
    assert_eq!(ttl_from_minutes(i64::MAX), Duration::MAX);
  }
}
