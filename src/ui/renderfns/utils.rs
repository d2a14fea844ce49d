use chrono::DateTime;
use ratatui::prelude::Color;

/// Truncate a string to a maximum length in characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Get the display color for a campaign status
pub fn campaign_status_color(status: &str) -> Color {
  match status {
    "sent" => Color::Green,
    "queued" | "in_process" | "inProcess" => Color::Yellow,
    "suspended" | "archive" => Color::DarkGray,
    _ => Color::White,
  }
}

/// 1234567 -> "1,234,567"
pub fn format_count(value: u64) -> String {
  let digits = value.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i).is_multiple_of(3) {
      out.push(',');
    }
    out.push(c);
  }
  out
}

/// 0.2456 -> "24.6%"
pub fn format_percent(ratio: f64) -> String {
  format!("{:.1}%", ratio * 100.0)
}

/// RFC 3339 timestamp -> "15 Jan 2024"; unparsable values are shown as-is
pub fn format_date(value: Option<&str>) -> String {
  match value {
    None | Some("") => "-".to_string(),
    Some(raw) => DateTime::parse_from_rfc3339(raw)
      .map(|dt| dt.format("%d %b %Y").to_string())
      .unwrap_or_else(|_| raw.to_string()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_multibyte() {
    assert_eq!(truncate("Newsletter è arrivata", 13), "Newsletter...");
    assert_eq!(truncate("èèèèè", 4), "è...");
  }

  #[test]
  fn test_campaign_status_color() {
    assert_eq!(campaign_status_color("sent"), Color::Green);
    assert_eq!(campaign_status_color("queued"), Color::Yellow);
    assert_eq!(campaign_status_color("draft"), Color::White);
  }

  #[test]
  fn test_format_count() {
    assert_eq!(format_count(0), "0");
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(1000), "1,000");
    assert_eq!(format_count(1234567), "1,234,567");
  }

  #[test]
  fn test_format_percent() {
    assert_eq!(format_percent(0.0), "0.0%");
    assert_eq!(format_percent(0.2456), "24.6%");
    assert_eq!(format_percent(1.0), "100.0%");
  }

  #[test]
  fn test_format_date() {
    assert_eq!(format_date(None), "-");
    assert_eq!(format_date(Some("2024-01-15T10:20:30.000+01:00")), "15 Jan 2024");
    assert_eq!(format_date(Some("yesterday")), "yesterday");
  }
}
