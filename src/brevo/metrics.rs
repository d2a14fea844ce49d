use super::types::{Campaign, Contact};

/// Aggregate delivery metrics across sent campaigns
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CampaignMetrics {
  /// delivered / sent
  pub delivery_rate: f64,
  /// unique views / delivered
  pub open_rate: f64,
  /// unique clicks / delivered
  pub click_rate: f64,
  /// Campaigns that contributed to the rates
  pub sent_campaigns: usize,
}

impl CampaignMetrics {
  /// Only campaigns with status "sent" and statistics are counted.
  pub fn from_campaigns(campaigns: &[Campaign]) -> Self {
    let mut sent = 0u64;
    let mut delivered = 0u64;
    let mut opened = 0u64;
    let mut clicked = 0u64;
    let mut sent_campaigns = 0usize;

    for stats in campaigns
      .iter()
      .filter(|c| c.is_sent())
      .filter_map(|c| c.stats.as_ref())
    {
      sent += stats.sent;
      delivered += stats.delivered;
      opened += stats.unique_views;
      clicked += stats.unique_clicks;
      sent_campaigns += 1;
    }

    Self {
      delivery_rate: ratio(delivered, sent),
      open_rate: ratio(opened, delivered),
      click_rate: ratio(clicked, delivered),
      sent_campaigns,
    }
  }
}

fn ratio(part: u64, whole: u64) -> f64 {
  if whole == 0 {
    0.0
  } else {
    part as f64 / whole as f64
  }
}

/// Contact counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactMetrics {
  pub total: usize,
  pub blacklisted: usize,
}

impl ContactMetrics {
  pub fn from_contacts(contacts: &[Contact]) -> Self {
    Self {
      total: contacts.len(),
      blacklisted: contacts.iter().filter(|c| c.email_blacklisted).count(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::brevo::types::CampaignStats;

  fn campaign(id: u64, status: &str, stats: Option<(u64, u64, u64, u64)>) -> Campaign {
    Campaign {
      id,
      name: format!("campaign {}", id),
      status: status.to_string(),
      stats: stats.map(|(sent, delivered, unique_views, unique_clicks)| CampaignStats {
        sent,
        delivered,
        unique_views,
        unique_clicks,
        ..Default::default()
      }),
      extra: Default::default(),
    }
  }

  #[test]
  fn test_rates_over_sent_campaigns() {
    let campaigns = vec![
      campaign(1, "sent", Some((1000, 980, 245, 32))),
      campaign(2, "draft", None),
      campaign(3, "sent", Some((500, 485, 121, 15))),
      // Not sent: ignored even with stats
      campaign(4, "queued", Some((10, 10, 10, 10))),
    ];

    let metrics = CampaignMetrics::from_campaigns(&campaigns);
    assert_eq!(metrics.sent_campaigns, 2);
    assert!((metrics.delivery_rate - 1465.0 / 1500.0).abs() < 1e-9);
    assert!((metrics.open_rate - 366.0 / 1465.0).abs() < 1e-9);
    assert!((metrics.click_rate - 47.0 / 1465.0).abs() < 1e-9);
  }

  #[test]
  fn test_no_sent_campaigns() {
    let metrics = CampaignMetrics::from_campaigns(&[campaign(1, "draft", None)]);
    assert_eq!(metrics, CampaignMetrics::default());
  }

  #[test]
  fn test_zero_counters_do_not_divide_by_zero() {
    let metrics = CampaignMetrics::from_campaigns(&[campaign(1, "sent", Some((0, 0, 0, 0)))]);
    assert_eq!(metrics.delivery_rate, 0.0);
    assert_eq!(metrics.open_rate, 0.0);
    assert_eq!(metrics.sent_campaigns, 1);
  }

  #[test]
  fn test_contact_metrics() {
    let contacts: Vec<Contact> = serde_json::from_str(
      r#"[{"id":1,"emailBlacklisted":true},{"id":2},{"id":3,"emailBlacklisted":false}]"#,
    )
    .unwrap();

    let metrics = ContactMetrics::from_contacts(&contacts);
    assert_eq!(metrics, ContactMetrics { total: 3, blacklisted: 1 });
  }
}
