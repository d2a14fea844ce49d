use crate::app::CampaignRepo;
use crate::brevo::{Campaign, CampaignMetrics};
use crate::cache::Collection;
use crate::ui::components::RecordTable;
use crate::ui::renderfns::{
  campaign_status_color, draw_stat_cards, format_count, format_percent, truncate, StatCard,
};
use crate::ui::view::{View, ViewAction};
use chrono::Duration;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use std::sync::Arc;

/// Campaign table with aggregate delivery rates
pub struct CampaignListView {
  repo: Arc<CampaignRepo>,
  table: RecordTable<Campaign>,
}

impl CampaignListView {
  pub fn new(repo: Arc<CampaignRepo>) -> Self {
    let mut view = Self {
      repo,
      table: RecordTable::new(Collection::Campaigns),
    };
    view.load(view.repo.ttl());
    view
  }

  fn load(&mut self, ttl: Duration) {
    let repo = Arc::clone(&self.repo);
    self.table.load(async move { repo.get_with_ttl(ttl).await });
  }

  fn render_table(&mut self, frame: &mut Frame, area: Rect) {
    let block = Block::default()
      .title(self.table.title())
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if self.table.records().is_empty() && !self.table.is_loading() {
      let content = if self.table.error().is_some() {
        "Failed to load campaigns. Press 'r' to retry."
      } else {
        "No campaigns found."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let header = Row::new(["ID", "Name", "Status", "Sent", "Delivered", "Opens", "Clicks"])
      .style(Style::default().fg(Color::DarkGray).bold());

    // Collect rows first to avoid borrow conflicts with the table state
    let rows: Vec<Row> = self
      .table
      .records()
      .iter()
      .map(|campaign| {
        let counters = match &campaign.stats {
          Some(s) => [s.sent, s.delivered, s.unique_views, s.unique_clicks].map(format_count),
          None => ["-", "-", "-", "-"].map(String::from),
        };
        let [sent, delivered, opens, clicks] = counters;

        Row::new(vec![
          Cell::from(campaign.id.to_string()).style(Style::default().fg(Color::Cyan)),
          Cell::from(truncate(&campaign.name, 40)),
          Cell::from(campaign.status.clone())
            .style(Style::default().fg(campaign_status_color(&campaign.status))),
          Cell::from(sent),
          Cell::from(delivered),
          Cell::from(opens),
          Cell::from(clicks),
        ])
      })
      .collect();

    let widths = [
      Constraint::Length(8),
      Constraint::Min(20),
      Constraint::Length(10),
      Constraint::Length(10),
      Constraint::Length(10),
      Constraint::Length(10),
      Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
      .header(header)
      .block(block)
      .row_highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, self.table.state_mut());
  }
}

impl View for CampaignListView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.table.select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.table.select_previous(),
      KeyCode::Char('r') => self.load(self.repo.ttl()),
      KeyCode::Char('R') => self.load(Duration::zero()),
      _ => return ViewAction::NotHandled,
    }
    ViewAction::Handled
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(3), Constraint::Min(1)])
      .split(area);

    let metrics = CampaignMetrics::from_campaigns(self.table.records());
    draw_stat_cards(
      frame,
      chunks[0],
      &[
        StatCard::new("Delivery Rate", format_percent(metrics.delivery_rate), Color::Green),
        StatCard::new("Open Rate", format_percent(metrics.open_rate), Color::Cyan),
        StatCard::new("Click Rate", format_percent(metrics.click_rate), Color::Yellow),
      ],
    );

    self.render_table(frame, chunks[1]);
  }

  fn label(&self) -> String {
    self.table.collection().label().to_string()
  }

  fn tick(&mut self) {
    self.table.tick();
  }
}
