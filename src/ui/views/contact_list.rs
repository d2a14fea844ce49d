use crate::app::ContactRepo;
use crate::brevo::{Contact, ContactMetrics};
use crate::cache::Collection;
use crate::ui::components::RecordTable;
use crate::ui::renderfns::{draw_stat_cards, format_count, format_date, truncate, StatCard};
use crate::ui::view::{View, ViewAction};
use chrono::Duration;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use std::sync::Arc;

/// Contact table with total and blacklisted counts
pub struct ContactListView {
  repo: Arc<ContactRepo>,
  table: RecordTable<Contact>,
}

impl ContactListView {
  pub fn new(repo: Arc<ContactRepo>) -> Self {
    let mut view = Self {
      repo,
      table: RecordTable::new(Collection::Contacts),
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
        "Failed to load contacts. Press 'r' to retry."
      } else {
        "No contacts found."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let header = Row::new(["Email", "First name", "Last name", "Created", "Status"])
      .style(Style::default().fg(Color::DarkGray).bold());

    let rows: Vec<Row> = self
      .table
      .records()
      .iter()
      .map(|contact| {
        let status = if contact.email_blacklisted {
          Cell::from("Blacklisted").style(Style::default().fg(Color::Red))
        } else {
          Cell::from("")
        };

        Row::new(vec![
          Cell::from(truncate(contact.email.as_deref().unwrap_or("-"), 40)),
          Cell::from(contact.first_name.clone().unwrap_or_default()),
          Cell::from(contact.last_name.clone().unwrap_or_default()),
          Cell::from(format_date(contact.created_at.as_deref())),
          status,
        ])
      })
      .collect();

    let widths = [
      Constraint::Min(24),
      Constraint::Length(16),
      Constraint::Length(16),
      Constraint::Length(12),
      Constraint::Length(12),
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

impl View for ContactListView {
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

    let metrics = ContactMetrics::from_contacts(self.table.records());
    draw_stat_cards(
      frame,
      chunks[0],
      &[
        StatCard::new("Total Contacts", format_count(metrics.total as u64), Color::Cyan),
        StatCard::new("Blacklisted", format_count(metrics.blacklisted as u64), Color::Red),
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
