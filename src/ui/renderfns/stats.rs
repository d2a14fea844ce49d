use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// A labelled headline number
#[derive(Debug, Clone)]
pub struct StatCard {
  pub label: &'static str,
  pub value: String,
  pub color: Color,
}

impl StatCard {
  pub fn new(label: &'static str, value: String, color: Color) -> Self {
    Self {
      label,
      value,
      color,
    }
  }
}

/// Draw cards side by side, splitting the area evenly
pub fn draw_stat_cards(frame: &mut Frame, area: Rect, cards: &[StatCard]) {
  if cards.is_empty() {
    return;
  }

  let chunks = Layout::default()
    .direction(Direction::Horizontal)
    .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
    .split(area);

  for (card, chunk) in cards.iter().zip(chunks.iter()) {
    let block = Block::default()
      .title(format!(" {} ", card.label))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));

    let value = Paragraph::new(Span::styled(
      card.value.clone(),
      Style::default().fg(card.color).bold(),
    ))
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(value, *chunk);
  }
}
