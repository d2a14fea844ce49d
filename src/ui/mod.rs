mod components;
pub mod renderfns;
pub mod view;
pub mod views;

use crate::app::{App, Mode};
use crate::commands;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Main content
      Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

  let title = app.title().to_string();
  let view = app.view_mut();
  let label = view.label();
  let shortcuts = view.shortcuts();
  renderfns::draw_header(frame, chunks[0], &title, &label, &shortcuts);
  view.render(frame, chunks[1]);

  draw_status_bar(frame, chunks[2], app);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
  let line = match app.mode() {
    Mode::Normal => Line::styled(
      " :command  j/k:nav  r:reload  R:refresh  q:quit",
      Style::default().fg(Color::DarkGray),
    ),
    Mode::Command => {
      let mut spans = vec![Span::styled(
        format!(":{}", app.command_input()),
        Style::default().fg(Color::Yellow),
      )];

      // Suggestions follow the input, the highlighted one is what Enter runs
      let suggestions = commands::get_suggestions(app.command_input());
      for (i, cmd) in suggestions.iter().enumerate() {
        let style = if i == app.selected_suggestion() {
          Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
          Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!(" {} ", cmd.name), style));
      }

      if let Some(cmd) = suggestions.get(app.selected_suggestion()) {
        spans.push(Span::styled(
          format!("  {}", cmd.description),
          Style::default().fg(Color::DarkGray).italic(),
        ));
      }
      Line::from(spans)
    }
  };

  frame.render_widget(Paragraph::new(line), area);
}
