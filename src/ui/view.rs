use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// A keyboard shortcut hint for display in the header
#[derive(Debug, Clone, Copy)]
pub struct ShortcutInfo {
  pub key: &'static str,
  pub label: &'static str,
}

impl ShortcutInfo {
  pub const fn new(key: &'static str, label: &'static str) -> Self {
    Self { key, label }
  }
}

/// Result of offering a key to a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
  /// Key was consumed by the view
  Handled,
  /// Key means nothing to the view, App should try it
  NotHandled,
}

/// Trait for view behavior
///
/// Views load their rows in the background and pick them up in `tick()`.
pub trait View {
  /// Handle a key event
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction;

  /// Render the view to the frame
  fn render(&mut self, frame: &mut Frame, area: Rect);

  /// Label shown in the header
  fn label(&self) -> String;

  /// Called on each tick to allow views to poll async queries
  fn tick(&mut self) {}

  /// Keyboard shortcuts to display in the header
  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new(":", "command"),
      ShortcutInfo::new("r", "reload"),
      ShortcutInfo::new("R", "refresh"),
      ShortcutInfo::new("q", "quit"),
    ]
  }
}
