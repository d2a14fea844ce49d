use crate::brevo::BrevoClient;
use crate::cache::{Collection, SqliteStore};
use crate::commands::{self, CommandKind};
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::repositories::{CampaignRepository, ContactRepository, Repositories};
use crate::ui;
use crate::ui::view::{View, ViewAction};
use crate::ui::views::{CampaignListView, ContactListView};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tracing::info;

pub type Repos = Repositories<SqliteStore, BrevoClient>;
pub type CampaignRepo = CampaignRepository<SqliteStore, BrevoClient>;
pub type ContactRepo = ContactRepository<SqliteStore, BrevoClient>;

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Normal,
  Command,
}

/// Main application state
pub struct App {
  /// Active collection view
  view: Box<dyn View>,

  /// Current input mode
  mode: Mode,

  /// Command input buffer (after pressing :)
  command_input: String,

  /// Selected autocomplete suggestion index
  selected_suggestion: usize,

  /// Header title, from config or the API host
  title: String,

  repos: Repos,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub fn new(config: &Config, repos: Repos, initial: Collection) -> Self {
    let title = config
      .title
      .clone()
      .unwrap_or_else(|| ui::renderfns::extract_domain(&config.brevo.url).to_string());

    Self {
      view: Self::make_view(&repos, initial),
      mode: Mode::Normal,
      command_input: String::new(),
      selected_suggestion: 0,
      title,
      repos,
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let result = self.event_loop().await;

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn event_loop(&mut self) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let mut events = EventHandler::new(Duration::from_millis(250));

    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(Event::Key(key)) => self.handle_key(key),
        Some(Event::Tick) => self.view.tick(),
        None => break,
      }
    }

    Ok(())
  }

  fn make_view(repos: &Repos, collection: Collection) -> Box<dyn View> {
    match collection {
      Collection::Campaigns => Box::new(CampaignListView::new(repos.campaigns.clone())),
      Collection::Contacts => Box::new(ContactListView::new(repos.contacts.clone())),
    }
  }

  /// Switch the main view to a collection
  pub fn open(&mut self, collection: Collection) {
    info!(collection = %collection, "Opening view");
    self.view = Self::make_view(&self.repos, collection);
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    match self.mode {
      Mode::Normal => self.handle_normal_mode_key(key),
      Mode::Command => self.handle_command_mode_key(key),
    }
  }

  fn handle_normal_mode_key(&mut self, key: KeyEvent) {
    if self.view.handle_key(key) == ViewAction::Handled {
      return;
    }

    match key.code {
      KeyCode::Char('q') => self.should_quit = true,
      KeyCode::Char(':') => {
        self.mode = Mode::Command;
        self.command_input.clear();
        self.selected_suggestion = 0;
      }
      _ => {}
    }
  }

  fn handle_command_mode_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.leave_command_mode(),
      KeyCode::Enter => {
        self.execute_command();
        self.leave_command_mode();
      }
      KeyCode::Tab | KeyCode::Down => {
        let count = commands::get_suggestions(&self.command_input).len();
        if count > 0 {
          self.selected_suggestion = (self.selected_suggestion + 1) % count;
        }
      }
      KeyCode::BackTab | KeyCode::Up => {
        let count = commands::get_suggestions(&self.command_input).len();
        if count > 0 {
          self.selected_suggestion = (self.selected_suggestion + count - 1) % count;
        }
      }
      KeyCode::Backspace => {
        self.command_input.pop();
        self.selected_suggestion = 0;
      }
      KeyCode::Char(c) => {
        self.command_input.push(c);
        self.selected_suggestion = 0;
      }
      _ => {}
    }
  }

  fn leave_command_mode(&mut self) {
    self.mode = Mode::Normal;
    self.command_input.clear();
    self.selected_suggestion = 0;
  }

  fn execute_command(&mut self) {
    match commands::resolve(&self.command_input, self.selected_suggestion) {
      Some(CommandKind::Campaigns) => self.open(Collection::Campaigns),
      Some(CommandKind::Contacts) => self.open(Collection::Contacts),
      Some(CommandKind::Quit) => self.should_quit = true,
      None => {}
    }
  }

  // Accessors for UI

  pub fn mode(&self) -> Mode {
    self.mode
  }

  pub fn command_input(&self) -> &str {
    &self.command_input
  }

  pub fn selected_suggestion(&self) -> usize {
    self.selected_suggestion
  }

  pub fn title(&self) -> &str {
    &self.title
  }

  pub fn view_mut(&mut self) -> &mut dyn View {
    self.view.as_mut()
  }
}
