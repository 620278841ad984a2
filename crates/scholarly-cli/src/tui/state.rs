//! State management for the Terminal User Interface.
//!
//! [`UIState`] wraps a [`SearchView`] with everything that only matters on
//! screen: the selected row, focus, scroll offsets, the open dialog and the
//! transient status message. Key handling never fetches anything; page requests
//! it produces are queued and picked up by the event loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use tracing::error;

use super::*;

/// Frames of the loading indicator.
pub const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Represents which pane currently has focus in the UI.
///
/// Used to determine which pane receives keyboard input and
/// how to style the UI elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
  /// The paper list on the left side is focused
  List,
  /// The paper details on the right side is focused
  Details,
}

/// Represents the current active dialog in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogType {
  /// No dialog is currently active
  None,
  /// Showing the exit confirmation dialog
  ExitConfirm,
}

/// Represents which mode the TUI is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Navigating the lists
  Normal,
  /// Typing into the search box
  Editing,
}

/// Maintains the complete state of the terminal interface.
pub struct UIState {
  /// Search box, both listings and their paging state
  pub view:            SearchView,
  /// Current selection state in the visible list
  pub selected:        ListState,
  /// Current active dialog (if any)
  pub dialog:          DialogType,
  /// Which pane currently has focus
  pub focused_pane:    FocusedPane,
  /// Current scroll position in the details view
  pub scroll_position: usize,
  /// Maximum scroll position based on content
  pub max_scroll:      Option<usize>,
  /// Whether the UI needs to be redrawn
  pub needs_redraw:    bool,
  /// Current UI mode
  pub mode:            Mode,
  /// Status message to display, cleared by the next key press
  pub status_message:  Option<String>,
  /// Authors shown per row before "et al."
  pub author_limit:    usize,
  /// Current frame of the loading indicator
  pub spinner_frame:   usize,
  /// Page requests waiting to be spawned by the event loop
  requests:            Vec<LoadRequest>,
}

impl UIState {
  /// Creates the state for a fresh view.
  pub fn new(view: SearchView, author_limit: usize) -> Self {
    Self {
      view,
      selected: ListState::default(),
      dialog: DialogType::None,
      focused_pane: FocusedPane::List,
      scroll_position: 0,
      max_scroll: None,
      needs_redraw: true,
      mode: Mode::Normal,
      status_message: None,
      author_limit,
      spinner_frame: 0,
      requests: Vec::new(),
    }
  }

  /// Queues the first page of the recent feed.
  pub fn start(&mut self) {
    if let Some(request) = self.view.start() {
      self.requests.push(request);
    }
  }

  /// Hands over every page request made since the last call.
  pub fn take_requests(&mut self) -> Vec<LoadRequest> { std::mem::take(&mut self.requests) }

  /// Sets a status message to display
  pub fn set_status_message(&mut self, message: impl Into<String>) {
    self.status_message = Some(message.into());
    self.needs_redraw = true;
  }

  /// Clears the current status message
  pub fn clear_status_message(&mut self) {
    if self.status_message.take().is_some() {
      self.needs_redraw = true;
    }
  }

  /// Returns the paper under the selection, if the visible list has one.
  pub fn selected_paper(&self) -> Option<&PaperSummary> {
    self.selected.selected().and_then(|i| self.view.active().items().get(i))
  }

  /// The status line text, derived from the visible list.
  pub fn status_line(&self) -> Option<String> {
    let list = self.view.active();
    if list.is_loading() {
      return Some(format!("{} Loading…", SPINNER[self.spinner_frame % SPINNER.len()]));
    }
    if let Some(error) = list.last_error() {
      return Some(format!("Error: {error} (press r to retry)"));
    }
    if !list.has_more() {
      return Some(if list.is_empty() { "No results" } else { "No more results" }.to_string());
    }
    None
  }

  /// Advances the loading indicator.
  pub fn on_tick(&mut self) {
    if self.view.is_loading() {
      self.spinner_frame = self.spinner_frame.wrapping_add(1);
      self.needs_redraw = true;
    }
  }

  /// Applies a finished page load.
  ///
  /// The selection lands on the first row once the visible list has rows.
  pub fn apply(&mut self, response: LoadResponse) {
    let feed = response.request.feed;
    match self.view.apply(response) {
      LoadOutcome::Appended { added, exhausted } =>
        debug!("{:?} gained {} papers (exhausted: {})", feed, added, exhausted),
      LoadOutcome::Failed => debug!("{:?} page failed", feed),
      LoadOutcome::Stale => {
        debug!("Discarded a stale {:?} page", feed);
        return;
      },
    }

    if self.selected.selected().is_none() && !self.view.active().is_empty() {
      self.selected.select(Some(0));
      self.scroll_position = 0;
    }
    self.needs_redraw = true;
  }

  /// Handles a key press. Returns true when the application should exit.
  pub fn handle_input(&mut self, key: KeyEvent) -> bool {
    self.clear_status_message();

    if let Some(index) = category_shortcut(&key) {
      if self.dialog == DialogType::None {
        self.run_category(index);
      }
      return false;
    }

    match (self.dialog, self.mode) {
      (DialogType::ExitConfirm, _) => self.handle_exit_dialog(key.code),
      (DialogType::None, Mode::Editing) => {
        self.handle_editing_input(key);
        false
      },
      (DialogType::None, Mode::Normal) => self.handle_normal_input(key.code),
    }
  }

  /// Handles input while the exit confirmation dialog is active.
  ///
  /// Returns true only if user confirms exit.
  fn handle_exit_dialog(&mut self, key: KeyCode) -> bool {
    match key {
      KeyCode::Char('y') => true,
      KeyCode::Char('n') | KeyCode::Esc => {
        self.dialog = DialogType::None;
        self.needs_redraw = true;
        false
      },
      _ => false,
    }
  }

  /// Handles input while the search box has focus.
  ///
  /// Control and Alt chords are not text and leave the box untouched.
  fn handle_editing_input(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.mode = Mode::Normal,
      KeyCode::Enter => self.submit(),
      KeyCode::Backspace => self.view.pop_input(),
      KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        return,
      KeyCode::Char(c) => self.view.push_input(c),
      _ => return,
    }
    self.needs_redraw = true;
  }

  /// Handles input during normal operation (no dialog active).
  ///
  /// Supports:
  /// - Vim-style navigation (h,j,k,l)
  /// - Arrow key navigation
  /// - Pane switching
  /// - Opening the arXiv page or PDF
  /// - Retrying a failed page
  /// - Quit command
  fn handle_normal_input(&mut self, key: KeyCode) -> bool {
    match key {
      KeyCode::Char('q') => {
        self.dialog = DialogType::ExitConfirm;
        self.needs_redraw = true;
      },
      KeyCode::Char('/') | KeyCode::Char('i') => {
        self.mode = Mode::Editing;
        self.needs_redraw = true;
      },
      // Pane switching
      KeyCode::Left | KeyCode::Char('h') => self.focus(FocusedPane::List),
      KeyCode::Right | KeyCode::Char('l') => self.focus(FocusedPane::Details),
      KeyCode::Tab => self.focus(match self.focused_pane {
        FocusedPane::List => FocusedPane::Details,
        FocusedPane::Details => FocusedPane::List,
      }),
      // Navigation
      KeyCode::Up | KeyCode::Char('k') => self.handle_up_navigation(),
      KeyCode::Down | KeyCode::Char('j') => self.handle_down_navigation(),
      KeyCode::Home | KeyCode::Char('g') => self.select(0),
      KeyCode::End | KeyCode::Char('G') =>
        self.select(self.view.active().len().saturating_sub(1)),
      KeyCode::Enter | KeyCode::Char('o') =>
        if let Some(link) = self.selected_paper().map(|p| p.link.clone()) {
          self.open(&link);
        },
      KeyCode::Char('p') => match self.selected_paper().map(|p| p.pdf_url.clone()) {
        Some(Some(pdf)) => self.open(&pdf),
        Some(None) => self.set_status_message("This paper lists no PDF"),
        None => {},
      },
      KeyCode::Char('r') => self.retry(),
      _ => {},
    }
    false
  }

  /// Submits the search box.
  fn submit(&mut self) {
    match self.view.submit() {
      Ok(request) => {
        self.requests.push(request);
        self.mode = Mode::Normal;
        self.reset_selection();
      },
      Err(e) => self.set_status_message(e.to_string()),
    }
  }

  /// Runs the category shortcut at `index`, if one is configured.
  fn run_category(&mut self, index: usize) {
    match self.view.select_category_at(index) {
      Some(Ok(request)) => {
        self.requests.push(request);
        self.mode = Mode::Normal;
        self.reset_selection();
      },
      Some(Err(e)) => self.set_status_message(e.to_string()),
      None => self.set_status_message(format!("No category shortcut {}", index + 1)),
    }
  }

  /// Requests the page that failed last, or the next one.
  fn retry(&mut self) {
    if self.view.active().last_error().is_none() {
      return;
    }
    if let Some(request) = self.view.load_more() {
      self.requests.push(request);
      self.needs_redraw = true;
    }
  }

  /// Clears the selection ahead of a new listing.
  fn reset_selection(&mut self) {
    self.selected.select(None);
    self.focused_pane = FocusedPane::List;
    self.scroll_position = 0;
    self.needs_redraw = true;
  }

  /// Moves focus to `pane`.
  fn focus(&mut self, pane: FocusedPane) {
    if self.focused_pane != pane {
      self.focused_pane = pane;
      self.needs_redraw = true;
    }
  }

  /// Selects row `index` of the visible list and requests more rows near the bottom.
  fn select(&mut self, index: usize) {
    if self.view.active().is_empty() || self.selected.selected() == Some(index) {
      return;
    }
    self.selected.select(Some(index));
    self.scroll_position = 0;
    self.needs_redraw = true;
    if let Some(request) = self.view.on_scroll(index) {
      self.requests.push(request);
    }
  }

  /// Handles upward navigation in both list and details views.
  fn handle_up_navigation(&mut self) {
    match self.focused_pane {
      FocusedPane::List => {
        let i = self.selected.selected().unwrap_or(0);
        self.select(i.saturating_sub(1));
      },
      FocusedPane::Details =>
        if self.scroll_position > 0 {
          self.scroll_position -= 1;
          self.needs_redraw = true;
        },
    }
  }

  /// Handles downward navigation in both list and details views.
  fn handle_down_navigation(&mut self) {
    match self.focused_pane {
      FocusedPane::List => {
        let next = self.selected.selected().map_or(0, |i| i + 1);
        self.select(next.min(self.view.active().len().saturating_sub(1)));
      },
      FocusedPane::Details =>
        if let Some(max) = self.max_scroll {
          if self.scroll_position < max {
            self.scroll_position += 1;
            self.needs_redraw = true;
          }
        },
    }
  }

  /// Updates the maximum scroll position for the details view.
  ///
  /// # Arguments
  ///
  /// * `available_lines` - Total number of lines in the content
  /// * `visible_lines` - Number of lines that can be displayed at once
  pub fn update_max_scroll(&mut self, available_lines: usize, visible_lines: usize) {
    let max = available_lines.saturating_sub(visible_lines);
    self.max_scroll = Some(max);
    self.scroll_position = self.scroll_position.min(max);
  }

  /// Opens `target` with the system handler and reports it on the status line.
  fn open(&mut self, target: &str) {
    match open_with_system_viewer(target) {
      Ok(()) => self.set_status_message(format!("Opened {target}")),
      Err(e) => {
        error!("Failed to open {}: {}", target, e);
        self.set_status_message(format!("Could not open {target}: {e}"));
      },
    }
  }
}

/// Maps `F1`..`F9` and `Alt+1`..`Alt+9` to a zero-based category index.
fn category_shortcut(key: &KeyEvent) -> Option<usize> {
  match key.code {
    KeyCode::F(n @ 1..=9) => Some(usize::from(n) - 1),
    KeyCode::Char(c @ '1'..='9') if key.modifiers.contains(KeyModifiers::ALT) =>
      c.to_digit(10).map(|d| d as usize - 1),
    _ => None,
  }
}

/// Opens a link using the Windows system handler.
#[cfg(target_os = "windows")]
fn open_with_system_viewer(target: &str) -> io::Result<()> {
  std::process::Command::new("cmd").args(["/C", "start", "", target]).spawn().map(|_| ())
}

/// Opens a link using the macOS system handler.
#[cfg(target_os = "macos")]
fn open_with_system_viewer(target: &str) -> io::Result<()> {
  std::process::Command::new("open").arg(target).spawn().map(|_| ())
}

/// Opens a link using the desktop's handler on Linux and other Unixes.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn open_with_system_viewer(target: &str) -> io::Result<()> {
  std::process::Command::new("xdg-open").arg(target).spawn().map(|_| ())
}
