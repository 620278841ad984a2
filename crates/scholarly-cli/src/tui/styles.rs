//! UI styling constants and helper functions for the TUI.
//!
//! Colors are kept to the basic palette so the view reads the same on light
//! and dark terminal themes.

use ratatui::style::{Color, Modifier, Style};

/// Help text and secondary information.
pub const HELP: Style = Style::new().fg(Color::DarkGray);

/// The currently selected row.
pub const HIGHLIGHT: Style =
  Style::new().bg(Color::DarkGray).fg(Color::LightCyan).add_modifier(Modifier::BOLD);

/// Keyboard shortcuts and interactive elements.
pub const KEY_HIGHLIGHT: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Field labels in the detail pane.
pub const LABEL: Style = Style::new().fg(Color::LightBlue);

/// Regular text content.
pub const NORMAL: Style = Style::new().fg(Color::Gray);

/// Paper titles in the result list.
pub const PAPER_TITLE: Style = Style::new().fg(Color::White);

/// Links to arXiv pages and PDFs.
pub const LINK: Style = Style::new().fg(Color::LightCyan).add_modifier(Modifier::UNDERLINED);

/// Section titles and the header.
pub const TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// The status line while a page is loading.
pub const LOADING: Style = Style::new().fg(Color::LightYellow);

/// The status line after a failed page.
pub const ERROR: Style = Style::new().fg(Color::LightRed);

/// Separator between help entries.
pub const SEPARATOR: Style = Style::new().fg(Color::Blue);

/// Returns the appropriate border style based on focus state.
///
/// # Arguments
///
/// * `focused` - Whether the panel is currently focused
pub fn border_style(focused: bool) -> Style {
  if focused {
    Style::default().fg(Color::LightBlue)
  } else {
    Style::default().fg(Color::Blue)
  }
}
