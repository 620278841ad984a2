//! Drawing and layout management for the Terminal User Interface.
//!
//! Each region of the screen has its own `draw_*` method on [`UIDrawer`].
//! Layout is constraint-based so the view scales with the terminal.

use ratatui::{
  layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
  Frame,
};

use super::{
  state::{DialogType, FocusedPane, Mode, UIState},
  *,
};

/// Title shown in the header.
const APP_TITLE: &str = "ScholarlyStats";

/// Main drawer struct responsible for rendering the UI.
///
/// Holds references to both the frame being drawn and the current UI state.
pub struct UIDrawer<'a, 'b> {
  /// The frame handed out by `Terminal::draw`
  frame: &'a mut Frame<'b>,
  /// State being rendered; scroll bounds and the list offset are written back
  state: &'a mut UIState,
}

impl<'a, 'b> UIDrawer<'a, 'b> {
  /// Creates a new drawer instance.
  pub fn new(frame: &'a mut Frame<'b>, state: &'a mut UIState) -> Self { Self { frame, state } }

  /// Main drawing entry point, handles the entire UI render.
  pub fn draw(&mut self) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(1), // Header
        Constraint::Length(3), // Search box
        Constraint::Length(1), // Category shortcuts
        Constraint::Min(5),    // List and details
        Constraint::Length(1), // Status
        Constraint::Length(1), // Help
      ])
      .split(self.frame.area());

    self.draw_header(chunks[0]);
    self.draw_search_box(chunks[1]);
    self.draw_categories(chunks[2]);

    let (left_area, right_area) = self.split_layout(chunks[3]);
    self.draw_paper_list(left_area);
    match self.state.selected_paper().cloned() {
      Some(paper) => self.draw_paper_details(&paper, right_area),
      None => self.draw_empty_details(right_area),
    }

    self.draw_status(chunks[4]);
    self.draw_help_bar(chunks[5]);

    if self.state.dialog == DialogType::ExitConfirm {
      self.draw_exit_dialog();
    }

    self.state.needs_redraw = false;
  }

  /// Splits the main area into list and detail panes.
  fn split_layout(&self, area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
      .split(area);
    (chunks[0], chunks[1])
  }

  /// Draws the application title.
  fn draw_header(&mut self, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
      Span::styled(APP_TITLE, styles::TITLE),
      Span::styled("  arXiv search", styles::HELP),
    ]))
    .alignment(Alignment::Center);
    self.frame.render_widget(header, area);
  }

  /// Draws the search box, with a cursor while it is being edited.
  fn draw_search_box(&mut self, area: Rect) {
    let editing = self.state.mode == Mode::Editing;
    let input = self.state.view.input();

    let content = if input.is_empty() && !editing {
      Line::from(vec![
        Span::styled("Press ", styles::HELP),
        Span::styled("/", styles::KEY_HIGHLIGHT),
        Span::styled(" to search arXiv", styles::HELP),
      ])
    } else {
      Line::from(Span::styled(input.to_string(), Style::default().fg(Color::White)))
    };

    let block = Block::default()
      .title(Line::from(vec![
        Span::styled("🔍 ", styles::LABEL),
        Span::styled("Search", styles::TITLE),
      ]))
      .borders(Borders::ALL)
      .border_style(styles::border_style(editing));
    self.frame.render_widget(Paragraph::new(content).block(block), area);

    if editing {
      let width = input.chars().count() as u16;
      let x = (area.x + 1 + width).min(area.right().saturating_sub(2));
      self.frame.set_cursor_position((x, area.y + 1));
    }
  }

  /// Draws the category shortcut bar.
  fn draw_categories(&mut self, area: Rect) {
    let mut spans = Vec::new();
    for (i, name) in self.state.view.categories().iter().take(9).enumerate() {
      if i > 0 {
        spans.push(Span::styled(" • ", styles::SEPARATOR));
      }
      spans.push(Span::styled(format!("F{}", i + 1), styles::KEY_HIGHLIGHT));
      spans.push(Span::styled(format!(" {name}"), styles::NORMAL));
    }
    self.frame.render_widget(Paragraph::new(Line::from(spans)), area);
  }

  /// Draws the visible list, one title and author line per paper.
  fn draw_paper_list(&mut self, area: Rect) {
    let author_limit = self.state.author_limit;
    let list = self.state.view.active();

    let items: Vec<ListItem> = list
      .items()
      .iter()
      .map(|paper| {
        ListItem::new(vec![
          Line::from(Span::styled(paper.title.clone(), styles::PAPER_TITLE)),
          Line::from(Span::styled(
            format!("  {}", paper.display_authors(author_limit)),
            styles::HELP,
          )),
        ])
      })
      .collect();

    let heading = match (self.state.view.active_feed(), self.state.view.active_query()) {
      (Feed::Search, Some(query)) => format!("Results for \"{query}\""),
      _ => "Recent submissions".to_string(),
    };

    let widget = List::new(items)
      .block(
        Block::default()
          .title(Line::from(vec![
            Span::styled("📚 ", Style::default().fg(Color::LightBlue)),
            Span::styled(heading, styles::TITLE),
            Span::styled(format!(" ({})", list.len()), styles::NORMAL),
          ]))
          .borders(Borders::ALL)
          .border_style(styles::border_style(self.state.focused_pane == FocusedPane::List)),
      )
      .highlight_style(styles::HIGHLIGHT)
      .highlight_symbol("▶ ");

    self.frame.render_stateful_widget(widget, area, &mut self.state.selected);
  }

  /// Draws the details pane when nothing is selected.
  fn draw_empty_details(&mut self, area: Rect) {
    let message = if self.state.view.is_loading() { "Loading…" } else { "Nothing selected" };
    let placeholder = Paragraph::new(Span::styled(message, styles::HELP))
      .alignment(Alignment::Center)
      .block(self.details_block());
    self.frame.render_widget(placeholder, area);
  }

  /// The bordered block around the details pane.
  fn details_block(&self) -> Block<'static> {
    Block::default()
      .title(Line::from(vec![
        Span::styled("📄 ", Style::default().fg(Color::LightBlue)),
        Span::styled("Paper Details", styles::TITLE),
      ]))
      .borders(Borders::ALL)
      .border_style(styles::border_style(self.state.focused_pane == FocusedPane::Details))
  }

  /// Draws the detailed view of a paper.
  ///
  /// Shows title, authors, publication metadata, links, and the abstract,
  /// which scrolls when the details pane is focused.
  fn draw_paper_details(&mut self, paper: &PaperSummary, area: Rect) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(3), // Title
        Constraint::Length(2), // Authors
        Constraint::Length(2), // Published and category
        Constraint::Length(2), // Links
        Constraint::Length(1), // Abstract header
        Constraint::Min(3),    // Abstract content
      ])
      .split(area);

    let block = self.details_block();
    self.frame.render_widget(block, area);

    self.draw_labelled(chunks[0], "Title: ", &paper.title, Style::default().fg(Color::White));
    self.draw_labelled(chunks[1], "Authors: ", &paper.authors.join(", "), styles::NORMAL);
    self.draw_metadata(paper, chunks[2]);
    self.draw_links(paper, chunks[3]);
    self.draw_abstract(paper, chunks[4], chunks[5]);

    if self.state.focused_pane == FocusedPane::Details {
      self.draw_scroll_indicator(area);
    }
  }

  /// Draws a wrapped `label: value` paragraph.
  fn draw_labelled(&mut self, area: Rect, label: &str, value: &str, style: Style) {
    let paragraph = Paragraph::new(Line::from(vec![
      Span::styled(label.to_string(), styles::LABEL),
      Span::styled(value.to_string(), style),
    ]))
    .wrap(Wrap { trim: true });
    self.frame.render_widget(paragraph, area);
  }

  /// Draws the identifier, submission date and primary category.
  fn draw_metadata(&mut self, paper: &PaperSummary, area: Rect) {
    let published = paper
      .published
      .map(|date| date.format("%Y-%m-%d").to_string())
      .unwrap_or_else(|| "unknown".to_string());

    let mut spans = vec![
      Span::styled("arXiv: ", styles::LABEL),
      Span::styled(paper.arxiv_id().to_string(), Style::default().fg(Color::LightYellow)),
      Span::styled("  Published: ", styles::LABEL),
      Span::styled(published, styles::NORMAL),
    ];
    if let Some(category) = &paper.primary_category {
      spans.push(Span::styled("  Category: ", styles::LABEL));
      spans.push(Span::styled(category.clone(), Style::default().fg(Color::LightYellow)));
    }
    self.frame.render_widget(Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true }), area);
  }

  /// Draws the abstract page and PDF links.
  fn draw_links(&mut self, paper: &PaperSummary, area: Rect) {
    let pdf = match &paper.pdf_url {
      Some(pdf) => Span::styled(pdf.clone(), styles::LINK),
      None => Span::styled("none listed", styles::HELP),
    };
    let links = Paragraph::new(vec![
      Line::from(vec![
        Span::styled("Link: ", styles::LABEL),
        Span::styled(paper.link.clone(), styles::LINK),
      ]),
      Line::from(vec![Span::styled("PDF:  ", styles::LABEL), pdf]),
    ]);
    self.frame.render_widget(links, area);
  }

  /// Draws the paper's abstract with header and content.
  ///
  /// Also updates the maximum scroll position based on content length.
  ///
  /// # Arguments
  ///
  /// * `paper` - The paper whose abstract is being displayed
  /// * `header_area` - The area for the "Abstract:" label
  /// * `content_area` - The area for the abstract text
  fn draw_abstract(&mut self, paper: &PaperSummary, header_area: Rect, content_area: Rect) {
    let abstract_header = Paragraph::new(Span::styled("Abstract:", styles::LABEL));
    self.frame.render_widget(abstract_header, header_area);

    let abstract_text = normalize_whitespace(&paper.abstract_text);
    let lines = calculate_wrapped_lines(&abstract_text, content_area);
    self.state.update_max_scroll(lines, content_area.height as usize);

    let abstract_content = Paragraph::new(abstract_text)
      .style(styles::NORMAL)
      .wrap(Wrap { trim: true })
      .block(Block::default().padding(Padding::new(0, 1, 0, 0)))
      .scroll((self.state.scroll_position as u16, 0));
    self.frame.render_widget(abstract_content, content_area);
  }

  /// Draws the scroll position indicator when viewing long content.
  fn draw_scroll_indicator(&mut self, area: Rect) {
    if let Some(max_scroll) = self.state.max_scroll {
      if max_scroll > 0 {
        let scroll_indicator = format!(" {}/{} ", self.state.scroll_position + 1, max_scroll + 1);
        let width = scroll_indicator.len() as u16;
        if area.width <= width + 1 || area.height < 2 {
          return;
        }
        let indicator_area = Rect {
          x:      area.x + area.width - width - 1,
          y:      area.y + area.height - 1,
          width,
          height: 1,
        };
        let scroll_text =
          Paragraph::new(scroll_indicator).alignment(Alignment::Right).style(styles::HELP);
        self.frame.render_widget(scroll_text, indicator_area);
      }
    }
  }

  /// Draws the status line: loading, exhaustion, errors and one-off messages.
  fn draw_status(&mut self, area: Rect) {
    let (text, style) = match (&self.state.status_message, self.state.status_line()) {
      (Some(message), _) => (message.clone(), styles::NORMAL),
      (None, Some(line)) if self.state.view.active().is_loading() => (line, styles::LOADING),
      (None, Some(line)) if self.state.view.active().last_error().is_some() =>
        (line, styles::ERROR),
      (None, Some(line)) => (line, styles::HELP),
      (None, None) => (String::new(), styles::HELP),
    };
    self.frame.render_widget(Paragraph::new(Span::styled(text, style)), area);
  }

  /// Draws the help bar showing available commands.
  fn draw_help_bar(&mut self, area: Rect) {
    let entries: &[(&str, &str)] = match self.state.mode {
      Mode::Editing => &[("Enter", "search"), ("Esc", "cancel"), ("F1-F9", "category")],
      Mode::Normal => &[
        ("/", "search"),
        ("↑↓←→", "nav"),
        ("o", "open"),
        ("p", "pdf"),
        ("r", "retry"),
        ("F1-F9", "category"),
        ("q", "quit"),
      ],
    };

    let mut spans = Vec::new();
    for (i, (key, action)) in entries.iter().enumerate() {
      if i > 0 {
        spans.push(Span::styled(" • ", styles::SEPARATOR));
      }
      spans.push(Span::styled(*key, styles::KEY_HIGHLIGHT));
      spans.push(Span::styled(format!(":{action}"), styles::HELP));
    }
    self.frame.render_widget(Paragraph::new(Line::from(spans)), area);
  }

  /// Draws the exit confirmation dialog.
  fn draw_exit_dialog(&mut self) {
    let content = vec![
      Line::from(Span::styled("Are you sure you want to quit?", Style::default().fg(Color::White))),
      Line::from(""),
      Line::from(vec![
        Span::styled("Press ", styles::HELP),
        Span::styled("y", styles::KEY_HIGHLIGHT),
        Span::styled(" to confirm, ", styles::HELP),
        Span::styled("n", styles::KEY_HIGHLIGHT),
        Span::styled(" to cancel", styles::HELP),
      ]),
    ];

    self.draw_dialog("Exit Confirmation", &content, Color::Red);
  }

  /// Draws a centered dialog box with the given content.
  ///
  /// # Arguments
  ///
  /// * `title` - Dialog title
  /// * `content` - Lines to display
  /// * `color` - Color theme for the dialog
  fn draw_dialog(&mut self, title: &str, content: &[Line], color: Color) {
    let dialog_box = create_dialog_box(title, content, self.frame.area());

    self.frame.render_widget(Clear, dialog_box);
    self.frame.render_widget(
      Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
          title.to_string(),
          Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
      dialog_box,
    );

    self.frame.render_widget(
      Paragraph::new(content.to_vec()).alignment(Alignment::Center),
      dialog_box.inner(Margin { vertical: 1, horizontal: 2 }),
    );
  }
}

/// Creates a centered dialog box sized to its content and clipped to `r`.
fn create_dialog_box(title: &str, content: &[Line], r: Rect) -> Rect {
  let content_width = content.iter().map(|line| line.width()).max().unwrap_or(0);
  let width = (title.len().max(content_width).max(40) as u16 + 4).min(r.width);
  let height = (content.len() as u16 + 2).min(r.height);

  Rect {
    x: r.x + (r.width - width) / 2,
    y: r.y + (r.height - height) / 2,
    width,
    height,
  }
}

/// Counts the lines `text` occupies when word-wrapped into `area`.
///
/// Used for determining scroll limits.
fn calculate_wrapped_lines(text: &str, area: Rect) -> usize {
  let available_width = area.width.saturating_sub(2) as usize;
  text
    .lines()
    .map(|line| {
      let mut count = 0;
      let mut current = 0;
      for word in line.split_whitespace() {
        let len = word.chars().count();
        if current > 0 && current + 1 + len <= available_width {
          current += 1 + len;
        } else {
          if current > 0 {
            count += 1;
          }
          current = len;
        }
      }
      count + usize::from(current > 0)
    })
    .sum()
}
