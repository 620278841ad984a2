//! Terminal User Interface for scholarly.
//!
//! An interactive arXiv search view built on `ratatui` and `crossterm`. It
//! opens on the most recent submissions; typing a query or pressing a
//! category shortcut replaces them with search results. Moving the selection
//! near the bottom of either list fetches the next page.
//!
//! The screen is split into:
//! - A header and the search box
//! - The category shortcut bar
//! - Left: the result list, one title with its authors per row
//! - Right: details of the selected paper
//! - A status line and a help bar
//!
//! # Navigation
//!
//! - `/` or `i`: Edit the search box, Enter submits, Esc leaves it
//! - Up/k, Down/j: Move the selection or scroll the details
//! - Left/h, Right/l, Tab: Switch between the list and the details
//! - Enter/o: Open the selected paper's arXiv page, p: open its PDF
//! - F1..F9 or Alt+1..Alt+9: Category shortcuts
//! - r: Retry a page that failed to load
//! - q: Quit application
//!
//! Page loads run as background tasks and report back through the event
//! channel, so the view stays responsive while arXiv answers.

use std::{io, sync::Arc, time::Duration};

use crossterm::{
  execute,
  terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use scholarly::{
  pager::LoadOutcome,
  view::{Feed, LoadRequest, LoadResponse, SearchView},
};
use tokio::sync::mpsc;
use tracing::info;

use self::{
  event::{Event, EventHandler},
  state::UIState,
  ui::UIDrawer,
};
use super::*;

mod event;
mod state;
mod styles;
mod ui;

/// How often the loop wakes up to animate the loading indicator.
const TICK_RATE: Duration = Duration::from_millis(200);

/// Runs the Terminal User Interface.
///
/// This function initializes the terminal, requests the first page of the
/// recent feed, and manages the main event loop. The terminal is restored to
/// its original state when the function returns, even if the loop failed.
///
/// # Errors
///
/// Returns a `ScholarlyCliError` if the HTTP client cannot be built or the
/// terminal cannot be set up or drawn to. Failed page loads are not errors;
/// they are shown on the status line.
pub async fn run(config: Config) -> Result<()> {
  let client = Arc::new(ArxivClient::new(&config)?);
  let mut state = UIState::new(SearchView::new(&config), config.author_limit);
  info!("Starting search view against {}", config.endpoint);

  // Setup terminal
  enable_raw_mode()?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend)?;

  let result = event_loop(&mut terminal, &mut state, client).await;

  // Cleanup
  disable_raw_mode()?;
  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
  terminal.show_cursor()?;

  result
}

/// Draws and dispatches events until the user confirms exit.
async fn event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  state: &mut UIState,
  client: Arc<ArxivClient>,
) -> Result<()> {
  let mut events = EventHandler::new(TICK_RATE);
  let loads = events.sender();

  state.start();

  loop {
    for request in state.take_requests() {
      spawn_load(&client, &loads, request);
    }

    if state.needs_redraw {
      terminal.draw(|f| UIDrawer::new(f, state).draw())?;
    }

    match events.next().await {
      Some(Event::Key(key)) =>
        if state.handle_input(key) {
          break;
        },
      Some(Event::Resize(..)) => state.needs_redraw = true,
      Some(Event::Tick) => state.on_tick(),
      Some(Event::Loaded(response)) => state.apply(response),
      None => break,
    }
  }
  Ok(())
}

/// Runs `request` on a background task and posts the result to `loads`.
fn spawn_load(client: &Arc<ArxivClient>, loads: &mpsc::Sender<Event>, request: LoadRequest) {
  debug!("Requesting {:?} page {} for {}", request.feed, request.ticket.page, request.query);
  let client = Arc::clone(client);
  let loads = loads.clone();
  tokio::spawn(async move {
    let response = request.execute(client.as_ref()).await;
    // The loop has exited if the channel is closed; the page is no longer wanted.
    let _ = loads.send(Event::Loaded(response)).await;
  });
}
