//! Event handling for the TUI.
//!
//! Terminal input, timer ticks and finished page loads all arrive through one
//! channel, so the view state is only ever touched by the loop reading it.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tracing::error;

use super::*;

/// How long the input reader waits for a terminal event before checking for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Events that can occur in the application
#[derive(Debug)]
pub enum Event {
  /// Key press events
  Key(KeyEvent),
  /// Terminal resize events
  Resize(u16, u16),
  /// Timer tick for regular updates
  Tick,
  /// A page request finished
  Loaded(LoadResponse),
}

/// Event handler that manages input and timer events
pub struct EventHandler {
  /// Sender half of event channel, cloned for page loads
  tx: mpsc::Sender<Event>,
  /// Receiver half of event channel
  rx: mpsc::Receiver<Event>,
}

impl EventHandler {
  /// Creates a new event handler.
  ///
  /// # Arguments
  /// * `tick_rate` - How often to send tick events
  pub fn new(tick_rate: Duration) -> Self {
    let (tx, rx) = mpsc::channel(100);

    // Reading the terminal blocks, so it gets its own thread.
    let input_tx = tx.clone();
    tokio::task::spawn_blocking(move || {
      while !input_tx.is_closed() {
        match event::poll(POLL_INTERVAL) {
          Ok(true) => {},
          Ok(false) => continue,
          Err(e) => {
            error!("Polling terminal events failed: {}", e);
            break;
          },
        }
        let event = match event::read() {
          Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
          Ok(CrosstermEvent::Resize(width, height)) => Event::Resize(width, height),
          Ok(_) => continue,
          Err(e) => {
            error!("Reading terminal event failed: {}", e);
            break;
          },
        };
        if input_tx.blocking_send(event).is_err() {
          break;
        }
      }
    });

    let tick_tx = tx.clone();
    tokio::spawn(async move {
      let mut interval = tokio::time::interval(tick_rate);
      loop {
        interval.tick().await;
        if tick_tx.send(Event::Tick).await.is_err() {
          break;
        }
      }
    });

    Self { tx, rx }
  }

  /// A sender for feeding finished loads back into the loop.
  pub fn sender(&self) -> mpsc::Sender<Event> { self.tx.clone() }

  /// Receives the next event from the event handler.
  ///
  /// This method will await the next event that occurs.
  pub async fn next(&mut self) -> Option<Event> { self.rx.recv().await }
}
