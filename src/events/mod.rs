//! Event handling for the application.
//!
//! Keyboard input and terminal resizes come from the [`EventHandler`]
//! reader thread; search completions are posted onto the same channel
//! by the async tasks that execute tag searches.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::api::TagSearchResult;
use crate::config::Settings;

/// Application events.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for status expiry and timers.
    Tick,
    /// A tag search completed.
    SearchResults {
        /// Sequence stamp of the originating search.
        seq: u64,
        /// The raw results.
        results: Vec<TagSearchResult>,
    },
    /// A tag search failed.
    SearchFailed {
        /// Sequence stamp of the originating search.
        seq: u64,
        /// User-facing failure message.
        message: String,
    },
}

/// Reads terminal events and translates them into [`Event`]s.
///
/// Only key presses and resizes drive this UI. Key repeats and
/// releases, mouse, focus, and paste events are swallowed inside the
/// poll loop instead of being surfaced, so a `Tick` always means the
/// configured interval elapsed without input.
pub struct EventHandler {
    /// How long to wait for input before emitting a tick.
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a handler polling at the configured tick interval.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            tick_rate: Duration::from_millis(settings.tick_rate_ms),
        }
    }

    /// Block until the next relevant terminal event.
    ///
    /// Returns `Event::Tick` when the tick interval elapses without a
    /// key press or resize arriving.
    pub fn next(&self) -> io::Result<Event> {
        let deadline = Instant::now() + self.tick_rate;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(Event::Tick);
            }

            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Event::Key(key));
                }
                CrosstermEvent::Resize(width, height) => {
                    return Ok(Event::Resize(width, height));
                }
                // Key repeats/releases, mouse, focus, and paste events
                // have no meaning in this UI; keep polling until the
                // deadline.
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_uses_configured_tick_rate() {
        let settings = Settings {
            tick_rate_ms: 250,
            ..Settings::default()
        };
        let handler = EventHandler::from_settings(&settings);
        assert_eq!(handler.tick_rate, Duration::from_millis(250));
    }

    #[test]
    fn test_handler_default_tick_rate() {
        let handler = EventHandler::from_settings(&Settings::default());
        assert_eq!(handler.tick_rate, Duration::from_millis(100));
    }
}
