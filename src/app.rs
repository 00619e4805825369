//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for
//! predictable state management in the TUI application.

use tracing::{debug, info, trace, warn};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::{Category, Site};
use crate::config::Config;
use crate::events::Event;
use crate::routing::Navigator;
use crate::ui::theme::theme;
use crate::ui::{TagDrop, TagDropAction, TagDropConfig, ValueList};

/// Delimiter used for the persisted watched tags value.
const WATCHED_TAGS_DELIMITER: &str = "|";

/// Ticks a status message stays visible (at the 100ms tick rate).
const STATUS_TICKS: u8 = 30;

/// The current view state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Normal browsing state.
    #[default]
    Browsing,
    /// Application is in the process of exiting.
    Exiting,
}

/// Which panel receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The tag selection dropdown.
    #[default]
    TagSelect,
    /// The watched tags editor.
    WatchedTags,
}

/// Side effect requested by an update, executed by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Run a tag search and post the stamped results back as an event.
    Search {
        /// The query text.
        query: String,
        /// Maximum results to request.
        limit: u32,
        /// Sequence stamp.
        seq: u64,
    },
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    /// The current view state.
    state: AppState,
    /// Whether the application should quit.
    should_quit: bool,
    /// Which panel has keyboard focus.
    focus: Focus,
    /// The tag selection dropdown.
    tag_drop: TagDrop,
    /// The watched tags editor.
    watched_tags: ValueList,
    /// Navigation collaborator for tag selection.
    navigator: Box<dyn Navigator>,
    /// Transient status line message.
    status: Option<String>,
    /// Remaining ticks before the status message clears.
    status_ticks: u8,
}

impl App {
    /// Create a new application instance.
    pub fn new(config: &Config, navigator: Box<dyn Navigator>) -> Self {
        debug!("Creating new application instance");

        let tag_drop = TagDrop::new(TagDropConfig::from_settings(&config.settings));

        let mut watched_tags = ValueList::from_raw(
            &config.settings.watched_tags,
            Some(WATCHED_TAGS_DELIMITER),
        );
        watched_tags.set_on_change(Box::new(|values| {
            info!(count = values.len(), "Watched tags updated");
        }));

        Self {
            state: AppState::Browsing,
            should_quit: false,
            focus: Focus::TagSelect,
            tag_drop,
            watched_tags,
            navigator,
            status: None,
            status_ticks: 0,
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the current application state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// The panel currently receiving keyboard input.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Get a reference to the tag drop.
    pub fn tag_drop(&self) -> &TagDrop {
        &self.tag_drop
    }

    /// Get a mutable reference to the tag drop.
    pub fn tag_drop_mut(&mut self) -> &mut TagDrop {
        &mut self.tag_drop
    }

    /// Get a reference to the watched tags editor.
    pub fn watched_tags(&self) -> &ValueList {
        &self.watched_tags
    }

    /// The watched tags as the persisted delimited string.
    pub fn watched_tags_raw(&self) -> String {
        self.watched_tags.collection().join(WATCHED_TAGS_DELIMITER)
    }

    /// Seed the tag drop from fetched site data.
    ///
    /// The rank source depends on whether a category context is active,
    /// so `set_category` must be called first when one is.
    pub fn set_site(&mut self, site: &Site) {
        let tags = site.ranked_tags(self.tag_drop.category().is_some()).to_vec();
        debug!(count = tags.len(), "Seeding ranked tags");
        self.tag_drop.set_top_tags(tags);
    }

    /// Set the active category context.
    pub fn set_category(&mut self, category: Option<Category>) {
        self.tag_drop.set_category(category);
    }

    /// Show a transient status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.status_ticks = STATUS_TICKS;
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    /// All state changes flow through this method; any requested side
    /// effect is returned for the event loop to execute.
    pub fn update(&mut self, event: Event) -> Option<AppCommand> {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event)
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
                // Terminal resize is handled automatically by ratatui
                None
            }
            Event::Tick => {
                self.handle_tick();
                None
            }
            Event::SearchResults { seq, results } => {
                if self.tag_drop.apply_search_results(seq, results) {
                    trace!(seq, "Applied search results");
                }
                None
            }
            Event::SearchFailed { seq, message } => {
                warn!(seq, %message, "Tag search failed");
                self.tag_drop.apply_search_failure(seq);
                self.set_status(message);
                None
            }
        }
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: crossterm::event::KeyEvent) -> Option<AppCommand> {
        use crossterm::event::{KeyCode, KeyModifiers};

        // Global key bindings (always available)
        match (key_event.code, key_event.modifiers) {
            // Quit on Ctrl+C (always works)
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                self.state = AppState::Exiting;
                return None;
            }
            // Tab switches panels when the dropdown is collapsed
            (KeyCode::Tab, KeyModifiers::NONE) if !self.tag_drop.is_expanded() => {
                self.focus = match self.focus {
                    Focus::TagSelect => Focus::WatchedTags,
                    Focus::WatchedTags => Focus::TagSelect,
                };
                debug!(focus = ?self.focus, "Focus switched");
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::TagSelect => {
                // 'q' quits only while the dropdown is collapsed; expanded,
                // it is part of the search filter.
                if !self.tag_drop.is_expanded()
                    && key_event.code == KeyCode::Char('q')
                    && key_event.modifiers == KeyModifiers::NONE
                {
                    self.should_quit = true;
                    self.state = AppState::Exiting;
                    return None;
                }

                if let Some(action) = self.tag_drop.handle_input(key_event) {
                    match action {
                        TagDropAction::Search { query, limit, seq } => {
                            debug!(%query, seq, "Dispatching tag search");
                            return Some(AppCommand::Search { query, limit, seq });
                        }
                        TagDropAction::Select { id, item } => {
                            debug!(%id, "Tag selected");
                            self.tag_drop.on_change(&id, item.as_ref(), self.navigator.as_mut());
                        }
                        TagDropAction::Cancel => {
                            debug!("Tag selection cancelled");
                        }
                    }
                }
                None
            }
            Focus::WatchedTags => {
                self.watched_tags.handle_input(key_event);
                None
            }
        }
    }

    /// Handle periodic tick events.
    fn handle_tick(&mut self) {
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 {
                self.status = None;
            }
        }
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    /// The view is a pure function of the current state.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Tag drop
                Constraint::Min(5),    // Watched tags
                Constraint::Length(1), // Footer/Status bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.tag_drop
            .render(frame, chunks[1], self.focus == Focus::TagSelect);
        self.watched_tags
            .render(frame, chunks[2], self.focus == Focus::WatchedTags);
        self.render_footer(frame, chunks[3]);

        // The expanded option list overlays the panels below the header.
        self.tag_drop.render_expanded_list(frame, chunks[1], area);
    }

    /// Render the application header.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let title = Paragraph::new("LazyForum")
            .style(Style::default().fg(t.accent))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(t.border)),
            );
        frame.render_widget(title, area);
    }

    /// Render the footer/status bar.
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let footer = if let Some(status) = &self.status {
            Line::from(Span::styled(
                format!(" {} ", status),
                Style::default().fg(t.bg).bg(t.accent),
            ))
        } else {
            let hint = match self.focus {
                Focus::TagSelect if self.tag_drop.is_expanded() => {
                    "Type to search | j/k: navigate | Enter: select | Esc: close"
                }
                Focus::TagSelect => "Enter: browse tags | Tab: watched tags | q: quit",
                Focus::WatchedTags => {
                    "Type + Enter: add | Ctrl+d: remove | Ctrl+Up/Down: reorder | Tab: back"
                }
            };
            Line::from(Span::styled(hint, Style::default().fg(t.input_placeholder)))
        };

        frame.render_widget(Paragraph::new(footer), area);
    }
}
