//! Editable value list component.
//!
//! Maintains an ordered collection of strings with a staged input line.
//! Supports add/edit/remove and reordering with wraparound, and fires an
//! optional change callback with the full collection after every
//! mutation. The collection is (re)derived from a raw delimited string
//! whenever upstream state changes.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::debug;

/// Callback invoked with the full collection after every mutation.
pub type ChangeCallback = Box<dyn FnMut(&[String])>;

/// Editable list of string values.
///
/// The staged input gates commits: adding is a no-op while the staged
/// text is empty. Reordering uses remove-then-insert semantics with
/// wraparound at both ends.
pub struct ValueList {
    /// The ordered collection being edited. Duplicates are permitted.
    collection: Vec<String>,
    /// Staged text not yet committed to the collection.
    staged: String,
    /// Delimiter used when deriving the collection from a raw string.
    delimiter: Option<String>,
    /// Cursor into the collection for keyboard-driven operations.
    selected: usize,
    /// Change notification consumer; invoking is a no-op when absent.
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueList")
            .field("collection", &self.collection)
            .field("staged", &self.staged)
            .field("delimiter", &self.delimiter)
            .field("selected", &self.selected)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl ValueList {
    /// Create an empty value list.
    pub fn new() -> Self {
        Self {
            collection: Vec::new(),
            staged: String::new(),
            delimiter: None,
            selected: 0,
            on_change: None,
        }
    }

    /// Create a value list derived from a raw delimited string.
    pub fn from_raw(raw: &str, delimiter: Option<&str>) -> Self {
        let mut list = Self::new();
        list.reset(raw, delimiter);
        list
    }

    /// Set the change notification callback.
    pub fn set_on_change(&mut self, callback: ChangeCallback) {
        self.on_change = Some(callback);
    }

    /// Rebuild the collection from a raw delimited string.
    ///
    /// Replaces the whole collection and discards any uncommitted
    /// staged text. Called whenever upstream values change, not only at
    /// construction. Does not fire the change callback; the consumer
    /// supplied the values.
    pub fn reset(&mut self, raw: &str, delimiter: Option<&str>) {
        self.delimiter = delimiter.map(|d| d.to_string());
        self.collection = split_values(raw, delimiter);
        self.staged.clear();
        self.selected = 0;
    }

    /// The current ordered collection.
    pub fn collection(&self) -> &[String] {
        &self.collection
    }

    /// The staged, not-yet-committed input text.
    pub fn staged(&self) -> &str {
        &self.staged
    }

    /// Replace the staged input text.
    pub fn set_staged(&mut self, text: impl Into<String>) {
        self.staged = text.into();
    }

    /// Index of the cursor within the collection.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Whether reorder controls should be offered.
    ///
    /// True for every length except exactly 1; a single element has
    /// nowhere to move, and an empty list shows the same (empty) chrome
    /// as a populated one.
    pub fn show_reorder_controls(&self) -> bool {
        self.collection.len() != 1
    }

    /// Append a value to the collection.
    ///
    /// A no-op when `text` is empty or whitespace-only. Otherwise the
    /// staged input is cleared, the value appended (duplicates allowed),
    /// and the change callback fired.
    pub fn add_value(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        self.staged.clear();
        self.collection.push(text.to_string());
        self.notify_change();
    }

    /// Commit the staged input as a new value.
    ///
    /// Equivalent to pressing Enter on the staged input line.
    pub fn commit_staged(&mut self) {
        let text = self.staged.clone();
        self.add_value(&text);
    }

    /// Replace the value at `index` in place.
    ///
    /// Out-of-range indices are rejected as a no-op returning `false`.
    /// Fires the change callback on success.
    pub fn change_value(&mut self, index: usize, text: &str) -> bool {
        if index >= self.collection.len() {
            debug!(index, len = self.collection.len(), "change_value out of range");
            return false;
        }

        self.collection[index] = text.to_string();
        self.notify_change();
        true
    }

    /// Remove the first occurrence equal to `value`.
    ///
    /// Absent values are a no-op returning `false` (no notification).
    pub fn remove_value(&mut self, value: &str) -> bool {
        let Some(pos) = self.collection.iter().position(|v| v == value) else {
            return false;
        };

        self.collection.remove(pos);
        if self.selected >= self.collection.len() && self.selected > 0 {
            self.selected -= 1;
        }
        self.notify_change();
        true
    }

    /// Move the element at `index` by `direction` positions.
    ///
    /// The target index wraps: past the end lands at 0, below 0 lands
    /// at the last index. Semantics are remove-at-index then
    /// insert-at-target, so moves of more than one position slide the
    /// intermediate elements by one rather than swapping. Out-of-range
    /// indices are a no-op returning `false`. Valid shifts always fire
    /// the change callback, even when the order is unchanged.
    pub fn shift(&mut self, direction: isize, index: usize) -> bool {
        let len = self.collection.len();
        if index >= len {
            debug!(index, len, "shift out of range");
            return false;
        }

        let future = wrapped_target(index, direction, len);
        let value = self.collection.remove(index);
        self.collection.insert(future, value);
        self.selected = future;
        self.notify_change();
        true
    }

    /// Handle keyboard input.
    ///
    /// Typing edits the staged input; Enter commits it. Up/Down move
    /// the cursor, Ctrl+Up/Ctrl+Down reorder, and Ctrl+D removes the
    /// value under the cursor. Returns `true` when the key was
    /// consumed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, KeyModifiers::NONE) => {
                self.commit_staged();
                true
            }
            (KeyCode::Backspace, KeyModifiers::NONE) => {
                self.staged.pop();
                true
            }
            (KeyCode::Up, KeyModifiers::CONTROL) => {
                if !self.collection.is_empty() {
                    self.shift(-1, self.selected);
                }
                true
            }
            (KeyCode::Down, KeyModifiers::CONTROL) => {
                if !self.collection.is_empty() {
                    self.shift(1, self.selected);
                }
                true
            }
            (KeyCode::Up, KeyModifiers::NONE) => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
                true
            }
            (KeyCode::Down, KeyModifiers::NONE) => {
                if !self.collection.is_empty() && self.selected < self.collection.len() - 1 {
                    self.selected += 1;
                }
                true
            }
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                if let Some(value) = self.collection.get(self.selected).cloned() {
                    self.remove_value(&value);
                }
                true
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.staged.push(c);
                true
            }
            _ => false,
        }
    }

    /// Fire the change callback with the current collection.
    fn notify_change(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.collection);
        }
    }

    /// Render the value list.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .title(" Watched Tags ")
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Staged input
                Constraint::Min(1),    // Values
                Constraint::Length(1), // Help text
            ])
            .split(inner);

        self.render_staged_input(frame, chunks[0]);
        self.render_values(frame, chunks[1]);
        self.render_help(frame, chunks[2]);
    }

    /// Render the staged input line.
    fn render_staged_input(&self, frame: &mut Frame, area: Rect) {
        let input_line = if self.staged.is_empty() {
            Line::from(Span::styled(
                "Type a value and press Enter...",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(vec![
                Span::styled("+ ", Style::default().fg(Color::Green)),
                Span::styled(&self.staged, Style::default().fg(Color::White)),
                Span::styled("▏", Style::default().fg(Color::Yellow)),
            ])
        };
        frame.render_widget(Paragraph::new(input_line), area);
    }

    /// Render the committed values.
    fn render_values(&self, frame: &mut Frame, area: Rect) {
        if self.collection.is_empty() {
            let empty_text =
                Paragraph::new("No values yet").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty_text, area);
            return;
        }

        let items: Vec<ListItem> = self
            .collection
            .iter()
            .map(|value| ListItem::new(format!("  {}", value)))
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.selected));

        frame.render_stateful_widget(list, area, &mut state);
    }

    /// Render the help text.
    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(": add  "),
            Span::styled("Ctrl-d", Style::default().fg(Color::Red)),
            Span::raw(": remove"),
        ];

        if self.show_reorder_controls() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled("Ctrl-↑/↓", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(": reorder"));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }
}

impl Default for ValueList {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a raw string into values on the delimiter (default newline),
/// dropping empty segments.
fn split_values(raw: &str, delimiter: Option<&str>) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    raw.split(delimiter.unwrap_or("\n"))
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
        .collect()
}

/// Compute the wrapped target index for a shift.
///
/// A target past the last index wraps to 0; below 0 wraps to the last
/// index. `len` must be non-zero.
fn wrapped_target(index: usize, direction: isize, len: usize) -> usize {
    let last = (len - 1) as isize;
    let future = index as isize + direction;

    if future > last {
        0
    } else if future < 0 {
        last as usize
    } else {
        future as usize
    }
}
