//! Tag selection dropdown component.
//!
//! Composes its option list from synthetic shortcuts ("no tags" /
//! "all tags") plus the ranked top tags for the active category
//! context, supports asynchronous text search against the forum's tag
//! search endpoint, and resolves a selection into a navigation URL.
//!
//! Searches are sequence-stamped: results that arrive for anything but
//! the most recently issued query are dropped, so rapid typing can
//! never show stale results.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::debug;

use crate::api::{Category, TagSearchResult};
use crate::config::Settings;
use crate::routing::{category_tag_url, Navigator};
use crate::ui::theme::theme;

/// Sentinel identifier for the "no tags" shortcut entry.
pub const NO_TAG_ID: &str = "no-tags";
/// Sentinel identifier for the "all tags" shortcut entry.
pub const ALL_TAGS_ID: &str = "all-tags";
/// Internal tag value meaning "topics with no tags".
pub const NONE_TAG_ID: &str = "none";

/// Option count at which the filter input is offered.
const FILTERABLE_THRESHOLD: usize = 15;

/// A single display option in the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDropItem {
    /// Identifier: a tag name or a sentinel.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Canonical tag a synonym resolves to; selection uses this over
    /// the raw id when present.
    pub target_tag_id: Option<String>,
    /// Topic count, for search results.
    pub count: Option<u64>,
    /// Personal message count, for search results.
    pub pm_count: Option<u64>,
}

impl TagDropItem {
    /// Create a plain display item with no search metadata.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target_tag_id: None,
            count: None,
            pm_count: None,
        }
    }
}

/// Localized labels for the shortcut entries.
#[derive(Debug, Clone)]
pub struct TagDropLabels {
    /// Label for the "no tags" shortcut.
    pub no_tags: String,
    /// Label for the "all tags" shortcut.
    pub all_tags: String,
}

impl Default for TagDropLabels {
    fn default() -> Self {
        Self {
            no_tags: "no tags".to_string(),
            all_tags: "all tags".to_string(),
        }
    }
}

/// Configuration for the tag drop, built from injected settings.
#[derive(Debug, Clone)]
pub struct TagDropConfig {
    /// Maximum results requested per search.
    pub max_search_results: u32,
    /// Sort ranked tags alphabetically before composing options.
    pub sort_alphabetically: bool,
    /// Category display style, folded into the CSS-facing class.
    pub category_style: String,
    /// Shortcut labels.
    pub labels: TagDropLabels,
}

impl TagDropConfig {
    /// Build a config from application settings with default labels.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_search_results: settings.max_tag_search_results,
            sort_alphabetically: settings.tags_sort_alphabetically,
            category_style: settings.category_style.clone(),
            labels: TagDropLabels::default(),
        }
    }
}

/// Outcome of a search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchDispatch {
    /// Empty query: the current display options, returned synchronously.
    Immediate(Vec<TagDropItem>),
    /// Non-empty query: a request for the owner to execute.
    Pending {
        /// The query text.
        query: String,
        /// Maximum results to request.
        limit: u32,
        /// Sequence stamp; hand it back to `apply_search_results`.
        seq: u64,
    },
}

/// Action resulting from tag drop input, handled by the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagDropAction {
    /// Execute a tag search and deliver the stamped results back.
    Search {
        /// The query text.
        query: String,
        /// Maximum results to request.
        limit: u32,
        /// Sequence stamp.
        seq: u64,
    },
    /// The user picked an option; resolve it via `on_change`.
    Select {
        /// Identifier of the picked option.
        id: String,
        /// The picked item, when one backs the identifier.
        item: Option<TagDropItem>,
    },
    /// The dropdown was closed without selection.
    Cancel,
}

/// Tag selection dropdown.
///
/// Collapsed it shows the current selection; expanded it shows the
/// composed option list, filterable by typing. The parent executes
/// `Search` actions asynchronously and feeds results back through
/// [`TagDrop::apply_search_results`].
#[derive(Debug)]
pub struct TagDrop {
    /// Current selection: a tag name, the "none" sentinel, or absent
    /// for "all tags".
    tag_id: Option<String>,
    /// Ranked top tags for the active category context.
    top_tags: Vec<String>,
    /// Active category context, if any.
    category: Option<Category>,
    /// Whether subcategories are excluded from navigation.
    no_subcategories: bool,
    /// Widget configuration.
    config: TagDropConfig,
    /// Whether the dropdown is expanded.
    expanded: bool,
    /// Highlighted index in the expanded list.
    highlighted: usize,
    /// Options currently displayed in the expanded list.
    options: Vec<TagDropItem>,
    /// Filter text typed by the user.
    filter: String,
    /// Whether a search is in flight.
    loading: bool,
    /// Sequence of the most recently issued search.
    search_seq: u64,
}

impl TagDrop {
    /// Create a collapsed tag drop with no selection.
    pub fn new(config: TagDropConfig) -> Self {
        Self {
            tag_id: None,
            top_tags: Vec::new(),
            category: None,
            no_subcategories: false,
            config,
            expanded: false,
            highlighted: 0,
            options: Vec::new(),
            filter: String::new(),
            loading: false,
            search_seq: 0,
        }
    }

    /// The current tag selection.
    pub fn tag_id(&self) -> Option<&str> {
        self.tag_id.as_deref()
    }

    /// Set the current tag selection.
    pub fn set_tag_id(&mut self, tag_id: Option<String>) {
        self.tag_id = tag_id;
    }

    /// Replace the ranked top tags.
    pub fn set_top_tags(&mut self, top_tags: Vec<String>) {
        self.top_tags = top_tags;
    }

    /// Set the active category context.
    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    /// The active category context.
    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    /// Set whether subcategories are excluded from navigation.
    pub fn set_no_subcategories(&mut self, no_subcategories: bool) {
        self.no_subcategories = no_subcategories;
    }

    /// Whether the dropdown is expanded.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether a search is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The options currently displayed.
    pub fn options(&self) -> &[TagDropItem] {
        &self.options
    }

    /// The filter text typed so far.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Synthetic shortcut entries derived from the current selection.
    ///
    /// "no tags" is offered unless it is already selected; "all tags"
    /// is offered whenever any selection is active. Order: no-tags
    /// first.
    pub fn shortcuts(&self) -> Vec<TagDropItem> {
        let mut shortcuts = Vec::new();

        if self.tag_id.as_deref() != Some(NONE_TAG_ID) {
            shortcuts.push(TagDropItem::new(NO_TAG_ID, &self.config.labels.no_tags));
        }

        if self.tag_id.is_some() {
            shortcuts.push(TagDropItem::new(ALL_TAGS_ID, &self.config.labels.all_tags));
        }

        shortcuts
    }

    /// The composed display options: shortcuts followed by the ranked
    /// tags, alphabetized when the setting asks for it.
    pub fn content(&self) -> Vec<TagDropItem> {
        let mut content = self.shortcuts();

        if self.config.sort_alphabetically && !self.top_tags.is_empty() {
            let mut sorted = self.top_tags.clone();
            sorted.sort();
            content.extend(sorted.iter().map(|tag| TagDropItem::new(tag, tag)));
        } else {
            content.extend(self.top_tags.iter().map(|tag| TagDropItem::new(tag, tag)));
        }

        content
    }

    /// Run a search for `query`.
    ///
    /// An empty query yields the current display options synchronously
    /// with no network involvement. A non-empty query puts the widget
    /// into its loading state and returns a stamped request for the
    /// owner to execute.
    pub fn search(&mut self, query: &str) -> SearchDispatch {
        self.filter = query.to_string();

        if query.is_empty() {
            self.options = self.content();
            self.highlighted = 0;
            self.loading = false;
            return SearchDispatch::Immediate(self.options.clone());
        }

        self.search_seq += 1;
        self.loading = true;
        SearchDispatch::Pending {
            query: query.to_string(),
            limit: self.config.max_search_results,
            seq: self.search_seq,
        }
    }

    /// Apply results for a previously issued search.
    ///
    /// Results stamped with anything but the latest sequence are stale
    /// and dropped; returns whether the results were applied.
    pub fn apply_search_results(&mut self, seq: u64, results: Vec<TagSearchResult>) -> bool {
        if seq != self.search_seq {
            debug!(seq, latest = self.search_seq, "Dropping stale search results");
            return false;
        }

        self.options = transform_results(results);
        self.highlighted = 0;
        self.loading = false;
        true
    }

    /// Clear the loading state after a failed search.
    ///
    /// Stale failures are ignored the same way stale results are.
    pub fn apply_search_failure(&mut self, seq: u64) {
        if seq == self.search_seq {
            self.loading = false;
        }
    }

    /// Resolve a selected identifier to the internal tag value.
    ///
    /// The "no tags" sentinel maps to the "none" tag value, the "all
    /// tags" sentinel maps to absent, and an item carrying a target tag
    /// overrides the raw identifier.
    pub fn resolve_selection(id: &str, item: Option<&TagDropItem>) -> Option<String> {
        if id == NO_TAG_ID {
            Some(NONE_TAG_ID.to_string())
        } else if id == ALL_TAGS_ID {
            None
        } else if let Some(target) = item.and_then(|i| i.target_tag_id.clone()) {
            Some(target)
        } else {
            Some(id.to_string())
        }
    }

    /// Handle a completed selection.
    ///
    /// Resolves the identifier, updates the current selection, builds
    /// the navigation URL from the category context, the
    /// subcategory-inclusion flag, and the resolved tag, and hands it
    /// to the navigator.
    pub fn on_change(&mut self, id: &str, item: Option<&TagDropItem>, navigator: &mut dyn Navigator) {
        let tag_id = Self::resolve_selection(id, item);

        debug!(?tag_id, "Tag selection changed");
        self.tag_id = tag_id;
        self.collapse();

        let url = category_tag_url(
            self.category.as_ref(),
            !self.no_subcategories,
            self.tag_id.as_deref(),
        );
        navigator.route_to(&url);
    }

    /// CSS-facing classification of the current selection.
    pub fn tag_class(&self) -> String {
        match &self.tag_id {
            Some(tag) => format!("tag-{}", tag),
            None => "tag_all".to_string(),
        }
    }

    /// The display item shown in the collapsed header.
    pub fn header_item(&self) -> TagDropItem {
        match self.tag_id.as_deref() {
            Some(NONE_TAG_ID) => TagDropItem::new(NO_TAG_ID, &self.config.labels.no_tags),
            Some(tag) => TagDropItem::new(tag, tag),
            None => TagDropItem::new(ALL_TAGS_ID, &self.config.labels.all_tags),
        }
    }

    /// Whether the filter input is offered.
    ///
    /// Small option lists are navigated directly; the filter appears
    /// once the composed list is large, or as soon as a search has been
    /// typed.
    pub fn filterable(&self) -> bool {
        self.options.len() >= FILTERABLE_THRESHOLD || !self.filter.is_empty()
    }

    /// Expand the dropdown, refreshing options from the composed list.
    pub fn expand(&mut self) {
        self.filter.clear();
        self.options = self.content();
        self.highlighted = 0;
        self.loading = false;
        self.expanded = true;
    }

    /// Collapse the dropdown and clear transient search state.
    pub fn collapse(&mut self) {
        self.expanded = false;
        self.filter.clear();
        self.loading = false;
    }

    /// Handle keyboard input.
    ///
    /// Collapsed: Enter expands. Expanded: j/k or arrows navigate,
    /// typing filters (each keystroke issues a search), Enter selects,
    /// Esc cancels. Returns an action for the parent to execute.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<TagDropAction> {
        if !self.expanded {
            return match (key.code, key.modifiers) {
                (KeyCode::Enter, KeyModifiers::NONE) => {
                    self.expand();
                    None
                }
                _ => None,
            };
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                if !self.options.is_empty() && self.highlighted < self.options.len() - 1 {
                    self.highlighted += 1;
                }
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                if self.highlighted > 0 {
                    self.highlighted -= 1;
                }
                None
            }
            (KeyCode::Enter, KeyModifiers::NONE) => {
                let item = self.options.get(self.highlighted).cloned();
                item.map(|item| {
                    self.expanded = false;
                    TagDropAction::Select {
                        id: item.id.clone(),
                        item: Some(item),
                    }
                })
            }
            (KeyCode::Esc, _) => {
                self.collapse();
                Some(TagDropAction::Cancel)
            }
            (KeyCode::Backspace, KeyModifiers::NONE) => {
                if self.filter.is_empty() {
                    return None;
                }
                let mut filter = self.filter.clone();
                filter.pop();
                match self.search(&filter) {
                    SearchDispatch::Immediate(_) => None,
                    SearchDispatch::Pending { query, limit, seq } => {
                        Some(TagDropAction::Search { query, limit, seq })
                    }
                }
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT)
                if c.is_alphanumeric() || c == '-' || c == '_' =>
            {
                let filter = format!("{}{}", self.filter, c);
                match self.search(&filter) {
                    SearchDispatch::Immediate(_) => None,
                    SearchDispatch::Pending { query, limit, seq } => {
                        Some(TagDropAction::Search { query, limit, seq })
                    }
                }
            }
            _ => None,
        }
    }

    /// Render the collapsed header.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();

        let header = self.header_item();
        let caret = if self.expanded { "▼" } else { "▶" };

        let (text_style, border_style) = if focused {
            (
                Style::default().fg(t.accent),
                Style::default().fg(t.border_focused),
            )
        } else {
            (Style::default().fg(t.fg), Style::default().fg(t.border))
        };

        let block = Block::default()
            .title(format!(" Tags [{}] ", self.tag_class()))
            .borders(Borders::ALL)
            .border_style(border_style);

        let paragraph = Paragraph::new(format!("{} {}", header.name, caret))
            .style(text_style)
            .block(block);

        frame.render_widget(paragraph, area);
    }

    /// Render the expanded option list as an overlay below the header.
    pub fn render_expanded_list(&self, frame: &mut Frame, header_area: Rect, screen_area: Rect) {
        if !self.expanded {
            return;
        }

        let t = theme();

        let max_visible = 10;
        let list_height = (self.options.len().clamp(1, max_visible) + 3) as u16;

        // Overlap the header's bottom border by one row. The header can
        // degenerate to zero height on a tiny terminal, so the overlay
        // origin and height both clamp against the screen.
        let top = (header_area.y + header_area.height).saturating_sub(1);
        let available = screen_area.height.saturating_sub(top);
        if available == 0 {
            return;
        }

        let list_area = Rect::new(
            header_area.x,
            top,
            header_area.width,
            list_height.min(available),
        );

        frame.render_widget(Clear, list_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border_focused));

        let inner = block.inner(list_area);
        frame.render_widget(block, list_area);

        // Only the borders fit; nothing left to draw inside.
        if inner.height == 0 {
            return;
        }

        let mut lines = Vec::new();

        if self.filterable() || !self.filter.is_empty() {
            let filter_line = if self.filter.is_empty() {
                Line::from(Span::styled(
                    "Type to search tags...",
                    Style::default().fg(t.input_placeholder),
                ))
            } else {
                Line::from(vec![
                    Span::styled("/", Style::default().fg(t.accent)),
                    Span::styled(&self.filter, Style::default().fg(t.input_fg)),
                ])
            };
            lines.push(filter_line);
        }

        if !lines.is_empty() {
            let filter_area = Rect::new(inner.x, inner.y, inner.width, 1);
            frame.render_widget(Paragraph::new(lines), filter_area);
        }

        let list_inner = Rect::new(
            inner.x,
            inner.y + 1,
            inner.width,
            inner.height.saturating_sub(1),
        );

        if self.loading {
            let loading = Paragraph::new("Searching...").style(Style::default().fg(t.input_placeholder));
            frame.render_widget(loading, list_inner);
            return;
        }

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|option| {
                let mut spans = vec![Span::raw(option.name.clone())];
                if let Some(count) = option.count {
                    spans.push(Span::styled(
                        format!(" x{}", count),
                        Style::default().fg(t.input_placeholder),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(t.bg)
                    .bg(t.highlight)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.highlighted));

        frame.render_stateful_widget(list, list_inner, &mut state);
    }
}

/// Transform raw search results into display items.
///
/// Results are sorted by identifier ascending; the target tag falls
/// back to the result's own id when no explicit synonym target exists.
fn transform_results(mut results: Vec<TagSearchResult>) -> Vec<TagDropItem> {
    results.sort_by(|a, b| a.id.cmp(&b.id));

    results
        .into_iter()
        .map(|r| {
            let target = r.target_tag.unwrap_or_else(|| r.id.clone());
            TagDropItem {
                name: r.text,
                id: r.id,
                target_tag_id: Some(target),
                count: Some(r.count),
                pm_count: Some(r.pm_count),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RecordingNavigator;

    fn tag_drop() -> TagDrop {
        TagDrop::new(TagDropConfig::from_settings(&Settings::default()))
    }

    fn result(id: &str, target: Option<&str>) -> TagSearchResult {
        TagSearchResult {
            id: id.to_string(),
            text: id.to_string(),
            target_tag: target.map(|t| t.to_string()),
            count: 1,
            pm_count: 0,
        }
    }

    #[test]
    fn test_shortcuts_with_no_selection() {
        let drop = tag_drop();
        // No selection: only the "no tags" shortcut.
        let shortcuts = drop.shortcuts();
        assert_eq!(shortcuts.len(), 1);
        assert_eq!(shortcuts[0].id, NO_TAG_ID);
    }

    #[test]
    fn test_shortcuts_with_none_selected() {
        let mut drop = tag_drop();
        drop.set_tag_id(Some(NONE_TAG_ID.to_string()));

        let shortcuts = drop.shortcuts();
        assert_eq!(shortcuts.len(), 1);
        assert_eq!(shortcuts[0].id, ALL_TAGS_ID);
    }

    #[test]
    fn test_shortcuts_with_tag_selected() {
        let mut drop = tag_drop();
        drop.set_tag_id(Some("rust".to_string()));

        let shortcuts = drop.shortcuts();
        assert_eq!(shortcuts.len(), 2);
        assert_eq!(shortcuts[0].id, NO_TAG_ID);
        assert_eq!(shortcuts[1].id, ALL_TAGS_ID);
    }

    #[test]
    fn test_content_preserves_rank_order_by_default() {
        let mut drop = tag_drop();
        drop.set_top_tags(vec!["zeta".to_string(), "alpha".to_string()]);

        let content = drop.content();
        let names: Vec<&str> = content.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(names, vec![NO_TAG_ID, "zeta", "alpha"]);
    }

    #[test]
    fn test_content_sorts_alphabetically_when_enabled() {
        let mut drop = tag_drop();
        drop.config.sort_alphabetically = true;
        drop.set_top_tags(vec!["zeta".to_string(), "alpha".to_string()]);

        let content = drop.content();
        let names: Vec<&str> = content.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(names, vec![NO_TAG_ID, "alpha", "zeta"]);
    }

    #[test]
    fn test_content_with_no_top_tags_is_just_shortcuts() {
        let drop = tag_drop();
        let content = drop.content();
        assert_eq!(content.len(), drop.shortcuts().len());
    }

    #[test]
    fn test_empty_search_is_synchronous() {
        let mut drop = tag_drop();
        drop.set_top_tags(vec!["rust".to_string()]);

        match drop.search("") {
            SearchDispatch::Immediate(options) => {
                assert_eq!(options.len(), 2); // no-tags shortcut + rust
                assert!(options.iter().any(|o| o.id == "rust"));
            }
            SearchDispatch::Pending { .. } => panic!("empty query must not hit the network"),
        }
        assert!(!drop.is_loading());
    }

    #[test]
    fn test_nonempty_search_issues_stamped_request() {
        let mut drop = tag_drop();

        match drop.search("abc") {
            SearchDispatch::Pending { query, limit, seq } => {
                assert_eq!(query, "abc");
                assert_eq!(limit, Settings::default().max_tag_search_results);
                assert_eq!(seq, 1);
            }
            SearchDispatch::Immediate(_) => panic!("non-empty query must dispatch a request"),
        }
        assert!(drop.is_loading());
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut drop = tag_drop();

        let first = drop.search("a");
        let SearchDispatch::Pending { seq: seq1, .. } = first else {
            panic!("expected pending search");
        };
        let second = drop.search("ab");
        let SearchDispatch::Pending { seq: seq2, .. } = second else {
            panic!("expected pending search");
        };
        assert!(seq2 > seq1);

        // Older response arrives after the newer request was issued.
        assert!(!drop.apply_search_results(seq1, vec![result("stale", None)]));
        assert!(drop.options().is_empty());
        assert!(drop.is_loading());

        assert!(drop.apply_search_results(seq2, vec![result("fresh", None)]));
        assert_eq!(drop.options().len(), 1);
        assert_eq!(drop.options()[0].id, "fresh");
        assert!(!drop.is_loading());
    }

    #[test]
    fn test_search_failure_clears_loading_only_for_latest() {
        let mut drop = tag_drop();
        drop.search("a");
        drop.search("ab");

        drop.apply_search_failure(1);
        assert!(drop.is_loading());

        drop.apply_search_failure(2);
        assert!(!drop.is_loading());
    }

    #[test]
    fn test_transform_sorts_by_id_and_fills_target() {
        let results = vec![
            result("zig", None),
            result("ada", Some("ada-lang")),
        ];

        let items = transform_results(results);
        assert_eq!(items[0].id, "ada");
        assert_eq!(items[0].target_tag_id.as_deref(), Some("ada-lang"));
        assert_eq!(items[1].id, "zig");
        assert_eq!(items[1].target_tag_id.as_deref(), Some("zig"));
        assert_eq!(items[0].count, Some(1));
        assert_eq!(items[0].pm_count, Some(0));
    }

    #[test]
    fn test_resolve_no_tags_sentinel() {
        assert_eq!(
            TagDrop::resolve_selection(NO_TAG_ID, None),
            Some(NONE_TAG_ID.to_string())
        );
    }

    #[test]
    fn test_resolve_all_tags_sentinel() {
        assert_eq!(TagDrop::resolve_selection(ALL_TAGS_ID, None), None);
    }

    #[test]
    fn test_resolve_target_tag_override() {
        let mut item = TagDropItem::new("rs", "rs");
        item.target_tag_id = Some("rust".to_string());

        assert_eq!(
            TagDrop::resolve_selection("rs", Some(&item)),
            Some("rust".to_string())
        );
    }

    #[test]
    fn test_resolve_plain_tag() {
        assert_eq!(
            TagDrop::resolve_selection("rust", None),
            Some("rust".to_string())
        );
    }

    #[test]
    fn test_on_change_routes_to_tag_url() {
        let mut drop = tag_drop();
        let mut nav = RecordingNavigator::default();

        drop.on_change("rust", None, &mut nav);

        assert_eq!(drop.tag_id(), Some("rust"));
        assert_eq!(nav.routed, vec!["/tag/rust"]);
    }

    #[test]
    fn test_on_change_no_tags_routes_to_none() {
        let mut drop = tag_drop();
        let mut nav = RecordingNavigator::default();

        drop.on_change(NO_TAG_ID, None, &mut nav);

        assert_eq!(drop.tag_id(), Some(NONE_TAG_ID));
        assert_eq!(nav.routed, vec!["/tag/none"]);
    }

    #[test]
    fn test_on_change_all_tags_clears_selection() {
        let mut drop = tag_drop();
        drop.set_tag_id(Some("rust".to_string()));
        let mut nav = RecordingNavigator::default();

        drop.on_change(ALL_TAGS_ID, None, &mut nav);

        assert_eq!(drop.tag_id(), None);
        assert_eq!(nav.routed, vec!["/"]);
    }

    #[test]
    fn test_on_change_with_category_context() {
        let mut drop = tag_drop();
        drop.set_category(Some(Category::new(7, "support", "Support")));
        let mut nav = RecordingNavigator::default();

        drop.on_change("rust", None, &mut nav);
        assert_eq!(nav.routed, vec!["/tags/c/support/7/rust"]);

        drop.set_no_subcategories(true);
        drop.on_change("rust", None, &mut nav);
        assert_eq!(nav.routed[1], "/tags/c/support/7/none/rust");
    }

    #[test]
    fn test_tag_class() {
        let mut drop = tag_drop();
        assert_eq!(drop.tag_class(), "tag_all");

        drop.set_tag_id(Some("rust".to_string()));
        assert_eq!(drop.tag_class(), "tag-rust");
    }

    #[test]
    fn test_header_item_variants() {
        let mut drop = tag_drop();
        assert_eq!(drop.header_item().id, ALL_TAGS_ID);

        drop.set_tag_id(Some(NONE_TAG_ID.to_string()));
        assert_eq!(drop.header_item().id, NO_TAG_ID);

        drop.set_tag_id(Some("rust".to_string()));
        let header = drop.header_item();
        assert_eq!(header.id, "rust");
        assert_eq!(header.name, "rust");
    }

    #[test]
    fn test_enter_expands_with_composed_options() {
        let mut drop = tag_drop();
        drop.set_top_tags(vec!["rust".to_string()]);

        let action = drop.handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert!(action.is_none());
        assert!(drop.is_expanded());
        assert_eq!(drop.options().len(), 2);
    }

    #[test]
    fn test_navigation_and_select() {
        let mut drop = tag_drop();
        drop.set_top_tags(vec!["rust".to_string()]);
        drop.expand();

        drop.handle_input(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE));
        let action = drop.handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        match action {
            Some(TagDropAction::Select { id, item }) => {
                assert_eq!(id, "rust");
                assert!(item.is_some());
            }
            other => panic!("expected select, got {:?}", other),
        }
        assert!(!drop.is_expanded());
    }

    #[test]
    fn test_navigation_clamps_at_bounds() {
        let mut drop = tag_drop();
        drop.set_top_tags(vec!["a".to_string(), "b".to_string()]);
        drop.expand();

        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        drop.handle_input(up);
        assert_eq!(drop.highlighted, 0);

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        for _ in 0..10 {
            drop.handle_input(down);
        }
        assert_eq!(drop.highlighted, drop.options().len() - 1);
    }

    #[test]
    fn test_esc_cancels() {
        let mut drop = tag_drop();
        drop.expand();

        let action = drop.handle_input(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));

        assert_eq!(action, Some(TagDropAction::Cancel));
        assert!(!drop.is_expanded());
    }

    #[test]
    fn test_typing_issues_search_per_keystroke() {
        let mut drop = tag_drop();
        drop.expand();

        let action = drop.handle_input(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        match action {
            Some(TagDropAction::Search { query, seq, .. }) => {
                assert_eq!(query, "a");
                assert_eq!(seq, 1);
            }
            other => panic!("expected search, got {:?}", other),
        }

        let action = drop.handle_input(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE));
        match action {
            Some(TagDropAction::Search { query, seq, .. }) => {
                assert_eq!(query, "ab");
                assert_eq!(seq, 2);
            }
            other => panic!("expected search, got {:?}", other),
        }
    }

    #[test]
    fn test_backspace_to_empty_restores_composed_options() {
        let mut drop = tag_drop();
        drop.set_top_tags(vec!["rust".to_string()]);
        drop.expand();

        drop.handle_input(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        assert!(drop.is_loading());

        let action = drop.handle_input(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));

        assert!(action.is_none());
        assert!(!drop.is_loading());
        assert_eq!(drop.options().len(), 2);
    }

    #[test]
    fn test_backspace_on_empty_filter_is_noop() {
        let mut drop = tag_drop();
        drop.expand();

        let action = drop.handle_input(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert!(action.is_none());
    }

    #[test]
    fn test_input_ignored_when_collapsed() {
        let mut drop = tag_drop();

        let action = drop.handle_input(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        assert!(action.is_none());
        assert!(drop.filter().is_empty());
    }

    #[test]
    fn test_filterable_threshold() {
        let mut drop = tag_drop();
        assert!(!drop.filterable());

        drop.set_top_tags((0..20).map(|i| format!("tag-{i:02}")).collect());
        drop.expand();
        assert!(drop.filterable());
    }

    #[test]
    fn test_filterable_once_typing_started() {
        let mut drop = tag_drop();
        drop.expand();
        drop.handle_input(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        assert!(drop.filterable());
    }

    #[test]
    fn test_expanded_list_renders_on_tiny_terminal() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let mut drop = tag_drop();
        drop.set_top_tags(vec!["rust".to_string(), "tokio".to_string()]);
        drop.expand();

        // A terminal too short for the layout leaves the header with
        // zero height; the overlay must still render without panicking.
        let backend = TestBackend::new(12, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let screen = frame.area();
                let header = Rect::new(0, 0, screen.width, 0);
                drop.render(frame, header, true);
                drop.render_expanded_list(frame, header, screen);
            })
            .unwrap();
    }

    #[test]
    fn test_expanded_list_skipped_when_no_room_below() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let mut drop = tag_drop();
        drop.set_top_tags(vec!["rust".to_string()]);
        drop.expand();

        let backend = TestBackend::new(12, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let screen = frame.area();
                // Header bottom landing past the last screen row.
                let header = Rect::new(0, 0, screen.width, screen.height + 1);
                drop.render_expanded_list(frame, header, screen);
            })
            .unwrap();
    }
}
