//! Client-side navigation.
//!
//! Tag selection resolves to a forum URL; the widget hands that URL to
//! a [`Navigator`] rather than performing I/O itself, so tests can
//! observe navigation without side effects.

use tracing::{info, warn};

use crate::api::Category;

/// Navigation collaborator.
///
/// Accepts a fully formed, site-relative URL and performs client-side
/// navigation. No return value; failures are the implementation's
/// concern.
pub trait Navigator {
    /// Navigate to the given site-relative URL (e.g. `/tag/rust`).
    fn route_to(&mut self, url: &str);
}

/// Navigator that opens URLs in the system browser.
#[derive(Debug)]
pub struct BrowserNavigator {
    /// Base URL of the forum the relative routes are joined onto.
    base_url: String,
}

impl BrowserNavigator {
    /// Create a navigator rooted at the given forum base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Navigator for BrowserNavigator {
    fn route_to(&mut self, url: &str) {
        let full = format!("{}{}", self.base_url.trim_end_matches('/'), url);
        info!(url = %full, "Opening in browser");
        if let Err(e) = open::that(&full) {
            warn!("Could not open browser for {}: {}", full, e);
        }
    }
}

/// Navigator that records routed URLs, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    /// URLs routed so far, in order.
    pub routed: Vec<String>,
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn route_to(&mut self, url: &str) {
        self.routed.push(url.to_string());
    }
}

/// Build the URL for a category and tag combination.
///
/// Mirrors the forum's route family:
/// - no category, no tag: `/`
/// - tag only: `/tag/<tag>`
/// - category only: `/c/<slug>/<id>`
/// - both: `/tags/c/<slug>/<id>/<tag>`
///
/// When subcategories are excluded, `/none` is appended to the category
/// segment.
pub fn category_tag_url(
    category: Option<&Category>,
    include_subcategories: bool,
    tag: Option<&str>,
) -> String {
    match (category, tag) {
        (None, None) => "/".to_string(),
        (None, Some(tag)) => format!("/tag/{}", tag),
        (Some(cat), tag) => {
            let none_part = if include_subcategories { "" } else { "/none" };
            match tag {
                Some(tag) => format!("/tags/c/{}/{}{}/{}", cat.slug, cat.id, none_part, tag),
                None => format!("/c/{}/{}{}", cat.slug, cat.id, none_part),
            }
        }
    }
}
