//! Wire types for the forum REST API.

use serde::{Deserialize, Serialize};

/// A single result from the tag search endpoint.
///
/// Returned by `GET /tags/filter/search.json`. Synonym tags carry a
/// `target_tag` naming the canonical tag they resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSearchResult {
    /// The tag identifier (also its name).
    pub id: String,
    /// Display text for the tag.
    pub text: String,
    /// Canonical tag this entry resolves to, when it is a synonym.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_tag: Option<String>,
    /// Number of topics carrying the tag.
    #[serde(default)]
    pub count: u64,
    /// Number of personal messages carrying the tag.
    #[serde(default)]
    pub pm_count: u64,
}

/// Response envelope for the tag search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSearchResponse {
    /// Matching tags.
    #[serde(default)]
    pub results: Vec<TagSearchResult>,
}

/// Subset of the `/site.json` payload we consume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Site {
    /// Site-wide top tags, ordered by popularity.
    #[serde(default)]
    pub top_tags: Vec<String>,
    /// Top tags for the current category context, when one is active.
    #[serde(default)]
    pub category_top_tags: Vec<String>,
}

impl Site {
    /// Ranked tags for the active context: category-scoped top tags
    /// when a category is active and the site provides them, otherwise
    /// the site-wide top tags.
    pub fn ranked_tags(&self, category_active: bool) -> &[String] {
        if category_active && !self.category_top_tags.is_empty() {
            &self.category_top_tags
        } else {
            &self.top_tags
        }
    }
}

/// A forum category, as much of it as routing needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Numeric category id.
    pub id: u64,
    /// URL slug.
    pub slug: String,
    /// Human-readable name.
    pub name: String,
}

impl Category {
    /// Create a category reference.
    pub fn new(id: u64, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            name: name.into(),
        }
    }
}
