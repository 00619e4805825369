//! Application settings configuration.

use serde::{Deserialize, Serialize};

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Maximum number of results requested from the tag search endpoint.
    pub max_tag_search_results: u32,
    /// Sort the composed tag list alphabetically instead of by rank.
    pub tags_sort_alphabetically: bool,
    /// Category display style, mirrored into the tag drop's CSS-facing
    /// classification.
    pub category_style: String,
    /// Pipe-delimited list of watched tags, edited in the watched tags
    /// panel and persisted on exit.
    #[serde(default)]
    pub watched_tags: String,
    /// Terminal event poll interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_tag_search_results: 5,
            tags_sort_alphabetically: false,
            category_style: "bullet".to_string(),
            watched_tags: String::new(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.max_tag_search_results, 5);
        assert!(!settings.tags_sort_alphabetically);
        assert_eq!(settings.category_style, "bullet");
        assert!(settings.watched_tags.is_empty());
        assert_eq!(settings.tick_rate_ms, 100);
    }

    #[test]
    fn test_optional_fields_default_when_missing() {
        let parsed: Settings = toml::from_str(
            "max_tag_search_results = 5\ntags_sort_alphabetically = false\ncategory_style = \"bullet\"",
        )
        .unwrap();
        assert!(parsed.watched_tags.is_empty());
        assert_eq!(parsed.tick_rate_ms, 100);
    }

    #[test]
    fn test_settings_roundtrip_toml() {
        let settings = Settings {
            max_tag_search_results: 10,
            tags_sort_alphabetically: true,
            category_style: "box".to_string(),
            watched_tags: "rust|tokio".to_string(),
            tick_rate_ms: 50,
        };

        let serialized = toml::to_string(&settings).unwrap();
        let parsed: Settings = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.max_tag_search_results, 10);
        assert!(parsed.tags_sort_alphabetically);
        assert_eq!(parsed.category_style, "box");
        assert_eq!(parsed.watched_tags, "rust|tokio");
        assert_eq!(parsed.tick_rate_ms, 50);
    }
}
