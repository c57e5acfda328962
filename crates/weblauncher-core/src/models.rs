//! Data models for WebLauncher
//!
//! A `Site` is one persisted website shortcut. Categories are plain strings
//! attached to sites; a few values carry special meaning for front-ends.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Wildcard filter value: matches every site, never stored on a site
pub const ALL_CATEGORY: &str = "全部";

/// Default bucket for sites added by the user
pub const MINE_CATEGORY: &str = "我的";

/// Category substituted when a stored site carries none
pub const OTHER_CATEGORY: &str = "其他";

/// Categories offered by front-ends, in display order
pub const PRESET_CATEGORIES: &[&str] = &[
    MINE_CATEGORY,
    ALL_CATEGORY,
    "社交",
    "购物",
    "视频",
    "音乐",
    "技术",
    "新闻",
    "工具",
    "教育",
    "直播",
    OTHER_CATEGORY,
];

/// Timestamp format used for `created_at`
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A saved website shortcut
///
/// Field order here is the key order written to disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Site {
    /// Unique identifier within the store
    #[serde(default)]
    pub id: String,
    /// Display label
    pub name: String,
    /// Address, normally carrying an explicit http(s) scheme
    pub url: String,
    /// Free-form category label
    #[serde(default = "default_category")]
    pub category: String,
    /// Local creation time; absent on seeded defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Site {
    /// Create a site without a creation timestamp (used for seed data)
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            category: category.into(),
            created_at: None,
        }
    }

    /// Stamp the site with the current local time
    pub fn with_created_now(mut self) -> Self {
        self.created_at = Some(Local::now().format(CREATED_AT_FORMAT).to_string());
        self
    }

    /// Case-insensitive substring match against name or url
    ///
    /// `needle` must already be lowercase.
    pub fn matches_keyword(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.url.to_lowercase().contains(needle)
    }
}

fn default_category() -> String {
    OTHER_CATEGORY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_new_has_no_timestamp() {
        let site = Site::new("tech_1", "GitHub", "https://github.com", "技术");
        assert_eq!(site.id, "tech_1");
        assert!(site.created_at.is_none());
    }

    #[test]
    fn test_with_created_now_format() {
        let site = Site::new("x", "X", "https://x.com", "我的").with_created_now();
        let stamp = site.created_at.unwrap();
        assert!(NaiveDateTime::parse_from_str(&stamp, CREATED_AT_FORMAT).is_ok());
    }

    #[test]
    fn test_serialize_omits_missing_timestamp() {
        let site = Site::new("social_1", "微博", "https://weibo.com", "社交");
        let json = serde_json::to_string(&site).unwrap();
        assert_eq!(
            json,
            r#"{"id":"social_1","name":"微博","url":"https://weibo.com","category":"社交"}"#
        );
    }

    #[test]
    fn test_missing_category_defaults_to_other() {
        let site: Site =
            serde_json::from_str(r#"{"id":"a","name":"A","url":"https://a.com"}"#).unwrap();
        assert_eq!(site.category, OTHER_CATEGORY);
    }

    #[test]
    fn test_matches_keyword() {
        let site = Site::new("t", "GitHub", "https://github.com", "技术");
        assert!(site.matches_keyword("git"));
        assert!(site.matches_keyword("hub"));
        assert!(site.matches_keyword(".com"));
        assert!(!site.matches_keyword("gitlab"));
    }

    #[test]
    fn test_presets_contain_distinguished_values() {
        assert!(PRESET_CATEGORIES.contains(&ALL_CATEGORY));
        assert!(PRESET_CATEGORIES.contains(&MINE_CATEGORY));
        assert!(PRESET_CATEGORIES.contains(&OTHER_CATEGORY));
    }
}
