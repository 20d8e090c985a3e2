//! `[query]` section configuration.
//!
//! Presentation limits for search snippets, tag clouds and timelines.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[query]` section in folio.toml
///
/// # Example
/// ```toml
/// [query]
/// snippet_context = 100   # characters on each side of a body match
/// visible_tags = 4        # tags shown before "show all"
/// visible_days = 4        # timeline days shown before expanding
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    /// Characters of context around a search match in body snippets
    #[serde(default = "defaults::query::snippet_context")]
    #[educe(Default = defaults::query::snippet_context())]
    pub snippet_context: usize,

    /// Tags in the collapsed tag cloud
    #[serde(default = "defaults::query::visible_tags")]
    #[educe(Default = defaults::query::visible_tags())]
    pub visible_tags: usize,

    /// Days in the collapsed project timeline
    #[serde(default = "defaults::query::visible_days")]
    #[educe(Default = defaults::query::visible_days())]
    pub visible_days: usize,

    /// Logs previewed for the featured project
    #[serde(default = "defaults::query::featured_logs")]
    #[educe(Default = defaults::query::featured_logs())]
    pub featured_logs: usize,

    /// Related posts previewed for the featured project
    #[serde(default = "defaults::query::featured_posts")]
    #[educe(Default = defaults::query::featured_posts())]
    pub featured_posts: usize,

    /// Summary preview length in list views
    #[serde(default = "defaults::query::summary_len")]
    #[educe(Default = defaults::query::summary_len())]
    pub summary_len: usize,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_query_defaults() {
        let config: SiteConfig = toml::from_str("[query]").unwrap();

        assert_eq!(config.query.snippet_context, 100);
        assert_eq!(config.query.visible_tags, 4);
        assert_eq!(config.query.visible_days, 4);
        assert_eq!(config.query.featured_logs, 4);
        assert_eq!(config.query.featured_posts, 2);
        assert_eq!(config.query.summary_len, 160);
    }

    #[test]
    fn test_query_overrides() {
        let config: SiteConfig = toml::from_str(
            r#"
            [query]
            snippet_context = 40
            visible_tags = 10
        "#,
        )
        .unwrap();

        assert_eq!(config.query.snippet_context, 40);
        assert_eq!(config.query.visible_tags, 10);
        assert_eq!(config.query.visible_days, 4);
    }
}
