//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn title() -> String {
        "My Portfolio".into()
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn url() -> Option<String> {
        None
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use super::super::SlugMode;
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn dir() -> PathBuf {
        "content".into()
    }

    pub fn posts() -> PathBuf {
        "post".into()
    }

    pub fn projects() -> PathBuf {
        "projects".into()
    }

    pub fn logs() -> PathBuf {
        "logs".into()
    }

    pub fn extensions() -> Vec<String> {
        vec!["mdx".into(), "md".into()]
    }

    pub fn slug() -> SlugMode {
        SlugMode::No
    }

    pub fn max_tag_len() -> usize {
        30
    }
}

// ============================================================================
// [query] Section Defaults
// ============================================================================

pub mod query {
    pub fn snippet_context() -> usize {
        100
    }

    pub fn visible_tags() -> usize {
        4
    }

    pub fn visible_days() -> usize {
        4
    }

    pub fn featured_logs() -> usize {
        4
    }

    pub fn featured_posts() -> usize {
        2
    }

    pub fn summary_len() -> usize {
        160
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
