//! Pure queries over loaded content.
//!
//! | Module      | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `sort`      | Date ordering, newest or oldest first            |
//! | `filter`    | Tag, category and status criteria                |
//! | `search`    | Multi-term AND matching over designated fields   |
//! | `highlight` | Plain/highlighted segments for display           |
//! | `snippet`   | Context windows around a match, word truncation  |
//! | `tags`      | Tag counts, single-select state, tag cloud       |
//! | `relations` | Project/log/post joins and day grouping          |
//!
//! Nothing here mutates the collections; every function returns new
//! vectors (usually of references) and is safe to call per request.

pub mod filter;
pub mod highlight;
pub mod relations;
pub mod search;
pub mod snippet;
pub mod sort;
pub mod tags;

pub use filter::{Criterion, PostFilter, ProjectFilter};
pub use highlight::{Segment, highlight};
pub use relations::{
    DayGroups, Featured, ProjectProgress, featured_project, logs_for_project, project_for_log,
    project_progress, related_posts,
};
pub use search::SearchQuery;
pub use snippet::{snippet_window, truncate_at_word};
pub use sort::{SortOrder, sort_by_date};
pub use tags::{TagCloud, TagCounts, TagSelection};

use thiserror::Error;

/// Errors raised when answering a query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("{kind} `{slug}` not found")]
    NotFound { kind: &'static str, slug: String },

    #[error("invalid `{name}`: {message}")]
    InvalidParam { name: &'static str, message: String },
}

impl QueryError {
    pub fn not_found(kind: &'static str, slug: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            slug: slug.into(),
        }
    }

    pub fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParam {
            name,
            message: message.into(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_display() {
        assert_eq!(
            QueryError::not_found("post", "hello").to_string(),
            "post `hello` not found"
        );
        assert_eq!(
            QueryError::invalid("status", "unknown status `done`").to_string(),
            "invalid `status`: unknown status `done`"
        );
    }
}
