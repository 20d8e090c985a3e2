//! Multi-term free-text search.
//!
//! A query is split on whitespace into lowercase terms. A text matches when
//! it contains every term as a case-insensitive substring; an empty query
//! matches everything.

use crate::content::{Log, Post, Project};

/// Parsed search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed query as typed, used for highlighting.
    raw: String,
    /// Lowercased, non-empty terms.
    terms: Vec<String>,
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            raw: raw.to_owned(),
            terms: raw.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether `text` contains every term, ignoring case.
    pub fn matches_text(&self, text: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        let text = text.to_lowercase();
        self.terms.iter().all(|term| text.contains(term.as_str()))
    }

    /// Whether any of the item's search fields contains every term.
    pub fn matches<T: Searchable + ?Sized>(&self, item: &T, deep: bool) -> bool {
        self.is_empty()
            || item
                .search_fields(deep)
                .into_iter()
                .any(|field| self.matches_text(field))
    }
}

/// Records that expose text fields to search.
pub trait Searchable {
    /// Fields searched for this record. `deep` adds the body where supported.
    fn search_fields(&self, deep: bool) -> Vec<&str>;
}

impl Searchable for Post {
    fn search_fields(&self, deep: bool) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.summary.as_str()];
        if deep {
            fields.push(&self.body.raw);
        }
        fields
    }
}

impl Searchable for Project {
    fn search_fields(&self, _deep: bool) -> Vec<&str> {
        vec![self.title.as_str(), self.summary.as_str()]
    }
}

impl Searchable for Log {
    fn search_fields(&self, deep: bool) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.progress.as_str()];
        if deep {
            fields.push(&self.body.raw);
        }
        fields
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_fields(&self, deep: bool) -> Vec<&str> {
        (**self).search_fields(deep)
    }
}
