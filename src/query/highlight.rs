//! Search-term highlighting.
//!
//! Splits a display string into plain and highlighted segments. The whole
//! trimmed query is one literal term, matched case-insensitively, so inputs
//! like `C++` or `a.b` never reach the regex engine unescaped.

use regex::RegexBuilder;
use serde::Serialize;

/// A run of text, either plain or matching the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

impl<'a> Segment<'a> {
    pub const fn plain(text: &'a str) -> Self {
        Self {
            text,
            highlighted: false,
        }
    }

    pub const fn marked(text: &'a str) -> Self {
        Self {
            text,
            highlighted: true,
        }
    }
}

/// Segment `text` by occurrences of `query`.
///
/// Concatenating the returned segments reproduces `text` exactly. An empty
/// query or no occurrence yields a single plain segment; empty text yields
/// no segments.
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    if text.is_empty() {
        return Vec::new();
    }

    let term = query.trim();
    if term.is_empty() {
        return vec![Segment::plain(text)];
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    else {
        return vec![Segment::plain(text)];
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for found in pattern.find_iter(text) {
        if found.start() > last {
            segments.push(Segment::plain(&text[last..found.start()]));
        }
        segments.push(Segment::marked(found.as_str()));
        last = found.end();
    }
    if last < text.len() {
        segments.push(Segment::plain(&text[last..]));
    }

    segments
}
