//! Context-window snippets and summary truncation.
//!
//! Windows are measured in characters, never bytes.

use super::highlight::{Segment, highlight};
use regex::RegexBuilder;
use std::fmt;

const ELLIPSIS: &str = "...";

/// Longest stretch a window start may move back to reach a word start.
const MAX_WORD_WIDEN: usize = 16;

/// The part of a text a snippet shows, and which sides were cut off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetWindow<'a> {
    pub text: &'a str,
    pub cut_start: bool,
    pub cut_end: bool,
}

impl<'a> SnippetWindow<'a> {
    /// Highlighted segments of the window, with `...` on each cut side.
    pub fn segments(&self, query: &str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        if self.cut_start {
            segments.push(Segment::plain(ELLIPSIS));
        }
        segments.extend(highlight(self.text, query));
        if self.cut_end {
            segments.push(Segment::plain(ELLIPSIS));
        }
        segments
    }
}

impl fmt::Display for SnippetWindow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cut_start {
            f.write_str(ELLIPSIS)?;
        }
        f.write_str(self.text)?;
        if self.cut_end {
            f.write_str(ELLIPSIS)?;
        }
        Ok(())
    }
}

/// Locate a window of `context` characters around the first occurrence of
/// `term` in `text`.
///
/// A window that would begin inside a word is widened back to the start of
/// that word, unless the word start lies more than `max(context, 16)`
/// characters further back. `None` when `term` or `text` is empty or the
/// term does not occur.
///
/// ```ignore
/// let window = snippet_window("The quick brown fox jumps over the lazy dog", "fox", 5);
/// assert_eq!(window.unwrap().to_string(), "...brown fox jump...");
/// ```
pub fn snippet_window<'a>(text: &'a str, term: &str, context: usize) -> Option<SnippetWindow<'a>> {
    let term = term.trim();
    if text.is_empty() || term.is_empty() {
        return None;
    }

    let pattern = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
        .ok()?;
    let found = pattern.find(text)?;

    // Byte offset of every char, plus the end of the text
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect();
    let total = offsets.len() - 1;
    let char_at = |byte: usize| offsets.partition_point(|&offset| offset < byte);

    let match_start = char_at(found.start());
    let match_end = char_at(found.end());

    let mut start = match_start.saturating_sub(context);
    let end = (match_end + context).min(total);

    // Snap back to the word start, unless the word is too long to be worth it
    let chars: Vec<char> = text.chars().collect();
    let floor = start.saturating_sub(context.max(MAX_WORD_WIDEN));
    let at_boundary = |i: usize| i == 0 || chars[i].is_whitespace() || chars[i - 1].is_whitespace();
    let mut word_start = start;
    while word_start > floor && !at_boundary(word_start) {
        word_start -= 1;
    }
    if at_boundary(word_start) {
        start = word_start;
    }

    Some(SnippetWindow {
        text: &text[offsets[start]..offsets[end]],
        cut_start: start > 0,
        cut_end: end < total,
    })
}

/// Shorten `text` to at most `max` characters at a word boundary.
///
/// Cuts at the last space at or before `max`, strips one trailing `,`, `;`
/// or `.` and appends `...`. Text that already fits is returned unchanged.
pub fn truncate_at_word(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }

    let limit = text
        .char_indices()
        .nth(max)
        .map_or(text.len(), |(offset, _)| offset);

    // A space exactly at `max` still counts as a boundary
    let cut = if text[limit..].starts_with(' ') {
        limit
    } else {
        text[..limit].rfind(' ').unwrap_or(limit)
    };

    let truncated = &text[..cut];
    let cleaned = truncated
        .strip_suffix([',', ';', '.'])
        .unwrap_or(truncated);

    format!("{cleaned}{ELLIPSIS}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(text: &str, term: &str, context: usize) -> String {
        snippet_window(text, term, context).map_or_else(String::new, |window| window.to_string())
    }

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_snippet_example() {
        assert_eq!(snippet(FOX, "fox", 5), "...brown fox jump...");
    }

    #[test]
    fn test_snippet_at_text_start() {
        assert_eq!(snippet(FOX, "the", 4), "The qui...");
    }

    #[test]
    fn test_snippet_at_text_end() {
        assert_eq!(snippet(FOX, "dog", 5), "...lazy dog");
    }

    #[test]
    fn test_snippet_whole_text() {
        assert_eq!(snippet(FOX, "fox", 100), FOX);
    }

    #[test]
    fn test_snippet_is_case_insensitive() {
        assert_eq!(snippet(FOX, "FOX", 5), "...brown fox jump...");
    }

    #[test]
    fn test_snippet_without_match() {
        assert_eq!(snippet(FOX, "cat", 5), "");
        assert_eq!(snippet(FOX, "", 5), "");
        assert_eq!(snippet("", "fox", 5), "");
    }

    #[test]
    fn test_snippet_escapes_term() {
        assert_eq!(snippet("Learn C++ basics today", "c++", 3), "Learn C++ ba...");
    }

    #[test]
    fn test_snippet_counts_chars_not_bytes() {
        let text = "héllo wörld ünïcode";
        assert_eq!(snippet(text, "wörld", 2), "héllo wörld ü...");
    }

    #[test]
    fn test_snippet_long_token_stays_bounded() {
        let text = format!("intro {}fox tail", "a".repeat(5000));
        assert_eq!(snippet(&text, "fox", 5), "...aaaaafox tail");
    }

    #[test]
    fn test_window_segments_highlight_match() {
        let window = snippet_window(FOX, "FOX", 5).unwrap();
        let segments = window.segments("FOX");
        assert_eq!(
            segments,
            vec![
                Segment::plain("..."),
                Segment::plain("brown "),
                Segment::marked("fox"),
                Segment::plain(" jump"),
                Segment::plain("..."),
            ]
        );
        assert!(snippet_window(FOX, "cat", 5).is_none());
    }

    #[test]
    fn test_truncate_fits() {
        assert_eq!(truncate_at_word("short", 10), "short");
        assert_eq!(truncate_at_word("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_at_last_space() {
        assert_eq!(truncate_at_word("Hello brave new world", 12), "Hello brave...");
    }

    #[test]
    fn test_truncate_strips_trailing_punctuation() {
        assert_eq!(truncate_at_word("Hello, world, again", 13), "Hello, world...");
        assert_eq!(truncate_at_word("One. Two. Three.", 9), "One. Two...");
    }

    #[test]
    fn test_truncate_without_space() {
        assert_eq!(truncate_at_word("abcdefghij", 4), "abcd...");
    }
}
