//! Search box state and submission.

use thiserror::Error;

/// Message shown when submitting a search fails.
pub const SEARCH_FAILED: &str = "Failed to perform search. Please try again.";

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("navigation to `{url}` failed: {reason}")]
    Failed { url: String, reason: String },
}

/// Something that can move the user to another location.
pub trait Navigator {
    fn navigate(&mut self, url: &str) -> Result<(), NavigationError>;
}

/// Location of the post search results for `term`.
pub fn search_url(term: &str) -> String {
    format!("/api/posts?search={}", urlencoding::encode(term.trim()))
}

/// Search box: term and the last error.
///
/// A failed submission keeps the term and records [`SEARCH_FAILED`]; the
/// form stays usable and the next submit clears the error.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    term: String,
    error: Option<String>,
}

impl SearchForm {
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the current term. Returns whether navigation happened.
    ///
    /// A blank term does nothing. Success clears the term.
    pub fn submit(&mut self, navigator: &mut impl Navigator) -> bool {
        self.error = None;
        if self.term.trim().is_empty() {
            return false;
        }

        match navigator.navigate(&search_url(&self.term)) {
            Ok(()) => {
                self.term.clear();
                true
            }
            Err(_) => {
                self.error = Some(SEARCH_FAILED.to_owned());
                false
            }
        }
    }
}
