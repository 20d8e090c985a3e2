//! Content loading errors.

use super::ContentKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning source documents into content records.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` has no frontmatter block (expected a leading `---` line)")]
    MissingFrontmatter(PathBuf),

    #[error("invalid frontmatter in `{0}`")]
    Yaml(PathBuf, #[source] serde_yaml::Error),

    #[error("`{path}` is missing required field `{field}`")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("`{path}`: tag `{tag}` is longer than {max} characters")]
    TagTooLong { path: PathBuf, tag: String, max: usize },

    #[error("`{path}`: {message}")]
    InvalidDate { path: PathBuf, message: String },

    #[error("`{path}`: invalid slug: {message}")]
    InvalidSlug { path: PathBuf, message: String },

    #[error("duplicate {kind} slug `{slug}` (`{first}` and `{second}`)")]
    DuplicateSlug {
        kind: ContentKind,
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}
