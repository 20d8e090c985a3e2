//! `[content]` section configuration.
//!
//! Where content lives and how it is read.

use super::defaults;
use crate::content::ContentKind;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Slug derivation mode for content file names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Always convert to a lowercase ASCII slug (e.g., "Hello World" → "hello-world").
    On,
    /// Remove URL-hostile characters, keep everything else.
    Safe,
    /// Use the file name as-is (default).
    #[default]
    No,
}

/// `[content]` section in folio.toml
///
/// # Example
/// ```toml
/// [content]
/// dir = "content"
/// posts = "post"
/// projects = "projects"
/// logs = "logs"
/// extensions = ["mdx", "md"]
/// slug = "no"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Project root directory path (set from CLI, never from the file)
    #[serde(skip)]
    #[educe(Default = defaults::content::root())]
    pub root: Option<PathBuf>,

    /// Content directory, relative to root
    #[serde(default = "defaults::content::dir")]
    #[educe(Default = defaults::content::dir())]
    pub dir: PathBuf,

    /// Posts directory, relative to `dir`
    #[serde(default = "defaults::content::posts")]
    #[educe(Default = defaults::content::posts())]
    pub posts: PathBuf,

    /// Projects directory, relative to `dir`
    #[serde(default = "defaults::content::projects")]
    #[educe(Default = defaults::content::projects())]
    pub projects: PathBuf,

    /// Progress logs directory, relative to `dir`
    #[serde(default = "defaults::content::logs")]
    #[educe(Default = defaults::content::logs())]
    pub logs: PathBuf,

    /// File extensions treated as content documents
    #[serde(default = "defaults::content::extensions")]
    #[educe(Default = defaults::content::extensions())]
    pub extensions: Vec<String>,

    /// How file names become slugs
    #[serde(default = "defaults::content::slug")]
    #[educe(Default = defaults::content::slug())]
    pub slug: SlugMode,

    /// Maximum tag length in characters
    #[serde(default = "defaults::content::max_tag_len")]
    #[educe(Default = defaults::content::max_tag_len())]
    pub max_tag_len: usize,
}

impl ContentConfig {
    /// Directory holding documents of the given kind.
    pub fn dir_for(&self, kind: ContentKind) -> PathBuf {
        let sub = match kind {
            ContentKind::Post => &self.posts,
            ContentKind::Project => &self.projects,
            ContentKind::Log => &self.logs,
        };
        self.dir.join(sub)
    }

    /// Whether a path has one of the configured content extensions.
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}
