//! Content collections: posts, projects and progress logs.
//!
//! # Pipeline
//!
//! ```text
//! content/post/*.mdx ─┐
//! content/projects/*  ├─► parse_document() ─► ContentItem ─► Collections
//! content/logs/*.mdx ─┘     (frontmatter)      (tagged)       (read-only)
//! ```
//!
//! Records are validated once, at load time. Everything downstream reads
//! [`Collections`] and never mutates it.

mod error;
pub mod frontmatter;
mod loader;
mod types;

pub use error::ContentError;
pub use loader::{Collections, load_collections};
pub use types::{Body, Log, Post, Project, ProjectStatus};

use serde::Serialize;
use std::fmt;

/// Discriminant of a content record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Project,
    Log,
}

impl ContentKind {
    pub const ALL: [Self; 3] = [Self::Post, Self::Project, Self::Log];

    /// Name used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Project => "project",
            Self::Log => "log",
        }
    }

    /// First URL segment for records of this kind (`/post/<slug>`).
    pub const fn route(self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A loaded content record of any kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentItem {
    Post(Post),
    Project(Project),
    Log(Log),
}

impl ContentItem {
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Post(_) => ContentKind::Post,
            Self::Project(_) => ContentKind::Project,
            Self::Log(_) => ContentKind::Log,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Self::Post(post) => &post.slug,
            Self::Project(project) => &project.slug,
            Self::Log(log) => &log.slug,
        }
    }
}
