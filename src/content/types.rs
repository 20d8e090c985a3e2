//! Content entity types.
//!
//! Every field is present once a record leaves the loader: optional
//! frontmatter fields are substituted with empty values at the boundary.

use chrono::{DateTime, Utc};
use pulldown_cmark::{Options, Parser, html};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Document body: the raw markdown and its rendered HTML.
#[derive(Debug, Clone, Default)]
pub struct Body {
    pub raw: String,
    pub html: String,
}

impl Body {
    /// Render markdown to HTML.
    pub fn compile(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parser = Parser::new_ext(&raw, Options::all());

        let mut html = String::with_capacity(raw.len() * 2);
        html::push_html(&mut html, parser);

        Self { raw, html }
    }

    /// Number of whitespace-separated words in the raw body.
    pub fn word_count(&self) -> usize {
        self.raw.split_whitespace().count()
    }
}

/// A blog post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub summary: String,
    pub tags: Vec<String>,
    /// Estimated reading time in minutes.
    pub reading_time: u32,
    pub category: Option<String>,
    pub related_projects: Vec<String>,
    pub url: String,
    #[serde(skip)]
    pub body: Body,
}

/// Lifecycle of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    InProgress,
    Completed,
    Planned,
}

impl ProjectStatus {
    pub const ALL: [Self; 3] = [Self::InProgress, Self::Completed, Self::Planned];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Planned => "planned",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown status `{s}`, expected in-progress, completed or planned"))
    }
}

/// A portfolio project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: String,
    pub title: String,
    /// Start date.
    pub date: DateTime<Utc>,
    pub summary: String,
    pub image: Option<String>,
    pub status: ProjectStatus,
    pub technologies: Vec<String>,
    pub github: Option<String>,
    pub demo: Option<String>,
    pub category: Option<String>,
    pub url: String,
    #[serde(skip)]
    pub body: Body,
}

/// A progress log entry belonging to a project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub slug: String,
    pub title: String,
    pub date: DateTime<Utc>,
    /// Slug of the owning project. May not resolve.
    pub project_id: String,
    /// Position in the project timeline; not unique.
    pub day: u32,
    pub progress: String,
    pub challenges: Vec<String>,
    pub url: String,
    #[serde(skip)]
    pub body: Body,
}
