//! Frontmatter parsing for MDX/markdown documents.
//!
//! A document starts with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Building a Blog
//! date: 2024-01-15
//! tags: [rust, web]
//! ---
//! Body markdown...
//! ```
//!
//! The YAML is read into `*Matter` structs whose fields are all optional, then
//! converted into the strict entity types. Required fields are checked here,
//! absent optional lists become empty, absent summaries become `""`.

use super::{Body, ContentError, ContentItem, ContentKind, Log, Post, Project, ProjectStatus};
use crate::{config::SlugMode, utils::{date::parse_date, slug::slug_from_path}};
use chrono::{DateTime, Utc};
use serde::{Deserialize, de::DeserializeOwned};
use std::path::Path;

/// Reading speed used when a post has no `readingTime`.
const WORDS_PER_MINUTE: usize = 200;

/// Settings that affect how documents are parsed.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub slug: SlugMode,
    pub max_tag_len: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            slug: SlugMode::No,
            max_tag_len: 30,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostMatter {
    title: Option<String>,
    date: Option<String>,
    summary: Option<String>,
    tags: Option<Vec<String>>,
    reading_time: Option<u32>,
    category: Option<String>,
    related_projects: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectMatter {
    title: Option<String>,
    date: Option<String>,
    summary: Option<String>,
    image: Option<String>,
    status: Option<ProjectStatus>,
    technologies: Option<Vec<String>>,
    github: Option<String>,
    demo: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogMatter {
    title: Option<String>,
    date: Option<String>,
    project_id: Option<String>,
    day: Option<u32>,
    progress: Option<String>,
    challenges: Option<Vec<String>>,
}

/// Split a document into its YAML frontmatter and body.
///
/// Returns `None` when the document does not open with a `---` line or the
/// block is never closed.
pub fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse one source document of the given kind.
pub fn parse_document(
    kind: ContentKind,
    path: &Path,
    source: &str,
    options: ParseOptions,
) -> Result<ContentItem, ContentError> {
    let (yaml, body) =
        split_frontmatter(source).ok_or_else(|| ContentError::MissingFrontmatter(path.to_path_buf()))?;
    let slug = slug_from_path(path, options.slug).map_err(|err| ContentError::InvalidSlug {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let body = Body::compile(body.trim_start_matches(['\r', '\n']));
    let url = format!("/{}/{}", kind.route(), slug);

    let item = match kind {
        ContentKind::Post => {
            let matter: PostMatter = read_matter(path, yaml)?;
            let tags = matter.tags.unwrap_or_default();
            if let Some(tag) = tags.iter().find(|tag| tag.chars().count() > options.max_tag_len) {
                return Err(ContentError::TagTooLong {
                    path: path.to_path_buf(),
                    tag: tag.clone(),
                    max: options.max_tag_len,
                });
            }
            let reading_time = matter
                .reading_time
                .unwrap_or_else(|| estimate_reading_time(&body));

            ContentItem::Post(Post {
                title: required(path, matter.title, "title")?,
                date: required_date(path, matter.date)?,
                summary: matter.summary.unwrap_or_default(),
                tags,
                reading_time,
                category: matter.category,
                related_projects: matter.related_projects.unwrap_or_default(),
                slug,
                url,
                body,
            })
        }
        ContentKind::Project => {
            let matter: ProjectMatter = read_matter(path, yaml)?;
            ContentItem::Project(Project {
                title: required(path, matter.title, "title")?,
                date: required_date(path, matter.date)?,
                status: required(path, matter.status, "status")?,
                summary: matter.summary.unwrap_or_default(),
                image: matter.image,
                technologies: matter.technologies.unwrap_or_default(),
                github: matter.github,
                demo: matter.demo,
                category: matter.category,
                slug,
                url,
                body,
            })
        }
        ContentKind::Log => {
            let matter: LogMatter = read_matter(path, yaml)?;
            ContentItem::Log(Log {
                title: required(path, matter.title, "title")?,
                date: required_date(path, matter.date)?,
                project_id: required(path, matter.project_id, "projectId")?,
                day: required(path, matter.day, "day")?,
                progress: matter.progress.unwrap_or_default(),
                challenges: matter.challenges.unwrap_or_default(),
                slug,
                url,
                body,
            })
        }
    };

    Ok(item)
}

fn read_matter<T: DeserializeOwned + Default>(path: &Path, yaml: &str) -> Result<T, ContentError> {
    if yaml.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(yaml).map_err(|err| ContentError::Yaml(path.to_path_buf(), err))
}

fn required<T>(path: &Path, value: Option<T>, field: &'static str) -> Result<T, ContentError> {
    value.ok_or_else(|| ContentError::MissingField {
        path: path.to_path_buf(),
        field,
    })
}

fn required_date(path: &Path, value: Option<String>) -> Result<DateTime<Utc>, ContentError> {
    let raw = required(path, value, "date")?;
    parse_date(&raw).map_err(|err| ContentError::InvalidDate {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn estimate_reading_time(body: &Body) -> u32 {
    let minutes = body.word_count().div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = "---
title: Building a Blog
date: 2024-01-15
summary: How this site works
tags: [React, blog]
readingTime: 5
category: coding
relatedProjects:
  - folio
---

# Intro

Hello there.
";

    fn parse(kind: ContentKind, name: &str, source: &str) -> Result<ContentItem, ContentError> {
        parse_document(kind, Path::new(name), source, ParseOptions::default())
    }

    #[test]
    fn test_split_frontmatter() {
        let (yaml, body) = split_frontmatter("---\ntitle: a\n---\nbody\n").unwrap();
        assert_eq!(yaml, "title: a\n");
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_split_frontmatter_crlf_and_bom() {
        let (yaml, body) = split_frontmatter("\u{feff}---\r\ntitle: a\r\n---\r\nbody").unwrap();
        assert_eq!(yaml, "title: a\r\n");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_frontmatter_empty_block() {
        let (yaml, body) = split_frontmatter("---\n---\nbody").unwrap();
        assert_eq!(yaml, "");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_frontmatter_missing() {
        assert!(split_frontmatter("# just markdown").is_none());
        assert!(split_frontmatter("---\ntitle: never closed\n").is_none());
        assert!(split_frontmatter("----\n---\n").is_none());
    }

    #[test]
    fn test_parse_post() {
        let ContentItem::Post(post) = parse(ContentKind::Post, "content/post/building-a-blog.mdx", POST).unwrap() else {
            panic!("expected a post");
        };
        assert_eq!(post.slug, "building-a-blog");
        assert_eq!(post.url, "/post/building-a-blog");
        assert_eq!(post.title, "Building a Blog");
        assert_eq!(post.tags, vec!["React", "blog"]);
        assert_eq!(post.reading_time, 5);
        assert_eq!(post.category.as_deref(), Some("coding"));
        assert_eq!(post.related_projects, vec!["folio"]);
        assert!(post.body.raw.starts_with("# Intro"));
        assert!(post.body.html.contains("<h1>Intro</h1>"));
    }

    #[test]
    fn test_post_optional_fields_default_to_empty() {
        let source = "---\ntitle: Minimal\ndate: 2024-02-01\n---\nword ";
        let ContentItem::Post(post) = parse(ContentKind::Post, "minimal.mdx", source).unwrap() else {
            panic!("expected a post");
        };
        assert_eq!(post.summary, "");
        assert!(post.tags.is_empty());
        assert!(post.related_projects.is_empty());
        assert_eq!(post.category, None);
        assert_eq!(post.reading_time, 1);
    }

    #[test]
    fn test_reading_time_estimated_from_body() {
        let body = "word ".repeat(450);
        let source = format!("---\ntitle: Long\ndate: 2024-02-01\n---\n{body}");
        let ContentItem::Post(post) = parse(ContentKind::Post, "long.mdx", &source).unwrap() else {
            panic!("expected a post");
        };
        assert_eq!(post.reading_time, 3);
    }

    #[test]
    fn test_tag_too_long_rejected() {
        let tag = "x".repeat(31);
        let source = format!("---\ntitle: T\ndate: 2024-01-01\ntags: [{tag}]\n---\n");
        let err = parse(ContentKind::Post, "t.mdx", &source).unwrap_err();
        assert!(matches!(err, ContentError::TagTooLong { max: 30, .. }));

        // exactly 30 characters, multi-byte, is fine
        let tag = "é".repeat(30);
        let source = format!("---\ntitle: T\ndate: 2024-01-01\ntags: [{tag}]\n---\n");
        assert!(parse(ContentKind::Post, "t.mdx", &source).is_ok());
    }

    #[test]
    fn test_missing_required_fields() {
        let err = parse(ContentKind::Post, "t.mdx", "---\ndate: 2024-01-01\n---\n").unwrap_err();
        assert!(matches!(err, ContentError::MissingField { field: "title", .. }));

        let err = parse(ContentKind::Post, "t.mdx", "---\n---\n").unwrap_err();
        assert!(matches!(err, ContentError::MissingField { field: "title", .. }));

        let err = parse(ContentKind::Log, "l.mdx", "---\ntitle: L\ndate: 2024-01-01\nday: 1\n---\n").unwrap_err();
        assert!(matches!(err, ContentError::MissingField { field: "projectId", .. }));
    }

    #[test]
    fn test_invalid_date() {
        let err = parse(ContentKind::Post, "t.mdx", "---\ntitle: T\ndate: yesterday\n---\n").unwrap_err();
        assert!(matches!(err, ContentError::InvalidDate { .. }));
    }

    #[test]
    fn test_missing_frontmatter() {
        let err = parse(ContentKind::Post, "t.mdx", "no frontmatter").unwrap_err();
        assert!(matches!(err, ContentError::MissingFrontmatter(_)));
    }

    #[test]
    fn test_parse_project() {
        let source = "---
title: Folio
date: 2024-01-01
summary: Content engine
status: in-progress
technologies: [Rust, serde]
github: https://github.com/alice/folio
---
Pinned notes.
";
        let ContentItem::Project(project) = parse(ContentKind::Project, "folio.mdx", source).unwrap() else {
            panic!("expected a project");
        };
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.technologies, vec!["Rust", "serde"]);
        assert_eq!(project.url, "/project/folio");
        assert_eq!(project.demo, None);
        assert_eq!(project.image, None);
    }

    #[test]
    fn test_invalid_project_status() {
        let source = "---\ntitle: P\ndate: 2024-01-01\nstatus: abandoned\n---\n";
        let err = parse(ContentKind::Project, "p.mdx", source).unwrap_err();
        assert!(matches!(err, ContentError::Yaml(..)));
    }

    #[test]
    fn test_parse_log() {
        let source = "---
title: Day 3
date: 2024-01-03
projectId: folio
day: 3
progress: Wrote the loader
challenges:
  - YAML dates
---
";
        let ContentItem::Log(log) = parse(ContentKind::Log, "folio-day-3.mdx", source).unwrap() else {
            panic!("expected a log");
        };
        assert_eq!(log.project_id, "folio");
        assert_eq!(log.day, 3);
        assert_eq!(log.challenges, vec!["YAML dates"]);
        assert_eq!(log.url, "/log/folio-day-3");
        assert_eq!(log.body.raw, "");
    }
}
