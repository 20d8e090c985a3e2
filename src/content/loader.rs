//! Content discovery and loading.
//!
//! Documents are discovered per kind with `walkdir` (sorted by file name so
//! the load order is deterministic), then read and parsed in parallel.

use super::{
    ContentError, ContentItem, ContentKind,
    frontmatter::{ParseOptions, parse_document},
    types::{Log, Post, Project},
};
use crate::{config::ContentConfig, log};
use anyhow::Result;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// The three read-only content collections.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub posts: Vec<Post>,
    pub projects: Vec<Project>,
    pub logs: Vec<Log>,
}

impl Collections {
    /// Partition parsed records into collections, rejecting duplicate slugs.
    pub fn from_items(items: Vec<(PathBuf, ContentItem)>) -> Result<Self, ContentError> {
        let mut seen: FxHashMap<(ContentKind, String), PathBuf> = FxHashMap::default();
        let mut collections = Self::default();

        for (path, item) in items {
            let key = (item.kind(), item.slug().to_owned());
            if let Some(first) = seen.get(&key) {
                return Err(ContentError::DuplicateSlug {
                    kind: key.0,
                    slug: key.1,
                    first: first.clone(),
                    second: path,
                });
            }
            seen.insert(key, path);

            match item {
                ContentItem::Post(post) => collections.posts.push(post),
                ContentItem::Project(project) => collections.projects.push(project),
                ContentItem::Log(log) => collections.logs.push(log),
            }
        }

        Ok(collections)
    }

    pub fn post(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.slug == slug)
    }

    pub fn log(&self, slug: &str) -> Option<&Log> {
        self.logs.iter().find(|log| log.slug == slug)
    }

    /// Total number of records across all collections.
    pub fn len(&self) -> usize {
        self.posts.len() + self.projects.len() + self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load every collection from the configured content directory.
///
/// A missing kind directory yields an empty collection.
pub fn load_collections(config: &ContentConfig) -> Result<Collections> {
    let options = ParseOptions {
        slug: config.slug,
        max_tag_len: config.max_tag_len,
    };

    let files: Vec<(ContentKind, PathBuf)> = ContentKind::ALL
        .into_iter()
        .flat_map(|kind| {
            discover(&config.dir_for(kind), config)
                .into_iter()
                .map(move |path| (kind, path))
        })
        .collect();

    let items = files
        .into_par_iter()
        .map(|(kind, path)| {
            let source =
                fs::read_to_string(&path).map_err(|err| ContentError::Io(path.clone(), err))?;
            let item = parse_document(kind, &path, &source, options)?;
            Ok((path, item))
        })
        .collect::<Result<Vec<_>, ContentError>>()?;

    let collections = Collections::from_items(items)?;
    if collections.is_empty() {
        log!("load"; "no content found under {}", config.dir.display());
    } else {
        log!(
            "load";
            "{} records: {} posts, {} projects, {} logs",
            collections.len(),
            collections.posts.len(),
            collections.projects.len(),
            collections.logs.len()
        );
    }

    Ok(collections)
}

/// Find content documents under `dir`, sorted by path.
fn discover(dir: &Path, config: &ContentConfig) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| config.is_document(path))
        .collect()
}
