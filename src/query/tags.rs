//! Tag aggregation and tag selection state.

use super::filter::Criterion;
use crate::content::Post;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// A distinct tag and the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Tags ranked by popularity.
///
/// Ordered by descending count; ties keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagCounts(Vec<TagCount>);

impl TagCounts {
    pub fn from_posts<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Self {
        let mut ranked: Vec<TagCount> = Vec::new();
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();

        for post in posts {
            for (i, tag) in post.tags.iter().enumerate() {
                // A tag repeated within one post counts once
                if post.tags[..i].contains(tag) {
                    continue;
                }
                match index.get(tag.as_str()) {
                    Some(&slot) => ranked[slot].count += 1,
                    None => {
                        index.insert(tag, ranked.len());
                        ranked.push(TagCount {
                            tag: tag.clone(),
                            count: 1,
                        });
                    }
                }
            }
        }

        // Stable: equal counts stay in first-seen order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        Self(ranked)
    }

    pub fn ranked(&self) -> &[TagCount] {
        &self.0
    }

    /// The `n` most popular tags.
    pub fn top(&self, n: usize) -> &[TagCount] {
        &self.0[..n.min(self.0.len())]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Single-select tag state. `All` means no tag filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagSelection {
    #[default]
    All,
    Tag(String),
}

impl TagSelection {
    /// Select `tag`, replacing any current selection.
    pub fn select(&mut self, tag: impl Into<String>) {
        *self = Self::Tag(tag.into());
    }

    pub fn clear(&mut self) {
        *self = Self::All;
    }

    pub fn criterion(&self) -> Criterion<String> {
        match self {
            Self::All => Criterion::All,
            Self::Tag(tag) => Criterion::Only(tag.clone()),
        }
    }
}

/// Collapsible tag list: top tags, or everything once expanded.
#[derive(Debug, Clone)]
pub struct TagCloud {
    counts: TagCounts,
    limit: usize,
    show_all: bool,
}

impl TagCloud {
    pub fn new(counts: TagCounts, limit: usize) -> Self {
        Self {
            counts,
            limit,
            show_all: false,
        }
    }

    pub fn toggle(&mut self) {
        self.show_all = !self.show_all;
    }

    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    pub const fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn visible(&self) -> &[TagCount] {
        if self.show_all {
            self.counts.ranked()
        } else {
            self.counts.top(self.limit)
        }
    }

    /// Tags hidden in the collapsed view.
    pub fn hidden(&self) -> usize {
        self.counts.len() - self.visible().len()
    }

    /// Whether a toggle would change anything.
    pub fn is_collapsible(&self) -> bool {
        self.counts.len() > self.limit
    }
}
