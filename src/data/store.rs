//! Shared content store for the JSON API.
//!
//! Holds the current [`Collections`] behind an `ArcSwap` and caches serialized
//! responses keyed by a canonical request key, at most
//! [`MAX_CACHED_RESPONSES`] at a time.
//!
//! # Thread Safety
//!
//! - Collections: lock-free reads, atomic replacement on reload
//! - Response cache: `RwLock`, many concurrent readers, exclusive inserts
//!
//! Readers that loaded a snapshot before a reload keep the old collections
//! alive until they drop their `Arc`.

use crate::content::Collections;
use arc_swap::ArcSwap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Cache size at which the response cache is flushed before the next insert.
pub const MAX_CACHED_RESPONSES: usize = 512;

/// Thread-safe holder for the loaded content.
#[derive(Debug)]
pub struct ContentStore {
    collections: ArcSwap<Collections>,
    /// Serialized responses by request key. Cleared on every replace.
    json_cache: RwLock<FxHashMap<String, String>>,
}

impl ContentStore {
    pub fn new(collections: Collections) -> Self {
        Self {
            collections: ArcSwap::from_pointee(collections),
            json_cache: RwLock::new(FxHashMap::default()),
        }
    }

    /// Current collections. Wait-free.
    #[inline]
    pub fn snapshot(&self) -> Arc<Collections> {
        self.collections.load_full()
    }

    /// Swap in freshly loaded collections and drop all cached responses.
    pub fn replace(&self, collections: Collections) {
        self.collections.store(Arc::new(collections));
        self.json_cache.write().clear();
    }

    /// Return the cached JSON for `key`, or build, cache and return it.
    ///
    /// Errors from `build` are returned as-is and never cached.
    pub fn cached_json<E>(
        &self,
        key: &str,
        build: impl FnOnce(&Collections) -> Result<String, E>,
    ) -> Result<String, E> {
        // Fast path: read lock only
        if let Some(json) = self.json_cache.read().get(key) {
            return Ok(json.clone());
        }

        let snapshot = self.snapshot();
        let json = build(&snapshot)?;

        let mut cache = self.json_cache.write();
        // Another request may have filled the entry in the meantime
        if let Some(json) = cache.get(key) {
            return Ok(json.clone());
        }
        if cache.len() >= MAX_CACHED_RESPONSES {
            cache.clear();
        }
        cache.insert(key.to_owned(), json.clone());
        Ok(json)
    }

    /// Number of cached responses.
    #[cfg(test)]
    pub fn cached_len(&self) -> usize {
        self.json_cache.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Body, Post};
    use chrono::{TimeZone, Utc};

    fn post(slug: &str) -> Post {
        Post {
            slug: slug.into(),
            title: slug.to_uppercase(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            summary: String::new(),
            tags: vec![],
            reading_time: 1,
            category: None,
            related_projects: vec![],
            url: format!("/post/{slug}"),
            body: Body::default(),
        }
    }

    fn collections(slugs: &[&str]) -> Collections {
        Collections {
            posts: slugs.iter().map(|slug| post(slug)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let store = ContentStore::new(collections(&["a"]));
        let old = store.snapshot();

        store.replace(collections(&["b", "c"]));

        assert_eq!(old.posts.len(), 1);
        assert_eq!(store.snapshot().posts.len(), 2);
    }

    #[test]
    fn test_cached_json_builds_once() {
        let store = ContentStore::new(collections(&["a"]));
        let mut calls = 0;

        let first = store
            .cached_json::<()>("/api/posts", |c| {
                calls += 1;
                Ok(c.posts.len().to_string())
            })
            .unwrap();
        let second = store
            .cached_json::<()>("/api/posts", |_| {
                calls += 1;
                Ok("stale".into())
            })
            .unwrap();

        assert_eq!(first, "1");
        assert_eq!(second, "1");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_replace_clears_cache() {
        let store = ContentStore::new(collections(&["a"]));
        store
            .cached_json::<()>("/api/posts", |c| Ok(c.posts.len().to_string()))
            .unwrap();
        assert_eq!(store.cached_len(), 1);

        store.replace(collections(&["a", "b"]));
        assert_eq!(store.cached_len(), 0);

        let json = store
            .cached_json::<()>("/api/posts", |c| Ok(c.posts.len().to_string()))
            .unwrap();
        assert_eq!(json, "2");
    }

    #[test]
    fn test_cache_is_bounded() {
        let store = ContentStore::new(collections(&["a"]));
        for i in 0..MAX_CACHED_RESPONSES + 10 {
            store
                .cached_json::<()>(&format!("/api/posts?search=q{i}"), |_| Ok(i.to_string()))
                .unwrap();
        }
        assert_eq!(store.cached_len(), 10);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let store = ContentStore::new(Collections::default());
        let result = store.cached_json("/api/posts/missing", |_| Err("not found"));
        assert_eq!(result, Err("not found"));
        assert_eq!(store.cached_len(), 0);
    }
}
