//! Post list state and post view models.

use crate::{
    content::{Collections, Post, Project},
    query::{
        Criterion, PostFilter, QueryError, SearchQuery, Segment, SortOrder, TagSelection,
        highlight, snippet_window, sort_by_date, truncate_at_word,
    },
};
use serde::Serialize;

/// A post in a result list, with highlighted title and summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostHit<'a> {
    #[serde(flatten)]
    pub post: &'a Post,
    pub title_segments: Vec<Segment<'a>>,
    pub preview: String,
    pub preview_segments: Vec<Segment<'a>>,
    /// Body excerpt around the first match, for deep searches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub snippet_segments: Vec<Segment<'a>>,
}

impl<'a> PostHit<'a> {
    /// `snippet_context` enables a body snippet when the query is not empty.
    pub fn new(
        post: &'a Post,
        query: &SearchQuery,
        snippet_context: Option<usize>,
        summary_len: usize,
    ) -> Self {
        let window = snippet_context
            .filter(|_| !query.is_empty())
            .and_then(|context| snippet_window(&post.body.raw, query.raw(), context));

        let preview = truncate_at_word(&post.summary, summary_len);
        // A truncated preview is a prefix of the summary plus "..."
        let shown = if preview == post.summary {
            post.summary.as_str()
        } else {
            let len = preview.len() - "...".len();
            post.summary.get(..len).unwrap_or(&post.summary)
        };
        let preview_segments = highlight(shown, query.raw());

        Self {
            post,
            title_segments: highlight(&post.title, query.raw()),
            preview,
            preview_segments,
            snippet: window.map(|window| window.to_string()),
            snippet_segments: window.map(|window| window.segments(query.raw())).unwrap_or_default(),
        }
    }
}

/// Post list: search term, tag, category, deep search and order.
#[derive(Debug, Clone, Default)]
pub struct PostListView {
    search: String,
    tag: TagSelection,
    category: Criterion<String>,
    deep: bool,
    order: SortOrder,
}

impl PostListView {
    /// Initial state from the `search` query parameter.
    pub fn from_search_param(search: Option<&str>) -> Self {
        Self {
            search: search.unwrap_or_default().to_owned(),
            ..Self::default()
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn select_tag(&mut self, tag: impl Into<String>) {
        self.tag.select(tag);
    }

    /// Select `tag`, or clear the selection for `None`, `""` and `"all"`.
    pub fn set_tag(&mut self, tag: Option<&str>) {
        match tag.map(str::trim) {
            None | Some("" | "all") => self.clear_tag(),
            Some(tag) => self.select_tag(tag),
        }
    }

    pub fn clear_tag(&mut self) {
        self.tag.clear();
    }

    pub fn set_category(&mut self, category: Criterion<String>) {
        self.category = category;
    }

    pub fn set_deep(&mut self, deep: bool) {
        self.deep = deep;
    }

    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    pub fn filter(&self) -> PostFilter {
        PostFilter {
            tag: self.tag.criterion(),
            category: self.category.clone(),
            search: SearchQuery::parse(&self.search),
            deep: self.deep,
        }
    }

    /// Matching posts, sorted, as highlighted hits.
    pub fn results<'a>(
        &self,
        posts: &'a [Post],
        snippet_context: usize,
        summary_len: usize,
    ) -> Vec<PostHit<'a>> {
        let filter = self.filter();
        let context = self.deep.then_some(snippet_context);

        sort_by_date(&filter.apply(posts), self.order)
            .into_iter()
            .map(|post| PostHit::new(post, &filter.search, context, summary_len))
            .collect()
    }
}

/// A single post with its rendered body and related projects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail<'a> {
    #[serde(flatten)]
    pub post: &'a Post,
    pub html: &'a str,
    /// Related projects that exist, in the order the post lists them.
    pub projects: Vec<&'a Project>,
}

impl<'a> PostDetail<'a> {
    pub fn build(collections: &'a Collections, slug: &str) -> Result<Self, QueryError> {
        let post = collections
            .post(slug)
            .ok_or_else(|| QueryError::not_found("post", slug))?;
        let projects = post
            .related_projects
            .iter()
            .filter_map(|slug| collections.project(slug))
            .collect();

        Ok(Self {
            post,
            html: &post.body.html,
            projects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        content::{Body, ProjectStatus},
        query::test_support::{join, post, project},
    };

    fn posts() -> Vec<Post> {
        let mut a = post("a", 1, &["rust"]);
        a.title = "My React Blog".into();
        a.body = Body::compile("Hooks and the borrow checker walk into a bar.");
        let mut b = post("b", 2, &["rust", "web"]);
        b.title = "My React App".into();
        let mut c = post("c", 3, &["web"]);
        c.title = "Blogging with react".into();
        vec![a, b, c]
    }

    fn slugs(hits: &[PostHit<'_>]) -> Vec<String> {
        hits.iter().map(|hit| hit.post.slug.clone()).collect()
    }

    #[test]
    fn test_default_lists_newest_first() {
        let posts = posts();
        let hits = PostListView::default().results(&posts, 100, 160);
        assert_eq!(slugs(&hits), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_search_param_prepopulates() {
        let posts = posts();
        let view = PostListView::from_search_param(Some("blog react"));
        assert_eq!(view.search, "blog react");

        let hits = view.results(&posts, 100, 160);
        assert_eq!(slugs(&hits), vec!["c", "a"]);
    }

    #[test]
    fn test_tag_and_search_compose() {
        let posts = posts();
        let mut view = PostListView::default();
        view.set_search("react");
        view.select_tag("rust");

        let hits = view.results(&posts, 100, 160);
        assert_eq!(slugs(&hits), vec!["b", "a"]);

        view.select_tag("web");
        assert_eq!(slugs(&view.results(&posts, 100, 160)), vec!["c", "b"]);

        view.clear_tag();
        assert_eq!(view.results(&posts, 100, 160).len(), 3);

        view.set_tag(Some("web"));
        assert_eq!(view.tag, TagSelection::Tag("web".into()));
        view.set_tag(Some("all"));
        assert_eq!(view.tag, TagSelection::All);
    }

    #[test]
    fn test_title_segments_highlight_raw_query() {
        let posts = posts();
        let mut view = PostListView::default();
        view.set_search("React");
        view.set_order(SortOrder::Oldest);

        let hits = view.results(&posts, 100, 160);
        let first = &hits[0];
        assert_eq!(join(&first.title_segments), "My React Blog");
        assert!(first.title_segments.iter().any(|s| s.highlighted && s.text == "React"));
        assert!(first.snippet.is_none());
    }

    #[test]
    fn test_deep_search_adds_snippet() {
        let posts = posts();
        let mut view = PostListView::default();
        view.set_search("borrow");
        view.set_deep(true);

        let hits = view.results(&posts, 8, 160);
        assert_eq!(slugs(&hits), vec!["a"]);
        assert_eq!(hits[0].snippet.as_deref(), Some("...and the borrow checker..."));
        assert_eq!(join(&hits[0].snippet_segments), "...and the borrow checker...");
        assert!(
            hits[0]
                .snippet_segments
                .iter()
                .any(|s| s.highlighted && s.text == "borrow")
        );
    }

    #[test]
    fn test_preview_truncated() {
        let mut long = post("long", 1, &[]);
        long.summary = "Notes on writing a tiny search engine, with highlights".into();
        let hit = PostHit::new(&long, &SearchQuery::parse("search"), None, 26);

        assert_eq!(hit.preview, "Notes on writing a tiny...");
        assert_eq!(join(&hit.preview_segments), "Notes on writing a tiny");
    }

    #[test]
    fn test_post_detail() {
        let mut posts = posts();
        posts[0].related_projects = vec!["folio".into(), "missing".into()];
        let collections = Collections {
            posts,
            projects: vec![project("folio", 1, ProjectStatus::Planned)],
            logs: vec![],
        };

        let detail = PostDetail::build(&collections, "a").unwrap();
        assert!(detail.html.contains("borrow checker"));
        assert_eq!(detail.projects.len(), 1);

        let err = PostDetail::build(&collections, "zzz").unwrap_err();
        assert_eq!(err, QueryError::not_found("post", "zzz"));
    }

    #[test]
    fn test_hit_json_shape() {
        let posts = posts();
        let hit = PostHit::new(&posts[0], &SearchQuery::parse("blog"), None, 160);
        let json = serde_json::to_value(&hit).unwrap();

        assert_eq!(json["slug"], "a");
        assert_eq!(json["titleSegments"][1]["highlighted"], true);
        assert!(json.get("snippet").is_none());
        assert!(json.get("snippetSegments").is_none());
    }
}
