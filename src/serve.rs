//! JSON API server with hot reload.
//!
//! A small `tiny_http` server answering read-only queries over the loaded
//! content:
//!
//! - One route per view (`/api/posts`, `/api/projects/<slug>`, ...)
//! - Serialized responses cached until the next reload, except for
//!   date-dependent routes
//! - Content watching and reload (via `watch` module)
//! - Graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//!     route(url)             reload content
//!     read snapshot          replace snapshot
//! └─────────────────────────────────────────────┘
//!                    │
//!                    ▼
//!              ContentStore
//!       (ArcSwap + response cache)
//! ```

use crate::{
    browse::{parse_order, parse_status},
    config::SiteConfig,
    content::{Collections, load_collections},
    data::ContentStore,
    log,
    query::{Criterion, QueryError, TagCloud, TagCounts},
    view::{
        Category, CategoryPage, FeaturedView, LogDetail, NavigationError, Navigator, PostDetail,
        PostListView, ProjectDetail, ProjectListView, SearchForm, breadcrumbs,
    },
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc};
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, Server};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Load the content and serve it until Ctrl+C.
pub fn serve_site(config: &'static SiteConfig) -> Result<()> {
    let store = Arc::new(ContentStore::new(load_collections(&config.content)?));

    let interface: std::net::IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", config.serve.interface))?;
    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}/api/posts", addr);

    if config.serve.watch {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            if let Err(err) = watch_for_changes_blocking(config, &store) {
                log!("watch"; "{err}");
            }
        });
    }

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &store, config) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

fn handle_request(request: Request, store: &ContentStore, config: &SiteConfig) -> Result<()> {
    let reply = if *request.method() == Method::Get {
        route(store, config, request.url())
    } else {
        ApiReply::error(405, "only GET is supported")
    };

    if reply.status >= 500 {
        log!("error"; "{} {}", request.url(), reply.body);
    }

    let mut response = Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(header("Content-Type", JSON_CONTENT_TYPE)?);
    if let Some(location) = &reply.location {
        response.add_header(header("Location", location)?);
    }

    request.respond(response)?;
    Ok(())
}

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name, value).map_err(|()| anyhow!("invalid header `{name}: {value}`"))
}

// ============================================================================
// Routing
// ============================================================================

/// Errors answered with a JSON `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("no route for `{0}`")]
    NoRoute(String),

    #[error("search term is empty")]
    EmptySearch,

    #[error("{0}")]
    SearchFailed(String),

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ApiError {
    pub const fn status(&self) -> u16 {
        match self {
            Self::Query(QueryError::NotFound { .. }) | Self::NoRoute(_) => 404,
            Self::Query(QueryError::InvalidParam { .. })
            | Self::EmptySearch
            | Self::SearchFailed(_) => 400,
            Self::Serialize(_) => 500,
        }
    }
}

/// A routed response, independent of the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
    pub location: Option<String>,
}

impl ApiReply {
    fn ok(body: String) -> Self {
        Self {
            status: 200,
            body,
            location: None,
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
            location: None,
        }
    }

    fn see_other(location: String) -> Self {
        Self {
            status: 303,
            body: serde_json::json!({ "location": location }).to_string(),
            location: Some(location),
        }
    }
}

impl From<ApiError> for ApiReply {
    fn from(err: ApiError) -> Self {
        Self::error(err.status(), &err.to_string())
    }
}

/// Longest `Location` the search redirect will issue.
const MAX_REDIRECT_LEN: usize = 2048;

/// Records where a search submission wants to go.
#[derive(Debug, Default)]
struct Redirect(Option<String>);

impl Navigator for Redirect {
    fn navigate(&mut self, url: &str) -> Result<(), NavigationError> {
        if url.len() > MAX_REDIRECT_LEN {
            return Err(NavigationError::Failed {
                url: url.to_owned(),
                reason: format!("location exceeds {MAX_REDIRECT_LEN} bytes"),
            });
        }
        self.0 = Some(url.to_owned());
        Ok(())
    }
}

/// Answer a request URL (path plus query string).
///
/// Date-dependent routes are computed per request. Everything else is cached
/// under the canonical path plus the parameters the route actually reads.
pub fn route(store: &ContentStore, config: &SiteConfig, url: &str) -> ApiReply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let path = urlencoding::decode(path)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| path.to_owned());
    let params = parse_query(query);

    if path.trim_end_matches('/') == "/search" {
        return search_redirect(&params);
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let Some(target) = Route::parse(&segments) else {
        return ApiError::NoRoute(path.clone()).into();
    };

    let reply = if target.is_dated() {
        dispatch(&store.snapshot(), config, target, &params)
    } else {
        let key = cache_key(&segments, target.params(), &params);
        store.cached_json(&key, |collections| dispatch(collections, config, target, &params))
    };
    reply.map_or_else(ApiReply::from, ApiReply::ok)
}

fn search_redirect(params: &Params) -> ApiReply {
    let mut form = SearchForm::default();
    form.set_term(params.get("q").cloned().unwrap_or_default());

    let mut redirect = Redirect::default();
    if form.submit(&mut redirect)
        && let Some(location) = redirect.0
    {
        return ApiReply::see_other(location);
    }

    match form.error() {
        Some(message) => {
            log!("search"; "redirect for `{}` failed", form.term());
            ApiError::SearchFailed(message.to_owned()).into()
        }
        None => ApiError::EmptySearch.into(),
    }
}

type Params = FxHashMap<String, String>;

/// API paths, parsed from the decoded path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route<'a> {
    Posts,
    Post(&'a str),
    Projects,
    Project(&'a str),
    Featured,
    Log(&'a str),
    Tags,
    Categories,
    Category(&'a str),
    Breadcrumbs,
}

impl<'a> Route<'a> {
    fn parse(segments: &[&'a str]) -> Option<Self> {
        Some(match *segments {
            ["api", "posts"] => Self::Posts,
            ["api", "posts", slug] => Self::Post(slug),
            ["api", "projects"] => Self::Projects,
            ["api", "projects", slug] => Self::Project(slug),
            ["api", "featured"] => Self::Featured,
            ["api", "logs", slug] => Self::Log(slug),
            ["api", "tags"] => Self::Tags,
            ["api", "categories"] => Self::Categories,
            ["api", "categories", slug] => Self::Category(slug),
            ["api", "breadcrumbs"] => Self::Breadcrumbs,
            _ => return None,
        })
    }

    /// Query parameters the route reads, in cache key order.
    const fn params(self) -> &'static [&'static str] {
        match self {
            Self::Posts => &["search", "tag", "category", "deep", "order"],
            Self::Projects => &["status", "order", "search"],
            Self::Project(_) => &["day", "allDays"],
            Self::Tags => &["all"],
            Self::Category(_) => &["search"],
            Self::Breadcrumbs => &["path", "capitalize"],
            Self::Post(_) | Self::Featured | Self::Log(_) | Self::Categories => &[],
        }
    }

    /// Answers that depend on today's date, such as project progress.
    const fn is_dated(self) -> bool {
        matches!(self, Self::Project(_) | Self::Featured)
    }
}

/// Canonical path plus the `known` parameters that are present, so unknown
/// parameters and their order never add cache entries.
fn cache_key(segments: &[&str], known: &[&str], params: &Params) -> String {
    let mut key = format!("/{}", segments.join("/"));
    let mut separator = '?';
    for name in known {
        if let Some(value) = params.get(*name) {
            key.push(separator);
            key.push_str(name);
            key.push('=');
            key.push_str(&urlencoding::encode(value));
            separator = '&';
        }
    }
    key
}

fn dispatch(
    collections: &Collections,
    config: &SiteConfig,
    target: Route<'_>,
    params: &Params,
) -> Result<String, ApiError> {
    let query = &config.query;
    let param = |name: &str| params.get(name).map(String::as_str);
    let flag = |name: &str| matches!(param(name), Some("true" | "1"));

    match target {
        Route::Posts => {
            let mut view = PostListView::from_search_param(param("search"));
            view.set_tag(param("tag"));
            view.set_category(Criterion::parse(param("category")).unwrap_or_default());
            view.set_deep(flag("deep"));
            view.set_order(parse_order(param("order"))?);
            to_json(&view.results(&collections.posts, query.snippet_context, query.summary_len))
        }
        Route::Post(slug) => to_json(&PostDetail::build(collections, slug)?),

        Route::Projects => {
            let mut view = ProjectListView::default();
            view.set_status(parse_status(param("status"))?);
            view.set_order(parse_order(param("order"))?);
            view.set_search(param("search").unwrap_or_default());
            to_json(&view.results(&collections.projects))
        }
        Route::Project(slug) => {
            let day = param("day")
                .filter(|day| !day.is_empty())
                .map(str::parse::<u32>)
                .transpose()
                .map_err(|err| QueryError::invalid("day", err.to_string()))?;
            to_json(&ProjectDetail::build(
                collections,
                slug,
                Utc::now(),
                query.visible_days,
                flag("allDays"),
                day,
            )?)
        }
        Route::Featured => to_json(&FeaturedView::build(
            collections,
            Utc::now(),
            query.featured_logs,
            query.featured_posts,
        )),

        Route::Log(slug) => to_json(&LogDetail::build(collections, slug)?),

        Route::Tags => {
            let mut cloud = TagCloud::new(TagCounts::from_posts(&collections.posts), query.visible_tags);
            if flag("all") {
                cloud.toggle();
            }
            to_json(&cloud.visible())
        }

        Route::Categories => {
            let categories: Vec<_> = Category::ALL
                .into_iter()
                .map(|category| CategoryEntry {
                    slug: category.slug(),
                    name: category.name(),
                })
                .collect();
            to_json(&categories)
        }
        Route::Category(slug) => {
            let mut page = CategoryPage::open(slug)?;
            page.set_search(param("search").unwrap_or_default());
            to_json(&page.results(collections, query.summary_len))
        }

        Route::Breadcrumbs => to_json(&breadcrumbs(
            param("path").unwrap_or_default(),
            flag("capitalize"),
        )),
    }
}

#[derive(Serialize)]
struct CategoryEntry {
    slug: &'static str,
    name: &'static str,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string(value)?)
}

/// Decode `a=1&b=two+words` into a map. Later keys win.
fn parse_query(query: &str) -> Params {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        content::ProjectStatus,
        query::test_support::{log, post, project},
    };
    use serde_json::Value;

    fn store() -> ContentStore {
        let mut a = post("react-blog", 1, &["react"]);
        a.title = "My React Blog".into();
        a.category = Some("coding".into());
        a.related_projects = vec!["folio".into()];
        let mut b = post("react-app", 2, &["react", "rust"]);
        b.title = "My React App".into();

        ContentStore::new(Collections {
            posts: vec![a, b],
            projects: vec![project("folio", 1, ProjectStatus::InProgress)],
            logs: vec![log("d1", "folio", 1, 2), log("orphan", "ghost", 1, 3)],
        })
    }

    fn json(reply: &ApiReply) -> Value {
        serde_json::from_str(&reply.body).unwrap()
    }

    #[test]
    fn test_parse_query() {
        let params = parse_query("search=rust+async&tag=c%2B%2B&empty=&flag");
        assert_eq!(params["search"], "rust async");
        assert_eq!(params["tag"], "c++");
        assert_eq!(params["empty"], "");
        assert_eq!(params["flag"], "");
    }

    #[test]
    fn test_posts_search() {
        let store = store();
        let config = SiteConfig::default();

        let reply = route(&store, &config, "/api/posts?search=blog+react");
        assert_eq!(reply.status, 200);
        let body = json(&reply);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["slug"], "react-blog");

        let reply = route(&store, &config, "/api/posts?tag=rust");
        assert_eq!(json(&reply)[0]["slug"], "react-app");
    }

    #[test]
    fn test_detail_routes() {
        let store = store();
        let config = SiteConfig::default();

        let post = json(&route(&store, &config, "/api/posts/react-blog"));
        assert_eq!(post["projects"][0]["slug"], "folio");

        let project = json(&route(&store, &config, "/api/projects/folio?day=1"));
        assert_eq!(project["logCount"], 1);
        assert_eq!(project["relatedPosts"][0]["slug"], "react-blog");
        assert_eq!(project["selectedLogs"][0]["slug"], "d1");
        assert_eq!(route(&store, &config, "/api/projects/folio?day=one").status, 400);

        let orphan = json(&route(&store, &config, "/api/logs/orphan"));
        assert!(orphan["project"].is_null());

        let featured = json(&route(&store, &config, "/api/featured"));
        assert_eq!(featured["project"]["slug"], "folio");
    }

    #[test]
    fn test_not_found_and_bad_params() {
        let store = store();
        let config = SiteConfig::default();

        let reply = route(&store, &config, "/api/posts/missing");
        assert_eq!(reply.status, 404);
        assert_eq!(json(&reply)["error"], "post `missing` not found");

        assert_eq!(route(&store, &config, "/api/categories/cooking").status, 404);
        assert_eq!(route(&store, &config, "/nope").status, 404);
        assert_eq!(route(&store, &config, "/api/projects?status=done").status, 400);
        assert_eq!(route(&store, &config, "/api/projects?order=sideways").status, 400);
        assert_eq!(store.cached_len(), 0);
    }

    #[test]
    fn test_success_is_cached_until_replace() {
        let store = store();
        let config = SiteConfig::default();

        route(&store, &config, "/api/tags");
        route(&store, &config, "/api/tags");
        assert_eq!(store.cached_len(), 1);

        store.replace(Collections::default());
        assert_eq!(store.cached_len(), 0);
        assert_eq!(route(&store, &config, "/api/tags").body, "[]");
    }

    #[test]
    fn test_cache_key_ignores_unknown_params() {
        let store = store();
        let config = SiteConfig::default();

        for i in 0..50 {
            route(&store, &config, &format!("/api/tags?junk={i}"));
        }
        route(&store, &config, "/api/posts?order=oldest&tag=react");
        route(&store, &config, "/api/posts?tag=react&order=oldest&utm=x");
        assert_eq!(store.cached_len(), 2);

        assert_eq!(
            cache_key(&["api", "posts"], Route::Posts.params(), &parse_query("utm=1&tag=c%2B%2B&search=a+b")),
            "/api/posts?search=a%20b&tag=c%2B%2B"
        );
    }

    #[test]
    fn test_dated_routes_are_not_cached() {
        let store = store();
        let config = SiteConfig::default();

        assert_eq!(route(&store, &config, "/api/projects/folio").status, 200);
        assert_eq!(route(&store, &config, "/api/featured").status, 200);
        assert_eq!(store.cached_len(), 0);
    }

    #[test]
    fn test_project_named_featured() {
        let store = ContentStore::new(Collections {
            projects: vec![project("featured", 1, ProjectStatus::Planned)],
            ..Default::default()
        });
        let config = SiteConfig::default();

        let reply = route(&store, &config, "/api/projects/featured");
        assert_eq!(reply.status, 200);
        assert_eq!(json(&reply)["slug"], "featured");
    }

    #[test]
    fn test_search_redirect() {
        let store = store();
        let config = SiteConfig::default();

        let reply = route(&store, &config, "/search?q=rust+async");
        assert_eq!(reply.status, 303);
        assert_eq!(reply.location.as_deref(), Some("/api/posts?search=rust%20async"));

        assert_eq!(route(&store, &config, "/search?q=+").status, 400);
        assert_eq!(route(&store, &config, "/search").status, 400);
    }

    #[test]
    fn test_search_redirect_failure_reports_form_error() {
        let store = store();
        let config = SiteConfig::default();

        let reply = route(&store, &config, &format!("/search?q={}", "x".repeat(MAX_REDIRECT_LEN)));
        assert_eq!(reply.status, 400);
        assert!(reply.location.is_none());
        assert_eq!(json(&reply)["error"], "Failed to perform search. Please try again.");
    }

    #[test]
    fn test_categories_and_breadcrumbs() {
        let store = store();
        let config = SiteConfig::default();

        let categories = json(&route(&store, &config, "/api/categories"));
        assert_eq!(categories.as_array().unwrap().len(), 8);

        let coding = json(&route(&store, &config, "/api/categories/coding?search=react"));
        assert_eq!(coding["totalPosts"], 1);
        assert_eq!(coding["matched"], 1);

        let crumbs = json(&route(
            &store,
            &config,
            "/api/breadcrumbs?path=%2Fpost%2Fmy-first-post&capitalize=true",
        ));
        assert_eq!(crumbs[1]["label"], "My First Post");
        assert_eq!(crumbs[1]["isLast"], true);
    }
}
