//! Equality filters over tags, categories and project status.
//!
//! Every filter is a [`Criterion`]: `All` passes everything, `Only(v)`
//! keeps records whose field equals `v`. Active filters compose by AND.

use super::search::SearchQuery;
use crate::content::{Post, Project, ProjectStatus};
use std::str::FromStr;

/// A single filter value, or no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Criterion<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Criterion<T> {
    /// Whether a record passes, given a test for the selected value.
    #[inline]
    pub fn admits(&self, test: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Self::All => true,
            Self::Only(value) => test(value),
        }
    }
}

impl<T: FromStr> Criterion<T> {
    /// Parse a raw parameter. Absent, empty or `all` means no filtering.
    pub fn parse(raw: Option<&str>) -> Result<Self, T::Err> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Ok(Self::All),
            Some(value) => value.parse().map(Self::Only),
        }
    }
}

impl<T> From<Option<T>> for Criterion<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

/// Records carrying an optional category slug.
pub trait Categorized {
    fn category(&self) -> Option<&str>;
}

impl Categorized for Post {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Categorized for Project {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Records in `category`.
pub fn by_category<'a, T: Categorized>(items: &'a [T], category: &Criterion<String>) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| category.admits(|slug| item.category() == Some(slug.as_str())))
        .collect()
}

/// Combined post filter: tag (exact, case-sensitive), category and search.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub tag: Criterion<String>,
    pub category: Criterion<String>,
    pub search: SearchQuery,
    /// Also search post bodies.
    pub deep: bool,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        self.tag.admits(|tag| post.tags.contains(tag))
            && self
                .category
                .admits(|slug| post.category() == Some(slug.as_str()))
            && self.search.matches(post, self.deep)
    }

    /// Matching posts in input order.
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts.iter().filter(|post| self.matches(post)).collect()
    }
}

/// Combined project filter: status, category and search.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Criterion<ProjectStatus>,
    pub category: Criterion<String>,
    pub search: SearchQuery,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.status.admits(|status| project.status == *status)
            && self
                .category
                .admits(|slug| project.category() == Some(slug.as_str()))
            && self.search.matches(project, false)
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|project| self.matches(project)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_support::{post, project};

    #[test]
    fn test_criterion_parse() {
        assert_eq!(Criterion::<String>::parse(None), Ok(Criterion::All));
        assert_eq!(Criterion::<String>::parse(Some("")), Ok(Criterion::All));
        assert_eq!(Criterion::<String>::parse(Some("all")), Ok(Criterion::All));
        assert_eq!(
            Criterion::<String>::parse(Some("rust")),
            Ok(Criterion::Only("rust".to_string()))
        );
        assert_eq!(
            Criterion::<ProjectStatus>::parse(Some("completed")),
            Ok(Criterion::Only(ProjectStatus::Completed))
        );
        assert!(Criterion::<ProjectStatus>::parse(Some("done")).is_err());
    }

    #[test]
    fn test_all_passes_collection_unchanged() {
        let posts = vec![post("b", 2, &["x"]), post("a", 1, &[])];
        let hits = PostFilter::default().apply(&posts);
        let slugs: Vec<_> = hits.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a"]);
    }

    #[test]
    fn test_tag_is_case_sensitive() {
        let posts = vec![post("a", 1, &["React"]), post("b", 2, &["react"])];
        let filter = PostFilter {
            tag: Criterion::Only("React".into()),
            ..Default::default()
        };
        let hits = filter.apply(&posts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "a");
    }

    #[test]
    fn test_by_category() {
        let mut coding = post("a", 1, &[]);
        coding.category = Some("coding".into());
        let posts = vec![coding, post("b", 2, &[])];

        let hits = by_category(&posts, &Criterion::Only("coding".into()));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "a");
    }

    #[test]
    fn test_status_filter() {
        let projects = vec![
            project("a", 1, ProjectStatus::Completed),
            project("b", 2, ProjectStatus::Planned),
            project("c", 3, ProjectStatus::Completed),
        ];
        let filter = ProjectFilter {
            status: Criterion::Only(ProjectStatus::Completed),
            ..Default::default()
        };
        let hits = filter.apply(&projects);
        let slugs: Vec<_> = hits.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "c"]);
    }

    #[test]
    fn test_project_filter_is_intersection() {
        let mut blog = project("blog", 1, ProjectStatus::InProgress);
        blog.title = "React blog".into();
        let mut app = project("app", 2, ProjectStatus::Completed);
        app.title = "React app".into();
        let projects = vec![blog, app];

        let filter = ProjectFilter {
            status: Criterion::Only(ProjectStatus::Completed),
            search: SearchQuery::parse("react"),
            ..Default::default()
        };
        let hits = filter.apply(&projects);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "app");
    }

    #[test]
    fn test_post_filter_tag_and_search() {
        let mut first = post("first", 1, &["rust"]);
        first.title = "Ownership notes".into();
        let mut second = post("second", 2, &["go"]);
        second.title = "Ownership in Go".into();
        let posts = vec![first, second];

        let filter = PostFilter {
            tag: Criterion::Only("rust".into()),
            search: SearchQuery::parse("ownership"),
            ..Default::default()
        };
        let hits = filter.apply(&posts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "first");
    }
}
