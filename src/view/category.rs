//! Categories, accent theming and the category page.

use super::{PostHit, ProjectHit};
use crate::{
    content::Collections,
    query::{
        Criterion, QueryError, SearchQuery,
        filter::{Categorized, by_category},
    },
};
use colored::Color;
use serde::{Serialize, Serializer};
use std::fmt;

/// Accent used outside any category (#FF6F61).
pub const DEFAULT_ACCENT: Color = Color::TrueColor {
    r: 255,
    g: 111,
    b: 97,
};

/// The fixed set of content categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Coding,
    Design,
    Health,
    Life,
    Productivity,
    SelfHelp,
    Travel,
    Writing,
}

impl Category {
    pub const ALL: [Self; 8] = [
        Self::Coding,
        Self::Design,
        Self::Health,
        Self::Life,
        Self::Productivity,
        Self::SelfHelp,
        Self::Travel,
        Self::Writing,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Coding => "coding",
            Self::Design => "design",
            Self::Health => "health",
            Self::Life => "life",
            Self::Productivity => "productivity",
            Self::SelfHelp => "self-help",
            Self::Travel => "travel",
            Self::Writing => "writing",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Coding => "Coding",
            Self::Design => "Design",
            Self::Health => "Health",
            Self::Life => "Life",
            Self::Productivity => "Productivity",
            Self::SelfHelp => "Self-Help",
            Self::Travel => "Travel",
            Self::Writing => "Writing",
        }
    }

    /// Accent color for highlights and headings.
    pub const fn accent(self) -> Color {
        match self {
            Self::Coding => Color::TrueColor { r: 59, g: 130, b: 246 },
            Self::Design => Color::TrueColor { r: 168, g: 85, b: 247 },
            Self::Health => Color::TrueColor { r: 34, g: 197, b: 94 },
            Self::Life => Color::TrueColor { r: 234, g: 179, b: 8 },
            Self::Productivity => Color::TrueColor { r: 249, g: 115, b: 22 },
            Self::SelfHelp => Color::TrueColor { r: 236, g: 72, b: 153 },
            Self::Travel => Color::TrueColor { r: 99, g: 102, b: 241 },
            Self::Writing => Color::TrueColor { r: 20, g: 184, b: 166 },
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.slug() == slug)
    }

    /// Category of a record, when it names a known one.
    pub fn of(item: &impl Categorized) -> Option<Self> {
        item.category().and_then(Self::from_slug)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

/// The category currently shaping presentation, scoped to one view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeContext {
    current: Option<Category>,
}

impl ThemeContext {
    pub const fn current(&self) -> Option<Category> {
        self.current
    }

    /// Apply `category`, or fall back to the default theme for `None`.
    pub fn set_current(&mut self, category: Option<Category>) {
        match category {
            Some(category) => self.current = Some(category),
            None => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn accent(&self) -> Color {
        self.current().map_or(DEFAULT_ACCENT, Category::accent)
    }
}

/// Posts and projects of one category, narrowed by a search term.
#[derive(Debug, Clone)]
pub struct CategoryPage {
    category: Category,
    search: SearchQuery,
}

impl CategoryPage {
    /// Open the page for `slug`. Unknown slugs are not found.
    pub fn open(slug: &str) -> Result<Self, QueryError> {
        let category =
            Category::from_slug(slug).ok_or_else(|| QueryError::not_found("category", slug))?;
        Ok(Self {
            category,
            search: SearchQuery::default(),
        })
    }

    pub fn set_search(&mut self, raw: &str) {
        self.search = SearchQuery::parse(raw);
    }

    /// Theme with this page's category applied.
    pub fn theme(&self) -> ThemeContext {
        let mut theme = ThemeContext::default();
        theme.set_current(Some(self.category));
        theme
    }

    pub fn results<'a>(&self, collections: &'a Collections, summary_len: usize) -> CategoryResults<'a> {
        let criterion = Criterion::Only(self.category.slug().to_owned());
        let posts = by_category(&collections.posts, &criterion);
        let projects = by_category(&collections.projects, &criterion);

        let total_posts = posts.len();
        let total_projects = projects.len();

        let posts: Vec<PostHit<'a>> = posts
            .into_iter()
            .filter(|post| self.search.matches(*post, false))
            .map(|post| PostHit::new(post, &self.search, None, summary_len))
            .collect();
        let projects: Vec<ProjectHit<'a>> = projects
            .into_iter()
            .filter(|project| self.search.matches(*project, false))
            .map(|project| ProjectHit::new(project, &self.search))
            .collect();

        CategoryResults {
            category: self.category,
            name: self.category.name(),
            search: self.search.raw().to_owned(),
            total_posts,
            total_projects,
            matched: posts.len() + projects.len(),
            posts,
            projects,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResults<'a> {
    pub category: Category,
    pub name: &'static str,
    pub search: String,
    pub total_posts: usize,
    pub total_projects: usize,
    /// Posts plus projects matching the search.
    pub matched: usize,
    pub posts: Vec<PostHit<'a>>,
    pub projects: Vec<ProjectHit<'a>>,
}
