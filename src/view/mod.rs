//! View state and view models.
//!
//! Each view is an explicit state object with one setter per slice (search
//! term, selected tag, status, order, expanded flags). A view never owns
//! content: it is applied to a [`Collections`](crate::content::Collections)
//! snapshot and returns serializable results borrowing from it.
//!
//! ```text
//! CLI flags / query params ──► view state ──► query fns ──► *Hit / *Detail
//!                              (setters)     (pure)        (Serialize)
//! ```

mod breadcrumbs;
mod category;
mod posts;
mod projects;
mod search_form;
mod timeline;

pub use breadcrumbs::breadcrumbs;
pub use category::{Category, CategoryPage, CategoryResults, ThemeContext};
pub use posts::{PostDetail, PostHit, PostListView};
pub use projects::{FeaturedView, ProjectDetail, ProjectHit, ProjectListView};
pub use search_form::{NavigationError, Navigator, SearchForm};
pub use timeline::LogDetail;
