//! Project list, project detail and the featured project.

use super::timeline::{TimelineEntry, TimelineView};
use crate::{
    content::{Collections, Log, Post, Project, ProjectStatus},
    query::{
        Criterion, Featured, ProjectFilter, ProjectProgress, QueryError, SearchQuery, Segment,
        SortOrder, featured_project, highlight, logs_for_project, project_progress,
        related_posts, sort_by_date,
    },
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A project in a result list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHit<'a> {
    #[serde(flatten)]
    pub project: &'a Project,
    pub title_segments: Vec<Segment<'a>>,
    pub summary_segments: Vec<Segment<'a>>,
}

impl<'a> ProjectHit<'a> {
    pub fn new(project: &'a Project, query: &SearchQuery) -> Self {
        Self {
            project,
            title_segments: highlight(&project.title, query.raw()),
            summary_segments: highlight(&project.summary, query.raw()),
        }
    }
}

/// Project grid: status filter, sort order and search.
#[derive(Debug, Clone, Default)]
pub struct ProjectListView {
    status: Criterion<ProjectStatus>,
    order: SortOrder,
    search: String,
}

impl ProjectListView {
    pub fn set_status(&mut self, status: Criterion<ProjectStatus>) {
        self.status = status;
    }

    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn results<'a>(&self, projects: &'a [Project]) -> Vec<ProjectHit<'a>> {
        let filter = ProjectFilter {
            status: self.status.clone(),
            search: SearchQuery::parse(&self.search),
            ..Default::default()
        };

        sort_by_date(&filter.apply(projects), self.order)
            .into_iter()
            .map(|project| ProjectHit::new(project, &filter.search))
            .collect()
    }
}

/// A project page: body, progress, day timeline and related posts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail<'a> {
    #[serde(flatten)]
    pub project: &'a Project,
    pub html: &'a str,
    pub progress: ProjectProgress,
    /// Total number of logs.
    pub log_count: usize,
    pub timeline: Vec<TimelineEntry<'a>>,
    pub expanded: bool,
    /// Days left out of `timeline` while collapsed.
    pub hidden_days: usize,
    pub selected_day: Option<u32>,
    /// Every log of the selected day, newest first.
    pub selected_logs: Vec<&'a Log>,
    pub related_posts: Vec<&'a Post>,
}

impl<'a> ProjectDetail<'a> {
    /// Build the page for `slug`. `visible_days` bounds the timeline unless
    /// `all_days` is set; `day` opens one day of the timeline.
    pub fn build(
        collections: &'a Collections,
        slug: &str,
        today: DateTime<Utc>,
        visible_days: usize,
        all_days: bool,
        day: Option<u32>,
    ) -> Result<Self, QueryError> {
        let project = collections
            .project(slug)
            .ok_or_else(|| QueryError::not_found("project", slug))?;

        let logs = logs_for_project(&collections.logs, slug);
        let progress = project_progress(project, &logs, today);
        let log_count = logs.len();

        let mut timeline = TimelineView::new(logs, visible_days);
        if all_days {
            timeline.toggle_expanded();
        }
        if let Some(day) = day {
            timeline.select_day(day);
        }

        Ok(Self {
            project,
            html: &project.body.html,
            progress,
            log_count,
            timeline: timeline.entries(),
            expanded: timeline.is_expanded(),
            hidden_days: timeline.hidden_days(),
            selected_day: timeline.selected_day(),
            selected_logs: timeline.selected_logs().to_vec(),
            related_posts: related_posts(&collections.posts, slug),
        })
    }
}

/// The newest project with previews of its logs and posts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedView<'a> {
    pub project: &'a Project,
    pub progress: ProjectProgress,
    pub logs: Vec<&'a Log>,
    pub posts: Vec<&'a Post>,
}

impl<'a> FeaturedView<'a> {
    /// `None` when there are no projects.
    pub fn build(
        collections: &'a Collections,
        today: DateTime<Utc>,
        max_logs: usize,
        max_posts: usize,
    ) -> Option<Self> {
        let Featured {
            project,
            logs,
            posts,
        } = featured_project(collections, max_logs, max_posts)?;

        // Progress needs the latest log even when the preview is empty
        let all_logs = logs_for_project(&collections.logs, &project.slug);
        let progress = project_progress(project, &all_logs, today);

        Some(Self {
            project,
            progress,
            logs,
            posts,
        })
    }
}
