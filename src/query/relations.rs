//! Joins between projects, logs and posts.
//!
//! Logs reference a project by slug (`project_id`), posts reference zero or
//! more projects (`related_projects`). References that do not resolve are
//! treated as absent.

use super::sort::{SortOrder, sort_by_date};
use crate::{
    content::{Collections, Log, Post, Project, ProjectStatus},
    utils::date::days_between,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Logs of `project`, newest first.
pub fn logs_for_project<'a>(logs: &'a [Log], project: &str) -> Vec<&'a Log> {
    let owned: Vec<&Log> = logs.iter().filter(|log| log.project_id == project).collect();
    sort_by_date(&owned, SortOrder::Newest)
}

/// Posts listing `project` among their related projects, newest first.
pub fn related_posts<'a>(posts: &'a [Post], project: &str) -> Vec<&'a Post> {
    let related: Vec<&Post> = posts
        .iter()
        .filter(|post| post.related_projects.iter().any(|slug| slug == project))
        .collect();
    sort_by_date(&related, SortOrder::Newest)
}

/// The project a log belongs to, if it exists.
pub fn project_for_log<'a>(projects: &'a [Project], log: &Log) -> Option<&'a Project> {
    projects.iter().find(|project| project.slug == log.project_id)
}

/// Logs grouped by day number.
///
/// Within a day, logs keep their input order, so grouping a newest-first
/// list puts the most recent log of each day first.
#[derive(Debug, Clone, Default)]
pub struct DayGroups<'a> {
    groups: BTreeMap<u32, Vec<&'a Log>>,
}

impl<'a> DayGroups<'a> {
    pub fn from_logs(logs: impl IntoIterator<Item = &'a Log>) -> Self {
        let mut groups: BTreeMap<u32, Vec<&'a Log>> = BTreeMap::new();
        for log in logs {
            groups.entry(log.day).or_default().push(log);
        }
        Self { groups }
    }

    /// Distinct day numbers, highest first.
    pub fn days(&self) -> Vec<u32> {
        self.groups.keys().rev().copied().collect()
    }

    /// Logs recorded on `day`; empty for unknown days.
    pub fn logs_on(&self, day: u32) -> &[&'a Log] {
        self.groups.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    /// The log shown for `day` when the day is collapsed to one entry.
    pub fn representative(&self, day: u32) -> Option<&'a Log> {
        self.logs_on(day).first().copied()
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.groups.len()
    }
}

/// How long a project has been running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    pub days: i64,
    /// `days` is the total duration rather than time since start.
    pub completed: bool,
}

/// Days since `project` started, or, when completed, days from its start to
/// its latest log. `logs` must be newest first.
pub fn project_progress(project: &Project, logs: &[&Log], today: DateTime<Utc>) -> ProjectProgress {
    match project.status {
        ProjectStatus::Completed => {
            let finished = logs.first().map_or(project.date, |log| log.date);
            ProjectProgress {
                days: days_between(project.date, finished),
                completed: true,
            }
        }
        _ => ProjectProgress {
            days: days_between(project.date, today),
            completed: false,
        },
    }
}

/// The newest project with a preview of its latest logs and related posts.
#[derive(Debug, Clone)]
pub struct Featured<'a> {
    pub project: &'a Project,
    pub logs: Vec<&'a Log>,
    pub posts: Vec<&'a Post>,
}

/// Feature the most recent project. `None` without projects.
pub fn featured_project(
    collections: &Collections,
    max_logs: usize,
    max_posts: usize,
) -> Option<Featured<'_>> {
    let projects: Vec<&Project> = collections.projects.iter().collect();
    let project = sort_by_date(&projects, SortOrder::Newest).into_iter().next()?;

    let mut logs = logs_for_project(&collections.logs, &project.slug);
    logs.truncate(max_logs);
    let mut posts = related_posts(&collections.posts, &project.slug);
    posts.truncate(max_posts);

    Some(Featured {
        project,
        logs,
        posts,
    })
}
