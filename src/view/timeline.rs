//! Project timeline, same-day log carousel and log detail.

use crate::{
    content::{Collections, Log, Project},
    query::{DayGroups, QueryError, logs_for_project, project_for_log},
};
use serde::Serialize;

/// One collapsed day on the timeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry<'a> {
    pub day: u32,
    /// Most recent log of the day.
    pub log: &'a Log,
    /// Logs recorded that day.
    pub count: usize,
}

/// Day-grouped timeline of one project's logs.
///
/// Shows the first `limit` days (highest first) until expanded. At most
/// one day is selected at a time; selecting it again deselects it.
#[derive(Debug, Clone)]
pub struct TimelineView<'a> {
    groups: DayGroups<'a>,
    limit: usize,
    expanded: bool,
    selected: Option<u32>,
}

impl<'a> TimelineView<'a> {
    /// `logs` should be newest first so each day leads with its latest log.
    pub fn new(logs: impl IntoIterator<Item = &'a Log>, limit: usize) -> Self {
        Self {
            groups: DayGroups::from_logs(logs),
            limit,
            expanded: false,
            selected: None,
        }
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn visible_days(&self) -> Vec<u32> {
        let days = self.groups.days();
        if self.expanded {
            days
        } else {
            days.into_iter().take(self.limit).collect()
        }
    }

    /// Days hidden while collapsed, the `N` in "Show N More".
    pub fn hidden_days(&self) -> usize {
        self.groups.len() - self.visible_days().len()
    }

    pub fn entries(&self) -> Vec<TimelineEntry<'a>> {
        self.visible_days()
            .into_iter()
            .filter_map(|day| {
                let log = self.groups.representative(day)?;
                Some(TimelineEntry {
                    day,
                    log,
                    count: self.groups.logs_on(day).len(),
                })
            })
            .collect()
    }

    /// Toggle the selection of `day`. Unknown days clear the selection.
    pub fn select_day(&mut self, day: u32) {
        self.selected = match self.selected {
            Some(current) if current == day => None,
            _ if self.groups.logs_on(day).is_empty() => None,
            _ => Some(day),
        };
    }

    pub const fn selected_day(&self) -> Option<u32> {
        self.selected
    }

    /// Logs of the selected day, empty without a selection.
    pub fn selected_logs(&self) -> &[&'a Log] {
        self.selected
            .map(|day| self.groups.logs_on(day))
            .unwrap_or_default()
    }
}

/// Cycles through logs sharing a day, wrapping at both ends.
#[derive(Debug, Clone)]
pub struct DayCarousel<'a> {
    logs: Vec<&'a Log>,
    index: usize,
}

impl<'a> DayCarousel<'a> {
    /// Carousel over `log`'s day, positioned on `log`.
    pub fn starting_at(groups: &DayGroups<'a>, log: &Log) -> Self {
        let logs = groups.logs_on(log.day);
        let index = logs
            .iter()
            .position(|other| other.slug == log.slug)
            .unwrap_or(0);
        Self {
            logs: logs.to_vec(),
            index,
        }
    }

    pub fn current(&self) -> Option<&'a Log> {
        self.logs.get(self.index).copied()
    }

    pub fn forward(&mut self) -> Option<&'a Log> {
        if !self.logs.is_empty() {
            self.index = (self.index + 1) % self.logs.len();
        }
        self.current()
    }

    pub fn back(&mut self) -> Option<&'a Log> {
        if !self.logs.is_empty() {
            self.index = (self.index + self.logs.len() - 1) % self.logs.len();
        }
        self.current()
    }

    pub const fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }
}

/// A log page with its project (if it resolves) and same-day siblings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogDetail<'a> {
    #[serde(flatten)]
    pub log: &'a Log,
    pub html: &'a str,
    pub project: Option<&'a Project>,
    /// Other logs of the same project and day, newest first.
    pub same_day: Vec<&'a Log>,
    /// Zero-based position among the day's logs.
    pub position: usize,
    pub day_total: usize,
    /// Neighbours in the day's carousel. `None` when the log is alone.
    pub previous: Option<&'a Log>,
    pub next: Option<&'a Log>,
}

impl<'a> LogDetail<'a> {
    pub fn build(collections: &'a Collections, slug: &str) -> Result<Self, QueryError> {
        let log = collections
            .log(slug)
            .ok_or_else(|| QueryError::not_found("log", slug))?;

        let groups = DayGroups::from_logs(logs_for_project(&collections.logs, &log.project_id));
        let same_day = groups
            .logs_on(log.day)
            .iter()
            .filter(|other| other.slug != log.slug)
            .copied()
            .collect();

        let mut carousel = DayCarousel::starting_at(&groups, log);
        let position = carousel.position();
        let day_total = carousel.len();
        let (previous, next) = if day_total > 1 {
            let next = carousel.forward();
            carousel.back();
            (carousel.back(), next)
        } else {
            (None, None)
        };

        Ok(Self {
            log,
            html: &log.body.html,
            project: project_for_log(&collections.projects, log),
            same_day,
            position,
            day_total,
            previous,
            next,
        })
    }
}
