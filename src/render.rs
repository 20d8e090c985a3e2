//! Terminal rendering of view models.
//!
//! Every function returns a `String` so the command layer decides where it
//! goes. Highlighted segments take the accent color of the active theme.

use crate::{
    query::{Segment, TagCloud},
    utils::date::long_date,
    view::{
        CategoryResults, FeaturedView, LogDetail, PostDetail, PostHit, ProjectDetail,
        ProjectHit, ThemeContext,
    },
};
use colored::{Color, Colorize};
use std::fmt::Write;

/// Join segments, painting highlighted ones in `accent`.
pub fn segments(segments: &[Segment<'_>], accent: Color) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.highlighted {
                segment.text.color(accent).bold().to_string()
            } else {
                segment.text.to_owned()
            }
        })
        .collect()
}

pub fn post_hits(hits: &[PostHit<'_>], theme: &ThemeContext) -> String {
    if hits.is_empty() {
        return format!("{}\n", "No posts found.".dimmed());
    }

    let accent = theme.accent();
    let mut out = String::new();
    for hit in hits {
        let post = hit.post;
        writeln!(out, "{}", segments(&hit.title_segments, accent).bold()).ok();
        writeln!(
            out,
            "  {}  {} min read  {}",
            long_date(post.date).dimmed(),
            post.reading_time,
            post.url.dimmed()
        )
        .ok();
        if !hit.preview_segments.is_empty() {
            let mut preview = segments(&hit.preview_segments, accent);
            if hit.preview != post.summary {
                preview.push_str("...");
            }
            writeln!(out, "  {preview}").ok();
        }
        if !hit.snippet_segments.is_empty() {
            writeln!(out, "  {}", segments(&hit.snippet_segments, accent).italic()).ok();
        }
        if !post.tags.is_empty() {
            writeln!(out, "  {}", tag_list(&post.tags)).ok();
        }
        out.push('\n');
    }
    out
}

pub fn project_hits(hits: &[ProjectHit<'_>], theme: &ThemeContext) -> String {
    if hits.is_empty() {
        return format!("{}\n", "No projects found.".dimmed());
    }

    let accent = theme.accent();
    let mut out = String::new();
    for hit in hits {
        let project = hit.project;
        writeln!(
            out,
            "{}  [{}]",
            segments(&hit.title_segments, accent).bold(),
            project.status
        )
        .ok();
        writeln!(out, "  started {}  {}", long_date(project.date).dimmed(), project.url.dimmed()).ok();
        if !hit.summary_segments.is_empty() {
            writeln!(out, "  {}", segments(&hit.summary_segments, accent)).ok();
        }
        if !project.technologies.is_empty() {
            writeln!(out, "  {}", project.technologies.join(", ").dimmed()).ok();
        }
        out.push('\n');
    }
    out
}

/// `link` is where the post is published.
pub fn post_detail(detail: &PostDetail<'_>, link: &str) -> String {
    let post = detail.post;
    let mut out = String::new();
    writeln!(out, "{}", post.title.bold()).ok();
    writeln!(out, "{}  {} min read  {}", long_date(post.date).dimmed(), post.reading_time, link.dimmed()).ok();
    if !post.tags.is_empty() {
        writeln!(out, "{}", tag_list(&post.tags)).ok();
    }
    writeln!(out, "\n{}", post.body.raw.trim()).ok();
    if !detail.projects.is_empty() {
        writeln!(out, "\n{}", "Related projects".bold()).ok();
        for project in &detail.projects {
            writeln!(out, "  {}  {}", project.title, project.url.dimmed()).ok();
        }
    }
    out
}

pub fn project_detail(detail: &ProjectDetail<'_>, theme: &ThemeContext) -> String {
    let project = detail.project;
    let accent = theme.accent();
    let mut out = String::new();

    writeln!(out, "{}  [{}]", project.title.bold(), project.status).ok();
    writeln!(out, "Started {}", long_date(project.date)).ok();
    let label = if detail.progress.completed {
        "to complete"
    } else {
        "since start"
    };
    writeln!(out, "{} days {label}", detail.progress.days.to_string().color(accent)).ok();
    if !project.summary.is_empty() {
        writeln!(out, "\n{}", project.summary).ok();
    }
    for (name, link) in [("source", &project.github), ("demo", &project.demo)] {
        if let Some(link) = link {
            writeln!(out, "{name}: {link}").ok();
        }
    }

    if !detail.timeline.is_empty() {
        writeln!(out, "\n{}", "Latest progress".bold()).ok();
        for entry in &detail.timeline {
            let updates = if entry.count > 1 {
                format!(" ({} updates)", entry.count)
            } else {
                String::new()
            };
            writeln!(
                out,
                "  {}{}  {}",
                format!("Day {}", entry.day).color(accent),
                updates.dimmed(),
                entry.log.title
            )
            .ok();
        }
        if detail.hidden_days > 0 {
            writeln!(out, "  {}", format!("Show {} more (--all-days)", detail.hidden_days).dimmed()).ok();
        }
    }

    if let Some(day) = detail.selected_day {
        let count = detail.selected_logs.len();
        let noun = if count == 1 { "update" } else { "updates" };
        writeln!(out, "\n{}", format!("Day {day}: {count} {noun}").bold()).ok();
        for log in &detail.selected_logs {
            writeln!(out, "  {}  {}", log.title, long_date(log.date).dimmed()).ok();
            if !log.progress.is_empty() {
                writeln!(out, "    {}", log.progress).ok();
            }
        }
    }

    if !detail.related_posts.is_empty() {
        writeln!(out, "\n{}", "Related posts".bold()).ok();
        for post in &detail.related_posts {
            writeln!(out, "  {}  {}", post.title, long_date(post.date).dimmed()).ok();
        }
    }
    out
}

pub fn featured(featured: &FeaturedView<'_>, theme: &ThemeContext) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{} {}  [{}]",
        "Featured:".color(theme.accent()).bold(),
        featured.project.title.bold(),
        featured.project.status
    )
    .ok();
    for log in &featured.logs {
        writeln!(out, "  Day {}  {}", log.day, log.title).ok();
    }
    for post in &featured.posts {
        writeln!(out, "  {}  {}", post.title, post.url.dimmed()).ok();
    }
    out
}

pub fn log_detail(detail: &LogDetail<'_>) -> String {
    let log = detail.log;
    let mut out = String::new();
    writeln!(out, "{}", log.title.bold()).ok();
    writeln!(out, "Day {}  {}", log.day, long_date(log.date).dimmed()).ok();
    match detail.project {
        Some(project) => writeln!(out, "Project: {}  {}", project.title, project.url.dimmed()).ok(),
        None => writeln!(out, "Project: {}", "none".dimmed()).ok(),
    };
    if !log.progress.is_empty() {
        writeln!(out, "\n{}", log.progress).ok();
    }
    if !log.challenges.is_empty() {
        writeln!(out, "\n{}", "Challenges".bold()).ok();
        for challenge in &log.challenges {
            writeln!(out, "  - {challenge}").ok();
        }
    }
    if detail.day_total > 1 {
        writeln!(
            out,
            "\n{}",
            format!("Update {} of {} on day {}", detail.position + 1, detail.day_total, log.day).bold()
        )
        .ok();
        for (label, other) in [("previous", detail.previous), ("next", detail.next)] {
            if let Some(other) = other {
                writeln!(out, "  {label}: {}  {}", other.title, other.url.dimmed()).ok();
            }
        }
    }
    writeln!(out, "\n{}", log.body.raw.trim()).ok();
    out
}

pub fn tag_cloud(cloud: &TagCloud) -> String {
    let mut out = String::new();
    for entry in cloud.visible() {
        writeln!(out, "{:>4}  {}", entry.count, entry.tag).ok();
    }
    if cloud.is_collapsible() && !cloud.show_all() {
        writeln!(out, "{}", format!("{} more (--all)", cloud.hidden()).dimmed()).ok();
    }
    out
}

pub fn category(results: &CategoryResults<'_>, theme: &ThemeContext) -> String {
    let mut out = String::new();
    writeln!(out, "{}", results.name.color(theme.accent()).bold()).ok();
    if results.search.is_empty() {
        writeln!(
            out,
            "{} posts, {} projects\n",
            results.total_posts, results.total_projects
        )
        .ok();
    } else {
        writeln!(
            out,
            "{} of {} items match \"{}\"\n",
            results.matched,
            results.total_posts + results.total_projects,
            results.search
        )
        .ok();
    }
    out.push_str(&post_hits(&results.posts, theme));
    out.push_str(&project_hits(&results.projects, theme));
    out
}

fn tag_list(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ")
        .dimmed()
        .to_string()
}
