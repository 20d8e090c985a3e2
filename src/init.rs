//! Site initialization module.
//!
//! Writes a default `folio.toml` and one sample post, project and log so
//! every query command has something to show.

use crate::{config::SiteConfig, content::ContentKind, log};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::{fs, path::Path};

/// Slug shared by the sample project and its log.
const SAMPLE_PROJECT: &str = "my-portfolio";

/// Create a new site under the configured root.
pub fn new_site(config: &SiteConfig) -> Result<()> {
    if config.config_path.exists() {
        bail!(
            "Config file `{}` already exists. Remove it manually or init in a different path.",
            config.config_path.display()
        );
    }

    let today = Utc::now().format("%Y-%m-%d").to_string();
    let samples = [
        (ContentKind::Post, "hello-world", sample_post(&today)),
        (ContentKind::Project, SAMPLE_PROJECT, sample_project(&today)),
        (ContentKind::Log, "my-portfolio-day-1", sample_log(&today)),
    ];

    let ext = config
        .content
        .extensions
        .first()
        .map_or("mdx", String::as_str);
    for (kind, slug, source) in &samples {
        let dir = config.content.dir_for(*kind);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        write_new(&dir.join(format!("{slug}.{ext}")), source)?;
    }

    init_default_config(config)?;
    log!("init"; "created site at {}", config.get_root().display());
    Ok(())
}

/// Write the default configuration file
fn init_default_config(config: &SiteConfig) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    if let Some(parent) = config.config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config.config_path, content)
        .with_context(|| format!("Failed to write {}", config.config_path.display()))
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        bail!(
            "Path `{}` already exists. Try `folio init <SITE_NAME>` instead.",
            path.display()
        );
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn sample_post(date: &str) -> String {
    format!(
        "---
title: Hello, World
date: {date}
summary: The first post on this site.
tags: [meta]
category: writing
relatedProjects: [{SAMPLE_PROJECT}]
---

Welcome! Edit this file or add new ones next to it.
"
    )
}

fn sample_project(date: &str) -> String {
    format!(
        "---
title: My Portfolio
date: {date}
summary: The site you are looking at.
status: in-progress
technologies: [markdown]
category: coding
---

Notes about the project go here.
"
    )
}

fn sample_log(date: &str) -> String {
    format!(
        "---
title: Getting started
date: {date}
projectId: {SAMPLE_PROJECT}
day: 1
progress: Set up the content folders.
challenges: []
---

Progress logs show up on the project timeline.
"
    )
}
