//! Slug derivation for content files.
//!
//! A slug is the source file name without its extension
//! (`content/post/hello-world.mdx` → `hello-world`), optionally passed
//! through a sanitizer depending on `[content].slug`.

use crate::config::SlugMode;
use anyhow::{Result, anyhow};
use std::path::Path;

/// Characters forbidden in URL path segments
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '(', ')', '[', ']', '\t', '\r', '\n', '/',
];

/// Derive the slug of a content file from its file name.
pub fn slug_from_path(path: &Path, mode: SlugMode) -> Result<String> {
    let stem = path
        .file_stem()
        .ok_or_else(|| anyhow!("No file name: {}", path.display()))?
        .to_str()
        .ok_or_else(|| anyhow!("Invalid path encoding: {}", path.display()))?;

    let slug = slugify(stem, mode);
    if slug.is_empty() {
        return Err(anyhow!("Empty slug for {}", path.display()));
    }
    Ok(slug)
}

/// Convert text to a slug according to `mode`.
pub fn slugify(text: &str, mode: SlugMode) -> String {
    match mode {
        SlugMode::Safe => sanitize_text(text),
        SlugMode::On => slug::slugify(text),
        SlugMode::No => text.to_owned(),
    }
}

/// Remove forbidden characters and replace whitespace with hyphens
fn sanitize_text(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}
