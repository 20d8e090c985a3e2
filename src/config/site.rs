//! `[site]` section configuration.
//!
//! Contains basic site information like title, author, description, etc.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in folio.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [site]
/// title = "My Portfolio"
/// description = "Notes, projects and build logs"
/// author = "Alice"
/// url = "https://alice.dev"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteMeta {
    /// Site title, shown as the heading of terminal listings.
    #[serde(default = "defaults::site::title")]
    #[educe(Default = defaults::site::title())]
    pub title: String,

    /// Author name.
    #[serde(default = "defaults::site::author")]
    #[educe(Default = defaults::site::author())]
    pub author: String,

    /// Site description.
    #[serde(default)]
    pub description: String,

    /// Base URL of the published site, used for links in terminal output.
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: Option<String>,
}

impl SiteMeta {
    /// Absolute URL for a site-relative path, or the path itself without a base URL.
    pub fn absolute_url(&self, path: &str) -> String {
        match &self.url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), path),
            None => path.to_owned(),
        }
    }
}
