//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[site]`    | Site metadata (title, author, url)              |
//! | `[content]` | Content directories, extensions, slug mode      |
//! | `[query]`   | Snippet context, tag cloud and timeline limits  |
//! | `[serve]`   | JSON API server (port, interface, watch)        |
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Portfolio"
//! url = "https://example.com"
//!
//! [content]
//! dir = "content"
//!
//! [query]
//! snippet_context = 80
//!
//! [serve]
//! port = 5277
//! ```

mod content;
pub mod defaults;
mod error;
mod query;
mod serve;
mod site;

pub use content::{ContentConfig, SlugMode};
pub use error::ConfigError;
pub use query::QueryConfig;
pub use serve::ServeConfig;
pub use site::SiteMeta;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub site: SiteMeta,

    /// Content location settings
    #[serde(default)]
    pub content: ContentConfig,

    /// Presentation limits
    #[serde(default)]
    pub query: QueryConfig,

    /// JSON API server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.content.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.content.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let base = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        self.update_path_with_root(&root, cli);

        if let Commands::Serve {
            interface,
            port,
            watch,
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, cli: &Cli) {
        Self::update_option(&mut self.content.dir, cli.content.as_ref());

        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.content.dir = Self::normalize_path(&root.join(&self.content.dir));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.content.dir.as_os_str().is_empty() {
            bail!(ConfigError::Validation("[content.dir] must not be empty".into()));
        }

        if self.content.extensions.is_empty() {
            bail!(ConfigError::Validation(
                "[content.extensions] must have at least one element".into()
            ));
        }

        if self.query.snippet_context == 0 {
            bail!(ConfigError::Validation(
                "[query.snippet_context] must be greater than 0".into()
            ));
        }

        if let Some(url) = &self.site.url
            && !url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }

        Ok(())
    }
}
