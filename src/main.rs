//! Folio - search, tags and project timelines for an mdx blog and portfolio.

mod browse;
mod cli;
mod config;
mod content;
mod data;
mod init;
mod query;
mod render;
mod serve;
mod utils;
mod view;
mod watch;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_site;
use serve::serve_site;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Init { .. } => new_site(config),
        Commands::Serve { .. } => serve_site(config),
        command => browse::run(config, command),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    // Validate config state based on command
    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found. Run `folio init` first."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
