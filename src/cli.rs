//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio blog and portfolio content engine
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Output switch shared by all query commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Print results as JSON instead of formatted text
    #[arg(long)]
    pub json: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a starter site with sample content
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// List posts, optionally filtered by tag/category and searched
    Posts {
        /// Search terms (every term must match)
        #[arg(short, long)]
        search: Option<String>,

        /// Only posts carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,

        /// Also search post bodies
        #[arg(long)]
        deep: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a single post
    Post {
        slug: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List projects
    Projects {
        /// in-progress, completed, planned or all
        #[arg(long)]
        status: Option<String>,

        /// newest or oldest
        #[arg(long)]
        order: Option<String>,

        /// Search terms (every term must match)
        #[arg(short, long)]
        search: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a project with its log timeline and related posts
    Project {
        slug: String,

        /// Show every day of the timeline instead of the latest ones
        #[arg(long)]
        all_days: bool,

        /// List every log recorded on this day
        #[arg(short, long)]
        day: Option<u32>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a progress log entry
    Log {
        slug: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show tags ranked by usage
    Tags {
        /// Show every tag instead of the most used ones
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Browse a category
    Category {
        slug: String,

        /// Search terms (every term must match)
        #[arg(short, long)]
        search: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Serve the content as a JSON API. Reload on change automatically
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,

        /// enable watch
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}
