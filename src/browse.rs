//! Query commands: load the collections once, apply a view, print it.
//!
//! Every command renders colored text by default and pretty JSON with
//! `--json`. Unknown slugs and bad parameters surface as [`QueryError`]s so
//! the process exits non-zero.

use crate::{
    cli::Commands,
    config::SiteConfig,
    content::{Collections, ProjectStatus, load_collections},
    query::{Criterion, QueryError, SortOrder, TagCloud, TagCounts},
    render,
    view::{
        Category, CategoryPage, FeaturedView, LogDetail, PostDetail, PostListView, ProjectDetail,
        ProjectListView, ThemeContext,
    },
};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::io::{Write, stdout};

/// Run a query subcommand against freshly loaded content.
pub fn run(config: &SiteConfig, command: &Commands) -> Result<()> {
    let collections = load_collections(&config.content)?;
    let query = &config.query;

    match command {
        Commands::Posts {
            search,
            tag,
            category,
            deep,
            output,
        } => {
            let mut view = PostListView::from_search_param(search.as_deref());
            view.set_tag(tag.as_deref());
            view.set_category(Criterion::parse(category.as_deref()).unwrap_or_default());
            view.set_deep(*deep);

            let mut theme = ThemeContext::default();
            theme.set_current(category.as_deref().and_then(Category::from_slug));

            let hits = view.results(&collections.posts, query.snippet_context, query.summary_len);
            emit(output.json, &hits, || render::post_hits(&hits, &theme))
        }

        Commands::Post { slug, output } => {
            let detail = PostDetail::build(&collections, slug)?;
            let link = config.site.absolute_url(&detail.post.url);
            emit(output.json, &detail, || render::post_detail(&detail, &link))
        }

        Commands::Projects {
            status,
            order,
            search,
            output,
        } => {
            let mut view = ProjectListView::default();
            view.set_status(parse_status(status.as_deref())?);
            view.set_order(parse_order(order.as_deref())?);
            view.set_search(search.clone().unwrap_or_default());

            let hits = view.results(&collections.projects);
            let theme = ThemeContext::default();
            emit(output.json, &hits, || {
                let mut text = String::new();
                if status.is_none() && search.is_none() {
                    text.push_str(&featured_text(&collections, config, &theme));
                }
                text.push_str(&render::project_hits(&hits, &theme));
                text
            })
        }

        Commands::Project {
            slug,
            all_days,
            day,
            output,
        } => {
            let detail = ProjectDetail::build(
                &collections,
                slug,
                Utc::now(),
                query.visible_days,
                *all_days,
                *day,
            )?;
            let mut theme = ThemeContext::default();
            theme.set_current(Category::of(detail.project));
            emit(output.json, &detail, || render::project_detail(&detail, &theme))
        }

        Commands::Log { slug, output } => {
            let detail = LogDetail::build(&collections, slug)?;
            emit(output.json, &detail, || render::log_detail(&detail))
        }

        Commands::Tags { all, output } => {
            let mut cloud = TagCloud::new(TagCounts::from_posts(&collections.posts), query.visible_tags);
            cloud.set_show_all(*all);
            emit(output.json, &cloud.visible(), || render::tag_cloud(&cloud))
        }

        Commands::Category {
            slug,
            search,
            output,
        } => {
            let mut page = CategoryPage::open(slug)?;
            page.set_search(search.as_deref().unwrap_or_default());
            let results = page.results(&collections, query.summary_len);
            let theme = page.theme();
            emit(output.json, &results, || render::category(&results, &theme))
        }

        Commands::Init { .. } | Commands::Serve { .. } => Ok(()),
    }
}

/// `None`, `""` and `"all"` admit every status.
pub fn parse_status(raw: Option<&str>) -> Result<Criterion<ProjectStatus>, QueryError> {
    Criterion::parse(raw).map_err(|err| QueryError::invalid("status", err))
}

pub fn parse_order(raw: Option<&str>) -> Result<SortOrder, QueryError> {
    raw.filter(|raw| !raw.is_empty())
        .map(str::parse::<SortOrder>)
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(|err| QueryError::invalid("order", err))
}

fn featured_text(collections: &Collections, config: &SiteConfig, theme: &ThemeContext) -> String {
    FeaturedView::build(
        collections,
        Utc::now(),
        config.query.featured_logs,
        config.query.featured_posts,
    )
    .map(|featured| format!("{}\n", render::featured(&featured, theme)))
    .unwrap_or_default()
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    let mut out = stdout().lock();
    if json {
        let body = serde_json::to_string_pretty(value).context("Failed to serialize results")?;
        writeln!(out, "{body}")?;
    } else {
        write!(out, "{}", text())?;
    }
    out.flush()?;
    Ok(())
}
