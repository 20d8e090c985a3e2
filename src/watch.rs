//! Content watcher for hot reload.
//!
//! Monitors the content directory and reloads every collection when files
//! change. A reload that fails leaves the previous content in place.
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────────────┐    ┌──────────────┐
//! │ notify   │───▶│ Debouncer│───▶│ load_collections │───▶│ store.replace│
//! │ events   │    │ (300ms)  │    └──────────────────┘    └──────────────┘
//! └──────────┘    └──────────┘
//! ```

use crate::{config::SiteConfig, content::load_collections, data::ContentStore, log};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{RecvTimeoutError, channel},
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// `/site/content/post/hello.mdx` → `post/hello`
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .with_extension("")
        .display()
        .to_string()
}

/// Batches rapid file events until they settle.
#[derive(Debug, Default)]
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
}

impl Debouncer {
    fn add(&mut self, event: Event) {
        self.pending
            .extend(event.paths.into_iter().filter(|path| !is_temp_file(path)));
        if !self.pending.is_empty() {
            self.last_event = Some(Instant::now());
        }
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

/// Reload all collections into `store`. Returns whether the swap happened.
fn reload(paths: &[PathBuf], config: &SiteConfig, store: &ContentStore) -> bool {
    let root = &config.content.dir;
    let mut changed: Vec<_> = paths.iter().map(|p| rel_path(p, root)).collect();
    changed.sort();
    log!("watch"; "{} changed, reloading", changed.join(", "));

    match load_collections(&config.content) {
        Ok(collections) => {
            store.replace(collections);
            true
        }
        Err(e) => {
            log!("error"; "{e:#}");
            log!("watch"; "keeping previous content");
            false
        }
    }
}

/// Watch the content directory and reload on change. Blocks until the
/// watcher channel closes.
pub fn watch_for_changes_blocking(config: &SiteConfig, store: &ContentStore) -> Result<()> {
    let dir = &config.content.dir;
    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    watcher
        .watch(dir, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch content: {}", dir.display()))?;

    log!("watch"; "{}/", rel_path(dir, config.get_root()));

    let mut debouncer = Debouncer::default();
    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) => debouncer.add(event),
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                reload(&debouncer.take(), config, store);
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}
