use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::event::ModifyKind;
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::content::ContextHandle;
use crate::core::Stage;

/// Watches a manifest file and schedules `Stage::hot_reload` on the stage's
/// context thread whenever it changes.
///
/// Bursts of events (editors often write in several steps) collapse into a
/// single pending reload. Dropping the watcher stops it.
pub struct ManifestWatcher {
    _watcher: RecommendedWatcher,
}

impl ManifestWatcher {
    pub fn spawn(manifest: impl AsRef<Path>, stage: ContextHandle<Stage>) -> Result<Self> {
        let manifest = normalize_path(manifest.as_ref());
        let dir = manifest
            .parent()
            .map(Path::to_path_buf)
            .context("manifest path has no parent directory")?;

        let pending = Arc::new(AtomicBool::new(false));
        let target = manifest.clone();
        let flag = pending;

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if !is_relevant(&event.kind) || !touches(&event, &target) {
                    return;
                }
                if flag.swap(true, Ordering::AcqRel) {
                    return;
                }
                let path = target.clone();
                let flag = Arc::clone(&flag);
                let queued = stage.ensure(move |stage: &mut Stage| {
                    flag.store(false, Ordering::Release);
                    stage.hot_reload(&path);
                });
                if !queued {
                    log::debug!("stage is gone; dropping reload of {}", target.display());
                }
            }
            Err(err) => log::warn!("manifest watcher error: {err}"),
        })
        .context("create manifest watcher")?;

        watcher
            .configure(
                NotifyConfig::default()
                    .with_compare_contents(false)
                    .with_poll_interval(Duration::from_millis(300)),
            )
            .context("configure manifest watcher")?;

        // Watch the directory: editors commonly replace the file rather than write to it.
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("watch {}", dir.display()))?;

        log::info!("watching {} for changes", manifest.display());
        Ok(Self { _watcher: watcher })
    }
}

fn touches(event: &Event, manifest: &Path) -> bool {
    event.paths.iter().any(|p| normalize_path(p) == manifest)
}

fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Name(_))
            | EventKind::Modify(ModifyKind::Any)
            | EventKind::Create(_)
    )
}

fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else if let Ok(cwd) = env::current_dir() {
        cwd.join(path)
    } else {
        path.to_path_buf()
    };
    if let Ok(canonical) = fs::canonicalize(&absolute) {
        return canonical;
    }
    // The file may be mid-replace; canonicalize the parent instead.
    match (absolute.parent().map(fs::canonicalize), absolute.file_name()) {
        (Some(Ok(parent)), Some(name)) => parent.join(name),
        _ => absolute,
    }
}
