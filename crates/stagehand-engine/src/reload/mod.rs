//! Live reload of the stage manifest.

mod watcher;

pub use watcher::ManifestWatcher;
