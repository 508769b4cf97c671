//! Hot reload of the config file.
//!
//! Each write to the file is re-read and re-validated. A file that fails to
//! load is logged and dropped, so the component built from the last good
//! config keeps serving. Saving identical text twice produces one update.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{parse_config, LoadedConfig};

/// Watches one config file and emits validated [`LoadedConfig`]s.
pub struct ConfigWatcher {
    path: PathBuf,
    updates: mpsc::UnboundedSender<LoadedConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end of its update channel.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<LoadedConfig>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            updates,
        };
        (watcher, rx)
    }

    /// Start watching. Updates stop when the returned handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let ConfigWatcher { path, updates } = self;

        // Text the running component was built from.
        let last_applied = Mutex::new(fs::read_to_string(&path).unwrap_or_default());
        let watched = path.clone();

        let mut handle = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if is_write(&event.kind) => {
                    if let Some(loaded) = reload_from(&watched, &last_applied) {
                        if updates.send(loaded).is_err() {
                            tracing::debug!("Config update receiver dropped");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        handle.watch(&path, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %path.display(), "Watching config file");
        Ok(handle)
    }
}

fn is_write(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(_) | EventKind::Create(_))
}

/// Re-read `path`; `None` when the text is unchanged or does not validate.
fn reload_from(path: &Path, last_applied: &Mutex<String>) -> Option<LoadedConfig> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read config file");
            return None;
        }
    };

    let mut last = last_applied.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if *last == text {
        return None;
    }

    match parse_config(&text) {
        Ok(loaded) => {
            tracing::info!(path = %path.display(), "Config file changed, reloading component");
            *last = text;
            Some(loaded)
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Rejected config change, keeping current component");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Content;

    const INITIAL: &str = "[plugin]\nselfId = \"bot1\"\ninjectType = \"text\"\nshowText = \"before\"\n";

    #[test]
    fn test_reload_from_skips_unchanged_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content-bridge.toml");
        fs::write(&path, INITIAL).unwrap();
        let last = Mutex::new(INITIAL.to_string());

        assert!(reload_from(&path, &last).is_none());

        fs::write(&path, "[plugin]\nselfId = \"bot1\"\ninjectType = \"video\"\n").unwrap();
        assert!(reload_from(&path, &last).is_none());
        assert_eq!(*last.lock().unwrap(), INITIAL);

        fs::write(&path, INITIAL.replace("before", "after")).unwrap();
        let loaded = reload_from(&path, &last).unwrap();
        assert_eq!(loaded.client.content, Content::Text { show_text: "after".into() });
    }

    #[tokio::test]
    async fn test_file_change_delivers_update() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content-bridge.toml");
        fs::write(&path, INITIAL).unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _handle = watcher.run().unwrap();

        // A broken [plugin] never reaches the receiver.
        fs::write(&path, "[plugin]\nselfId = \"bot1\"\ninjectType = \"text\"\nshowUrl = \"https://x.test\"\n").unwrap();
        let rejected = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
        assert!(rejected.is_err());

        fs::write(
            &path,
            "[plugin]\nselfId = \"bot1\"\npassiveMode = true\ninjectType = \"iframe\"\nshowUrl = \"https://x.test\"\n",
        )
        .unwrap();
        let loaded = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("no config update")
            .unwrap();
        assert!(loaded.client.passive_mode);
        assert_eq!(loaded.client.content, Content::Iframe { show_url: "https://x.test".into() });
    }
}
