//! Settings file watcher for hot reload.
//!
//! Watches the settings file's parent directory (editors often replace the
//! file atomically, which a file-level watch would miss) and reports events
//! for the settings file only. Polling is non-blocking so it can run on the
//! input thread between callbacks.

use crate::error::WatchError;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tracing::debug;

pub use crate::settings::default_settings_path;

/// A change to the watched settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Modified,
    Created,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    rx: Receiver<notify::Result<Event>>,
    // Dropping the watcher stops event delivery.
    _watcher: RecommendedWatcher,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> Result<Self, WatchError> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| WatchError::NoParent(path.display().to_string()))?
            .to_path_buf();

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&parent, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "Watching settings file");

        Ok(Self {
            path,
            rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the next relevant event, if any, without blocking.
    ///
    /// Bursts of events for the same save are coalesced into one.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => {
                    if let Some(mapped) = self.map_event(&event) {
                        latest = Some(mapped);
                    }
                }
                Ok(Err(e)) => return Some(SettingsEvent::Error(e.to_string())),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Some(SettingsEvent::Error("watcher disconnected".to_string()));
                }
            }
        }
        latest
    }

    fn map_event(&self, event: &Event) -> Option<SettingsEvent> {
        let touches_settings = event
            .paths
            .iter()
            .any(|p| p.file_name() == self.path.file_name());
        if !touches_settings {
            return None;
        }
        match event.kind {
            EventKind::Create(_) => Some(SettingsEvent::Created),
            EventKind::Modify(_) => Some(SettingsEvent::Modified),
            EventKind::Remove(_) => Some(SettingsEvent::Deleted),
            _ => None,
        }
    }
}
