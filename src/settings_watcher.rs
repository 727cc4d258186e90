//! Hot reload for the interaction settings file.
//!
//! Watches the file's parent directory (editors often replace files instead
//! of writing in place) and reports changes to the settings file through a
//! non-blocking [`SettingsWatcher::poll`] the host calls from its event loop.

use crate::error::ConfigError;
use crate::settings::InteractionSettings;
use anyhow::Context as _;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tracing::{debug, warn};

pub use crate::settings::default_settings_path;

/// What happened to the watched settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Created,
    Modified,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    receiver: Receiver<notify::Result<Event>>,
    /// Set once the notify backend has gone away.
    stopped: bool,
    _watcher: RecommendedWatcher,
}

impl SettingsWatcher {
    /// Start watching `path`. Its parent directory must exist.
    pub fn new(path: PathBuf) -> anyhow::Result<Self> {
        let parent = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (sender, receiver) = mpsc::channel::<notify::Result<Event>>();
        let mut watcher = notify::recommended_watcher(sender)
            .with_context(|| format!("creating watcher for {}", path.display()))?;

        watcher
            .watch(&parent, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::Watch {
                path: parent.clone(),
                message: e.to_string(),
            })?;
        debug!(path = %path.display(), "watching interaction settings");

        Ok(Self {
            path,
            receiver,
            stopped: false,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next event concerning the settings file, if any is pending.
    /// Events for other files in the directory are skipped.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        if self.stopped {
            return None;
        }
        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => {
                    if let Some(settings_event) = self.classify(&event) {
                        return Some(settings_event);
                    }
                }
                Ok(Err(e)) => return Some(SettingsEvent::Error(e.to_string())),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    self.stopped = true;
                    return Some(SettingsEvent::Error("settings watcher stopped".to_string()));
                }
            }
        }
    }

    /// Drain pending events and reload if the file changed.
    ///
    /// Returns the reloaded settings, or the defaults if the file was
    /// deleted. Invalid files are logged and ignored.
    pub fn reload_if_changed(&mut self) -> Option<InteractionSettings> {
        let mut reloaded = None;
        while let Some(event) = self.poll() {
            match event {
                SettingsEvent::Created | SettingsEvent::Modified => {
                    match InteractionSettings::load_from(&self.path) {
                        Ok(settings) => reloaded = Some(settings),
                        Err(e) => warn!(path = %self.path.display(), "settings reload failed: {}", e),
                    }
                }
                SettingsEvent::Deleted => {
                    warn!(path = %self.path.display(), "settings file deleted, using defaults");
                    reloaded = Some(InteractionSettings::defaults().clone());
                }
                SettingsEvent::Error(e) => warn!("settings watch error: {}", e),
            }
        }
        reloaded
    }

    fn classify(&self, event: &Event) -> Option<SettingsEvent> {
        let file_name = self.path.file_name()?;
        if !event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(file_name))
        {
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
