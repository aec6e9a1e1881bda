//! Shell configuration with sensible defaults.

use std::path::PathBuf;
use std::sync::Arc;

use crate::prefs::{FileStore, KvStore, MemoryStore};
use crate::routes::TITLE_SUFFIX;

/// Where preferences live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefsLocation {
    /// `<config dir>/toolbox/preferences.json`.
    Default,
    /// An explicit JSON file.
    File(PathBuf),
    /// Nothing is written to disk.
    Memory,
}

/// Configuration for an [`AppContext`](crate::context::AppContext).
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Preference storage. Default: [`PrefsLocation::Default`].
    pub prefs: PrefsLocation,
    /// Appended to page titles. Default: `"開發者工具箱"`.
    pub title_suffix: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prefs: PrefsLocation::Default,
            title_suffix: TITLE_SUFFIX.to_string(),
        }
    }
}

impl ShellConfig {
    /// Config that keeps preferences in memory only.
    pub fn in_memory() -> Self {
        Self {
            prefs: PrefsLocation::Memory,
            ..Default::default()
        }
    }

    /// Resolved preference file path, if preferences go to disk.
    pub fn prefs_path(&self) -> Option<PathBuf> {
        match &self.prefs {
            PrefsLocation::Default => Some(default_prefs_path()),
            PrefsLocation::File(path) => Some(path.clone()),
            PrefsLocation::Memory => None,
        }
    }

    /// Open the configured store.
    pub fn open_store(&self) -> Arc<dyn KvStore> {
        match self.prefs_path() {
            Some(path) => Arc::new(FileStore::open(path)),
            None => Arc::new(MemoryStore::new()),
        }
    }
}

/// `<config dir>/toolbox/preferences.json`, or `./toolbox/preferences.json`
/// when the platform has no config dir.
pub fn default_prefs_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolbox")
        .join("preferences.json")
}
