//! Viewer configuration from `.metrics-viewer.toml`.
//!
//! The file is searched for in the current directory and its ancestors. A
//! missing or invalid file is never fatal: the viewer runs with defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::DedupeKey;

pub const CONFIG_FILE_NAME: &str = ".metrics-viewer.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Identity used to deduplicate files in the per-file charts.
    pub file_dedupe: DedupeKey,
    /// Use the `flate2` inflater when available.
    pub fast_inflate: bool,
    /// Preference file; defaults to the user config directory.
    pub prefs_path: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            file_dedupe: DedupeKey::Name,
            fast_inflate: true,
            prefs_path: None,
        }
    }
}

/// Parse a config document.
pub fn parse_config(contents: &str) -> Result<ViewerConfig, String> {
    toml::from_str::<ViewerConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Load one file, logging and returning `None` when it cannot be used.
pub fn try_load_config_from_path(config_path: &Path) -> Option<ViewerConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// `start` followed by its parents, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        parent.pop().then_some(parent)
    })
    .take(max_depth)
}

/// Nearest config file from `start` upward, or defaults.
pub fn load_config_from(start: PathBuf) -> ViewerConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ViewerConfig::default()
        })
}

pub fn load_config() -> ViewerConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            ViewerConfig::default()
        }
    }
}

/// An explicit `--config` path, else the ancestor search.
pub fn resolve_config(explicit: Option<&Path>) -> ViewerConfig {
    match explicit {
        Some(path) => try_load_config_from_path(path).unwrap_or_default(),
        None => load_config(),
    }
}
