//! Persisted user preferences.
//!
//! Only one key is stored: `theme`. Read failures are never fatal; an
//! unreadable or missing store yields the light theme.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String key-value preference storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store, used by tests and when no config directory exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// TOML file of string values.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/metrics-viewer/prefs.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("metrics-viewer").join("prefs.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to read preferences {}: {}", self.path.display(), e);
                }
                return BTreeMap::new();
            }
        };
        toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!(
                "Ignoring malformed preferences {}: {}",
                self.path.display(),
                e
            );
            BTreeMap::new()
        })
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preference directory {}", parent.display())
            })?;
        }
        let contents = toml::to_string(&values).context("Failed to serialize preferences")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write preferences {}", self.path.display()))
    }
}

/// Stored theme, light when absent or unrecognised.
pub fn load_theme(store: &dyn PreferenceStore) -> ThemeMode {
    store
        .get(THEME_KEY)
        .and_then(|v| ThemeMode::parse(v.trim()))
        .unwrap_or_default()
}

/// Flip the theme and persist it. The returned mode applies even when the
/// write fails.
pub fn toggle_theme(store: &mut dyn PreferenceStore, current: ThemeMode) -> ThemeMode {
    let next = current.toggled();
    if let Err(e) = store.set(THEME_KEY, next.as_str()) {
        log::warn!("Theme preference not saved: {:#}", e);
    }
    next
}
