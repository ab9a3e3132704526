//! Config discovery and persisted preferences on a real filesystem.

use metrics_viewer::config::{load_config_from, resolve_config, ViewerConfig, CONFIG_FILE_NAME};
use metrics_viewer::model::DedupeKey;
use metrics_viewer::prefs::{
    load_theme, toggle_theme, FileStore, PreferenceStore, ThemeMode, THEME_KEY,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_found_in_ancestor() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(CONFIG_FILE_NAME),
        "file_dedupe = \"path\"\nfast_inflate = false\n",
    )
    .unwrap();
    let nested = root.path().join("a/b/c");
    fs::create_dir_all(&nested).unwrap();

    let config = load_config_from(nested);
    assert_eq!(config.file_dedupe, DedupeKey::Path);
    assert!(!config.fast_inflate);
}

#[test]
fn test_invalid_explicit_config_falls_back_to_defaults() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("viewer.toml");
    fs::write(&path, "unknown_key = 1").unwrap();
    assert_eq!(resolve_config(Some(&path)), ViewerConfig::default());
}

#[test]
fn test_theme_survives_a_new_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/prefs.toml");

    let mut store = FileStore::new(&path);
    assert_eq!(load_theme(&store), ThemeMode::Light);
    assert_eq!(toggle_theme(&mut store, ThemeMode::Light), ThemeMode::Dark);

    let reopened = FileStore::new(&path);
    assert_eq!(load_theme(&reopened), ThemeMode::Dark);
    assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("dark"));
}

#[test]
fn test_corrupt_preferences_read_as_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.toml");
    fs::write(&path, "this is = = not toml").unwrap();
    assert_eq!(load_theme(&FileStore::new(&path)), ThemeMode::Light);
}
