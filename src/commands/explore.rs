//! Interactive exploration of a payload.

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::*;

use super::{load_payload, Loaded};
use crate::loader::LoaderOptions;
use crate::model::DedupeKey;
use crate::prefs::{FileStore, MemoryStore, PreferenceStore};
use crate::tui::app::ExplorerApp;
use crate::tui::Explorer;

/// Load `payload` and open it in the explorer.
///
/// The terminal is only taken over once the payload has decoded; a failure
/// prints the terminal message to stderr instead.
pub fn handle_explore(
    payload: &Path,
    options: LoaderOptions,
    dedupe: DedupeKey,
    prefs_path: Option<PathBuf>,
) -> Result<()> {
    let dataset = match load_payload(payload, options)? {
        Loaded::Dataset(dataset) => dataset,
        Loaded::Failed(e) => {
            eprintln!("{}", e.terminal_message().red());
            return Err(e.into());
        }
    };

    log::info!(
        "Exploring {} packages, {} files, {} methods",
        dataset.packages.len(),
        dataset.file_count(),
        dataset.method_count()
    );

    let app = ExplorerApp::new(dataset, dedupe, preference_store(prefs_path));
    Explorer::new(app)?.run()
}

/// File-backed preferences when a location is known, in-memory otherwise.
fn preference_store(explicit: Option<PathBuf>) -> Box<dyn PreferenceStore> {
    match explicit.or_else(FileStore::default_path) {
        Some(path) => {
            log::debug!("Preferences at {}", path.display());
            Box::new(FileStore::new(path))
        }
        None => {
            log::warn!("No config directory; preferences will not persist");
            Box::new(MemoryStore::default())
        }
    }
}
