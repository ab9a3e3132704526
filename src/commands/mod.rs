//! CLI command implementations.
//!
//! - **explore**: open a payload in the terminal explorer
//! - **summary**: print a non-interactive overview of a payload
//! - **pack**: encode a metrics JSON document as a payload

pub mod explore;
pub mod pack;
pub mod summary;

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ViewerConfig;
use crate::error::DecodeError;
use crate::loader::{self, LoaderOptions};
use crate::model::Dataset;

pub use explore::handle_explore;
pub use pack::handle_pack;
pub use summary::{handle_summary, render_summary};

/// Loader options from config, overridden by the command line.
pub fn loader_options(config: &ViewerConfig, no_fast_inflate: bool) -> LoaderOptions {
    LoaderOptions {
        fast_path: config.fast_inflate && !no_fast_inflate,
    }
}

/// Outcome of reading and decoding a payload.
///
/// I/O failures are ordinary errors; a payload that was read but cannot be
/// decoded is kept apart so it can be reported with the terminal message.
pub enum Loaded {
    Dataset(Dataset),
    Failed(DecodeError),
}

/// Read `path` and decode it on a blocking task.
pub fn load_payload(path: &Path, options: LoaderOptions) -> Result<Loaded> {
    let bytes = loader::read_payload(path)
        .with_context(|| format!("Failed to read payload {}", path.display()))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .build()
        .context("Failed to start decode runtime")?;

    match runtime.block_on(loader::load_async(bytes, options)) {
        Ok(dataset) => Ok(Loaded::Dataset(dataset)),
        Err(e) => {
            log::error!("Payload {} could not be decoded: {}", path.display(), e);
            Ok(Loaded::Failed(e))
        }
    }
}
