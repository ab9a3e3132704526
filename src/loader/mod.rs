//! Payload decoding: base64 → inflate → document → [`Dataset`].
//!
//! Every stage reports through [`DecodeError`] and no partially built dataset
//! ever escapes. [`load_async`] is the one suspension point in the crate; all
//! state changes after it are synchronous.

pub mod document;
pub mod inflate;
pub mod pack;

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::DecodeError;
use crate::model::Dataset;

pub use document::{extract_document, DOCUMENT_BINDING};
pub use inflate::{Container, Inflater};
pub use pack::{pack, pack_json, pack_script};

/// Environment variable that disables the `flate2` path; read by the CLI.
pub const NO_FAST_INFLATE_ENV: &str = "METRICS_VIEWER_NO_FAST_INFLATE";

/// Knobs for a single decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Use the primary inflater. When false the fallback is initialised on
    /// demand and used instead.
    pub fast_path: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { fast_path: true }
    }
}

/// Decode a payload with default options.
pub fn load(payload: &[u8]) -> Result<Dataset, DecodeError> {
    load_with(payload, &LoaderOptions::default())
}

/// Decode a payload.
pub fn load_with(payload: &[u8], options: &LoaderOptions) -> Result<Dataset, DecodeError> {
    let compressed = decode_transport(payload)?;
    let container = inflate::sniff(&compressed).ok_or(DecodeError::UnknownCompression)?;

    let inflater = inflate::select(options.fast_path);
    log::debug!(
        "Inflating {} bytes ({:?}) with the {} inflater",
        compressed.len(),
        container,
        inflater.path()
    );
    let bytes = inflater.inflate(&compressed, container)?;

    let script = String::from_utf8(bytes)?;
    let json = extract_document(&script)?;
    let dataset: Dataset = serde_json::from_str(json)?;

    log::info!(
        "Loaded metrics for {} packages, {} files, {} methods",
        dataset.packages.len(),
        dataset.file_count(),
        dataset.method_count()
    );
    Ok(dataset)
}

/// Decode a payload on a blocking worker of the current tokio runtime.
pub async fn load_async(payload: Vec<u8>, options: LoaderOptions) -> Result<Dataset, DecodeError> {
    tokio::task::spawn_blocking(move || load_with(&payload, &options))
        .await
        .map_err(|e| DecodeError::Task(e.to_string()))?
}

/// Read payload bytes from a file, or from stdin when `path` is `-`.
pub fn read_payload(path: &Path) -> std::io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::Read::read_to_end(&mut std::io::stdin().lock(), &mut buf)?;
        Ok(buf)
    } else {
        std::fs::read(path)
    }
}

/// Strip whitespace and an optional pair of surrounding quotes, then base64 decode.
fn decode_transport(payload: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut cleaned: Vec<u8> = payload
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    let quoted = matches!(cleaned.as_slice(), [b'"', .., b'"'] | [b'\'', .., b'\'']);
    if quoted {
        cleaned.pop();
        cleaned.remove(0);
    }

    Ok(STANDARD.decode(&cleaned)?)
}
