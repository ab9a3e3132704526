//! Error types for payload decoding.
//!
//! Only one condition in the viewer is fatal: a payload that cannot be turned
//! into a [`Dataset`](crate::model::Dataset). Every stage of the loader maps its
//! failure into a [`DecodeError`] variant so the caller can show a single
//! terminal message. Everything else (missing metrics, lookups that miss,
//! empty tables) is absorbed where it happens.

use thiserror::Error;

/// Which inflate implementation produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflatePath {
    /// The `flate2` decoder.
    Primary,
    /// The lazily initialised `miniz_oxide` decoder.
    Fallback,
}

impl std::fmt::Display for InflatePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InflatePath::Primary => write!(f, "primary"),
            InflatePath::Fallback => write!(f, "fallback"),
        }
    }
}

/// Terminal failure while turning an encoded payload into a dataset.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The transport encoding is not valid base64.
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes carry neither a gzip nor a zlib header.
    #[error("payload is not gzip or zlib compressed")]
    UnknownCompression,

    /// The compressed stream is corrupt or truncated.
    #[error("{path} decompression failed: {message}")]
    Inflate { path: InflatePath, message: String },

    /// The gzip trailer disagrees with the inflated length.
    #[error("decompressed length {actual} does not match gzip trailer ({expected})")]
    LengthMismatch { expected: u32, actual: usize },

    /// The inflated bytes are not UTF-8 text.
    #[error("decompressed payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// No metrics object could be located in the decompressed text.
    #[error("decompressed payload does not contain a metrics document")]
    MissingDocument,

    /// The metrics document does not match the expected shape.
    #[error("metrics document is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The blocking decode task did not complete.
    #[error("decode task failed: {0}")]
    Task(String),
}

impl DecodeError {
    /// Message shown in place of the whole interface when loading fails.
    pub fn terminal_message(&self) -> String {
        format!(
            "Failed to load metrics data. {}. Run with RUST_LOG=debug for details.",
            self
        )
    }
}
