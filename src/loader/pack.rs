//! Encoding a data document into the transport payload.

use std::io::Write;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::Value;

use super::document::DOCUMENT_BINDING;

/// Gzip and base64 encode an arbitrary script.
pub fn pack_script(script: &str) -> std::io::Result<String> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(script.as_bytes())?;
    let compressed = encoder.finish()?;
    Ok(STANDARD.encode(compressed))
}

/// Produce the payload a report page would embed for `document`.
pub fn pack(document: &Value) -> Result<String> {
    if !document.is_object() {
        anyhow::bail!("metrics document must be a JSON object");
    }
    let json = serde_json::to_string(document).context("Failed to serialise metrics document")?;
    let script = format!("const {DOCUMENT_BINDING} = {json};");
    pack_script(&script).context("Failed to compress metrics document")
}

/// Parse `json` text and pack it.
pub fn pack_json(json: &str) -> Result<String> {
    let document: Value = serde_json::from_str(json).context("Input is not valid JSON")?;
    pack(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pack_rejects_non_objects() {
        assert!(pack(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_pack_output_is_base64_gzip() {
        let payload = pack(&json!({"packageStats": []})).unwrap();
        let bytes = STANDARD.decode(payload).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_pack_json_reports_invalid_input() {
        let err = pack_json("{not json").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }
}
