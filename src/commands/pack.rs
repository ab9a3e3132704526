use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::loader::{self, pack_json};

/// Encode the JSON document at `input` and write the payload.
pub fn handle_pack(input: &Path, output: Option<&Path>) -> Result<()> {
    let bytes = loader::read_payload(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let json = String::from_utf8(bytes).context("Input is not UTF-8 text")?;
    let payload = pack_json(&json)?;
    log::info!("Packed {} bytes of JSON into {} bytes", json.len(), payload.len());

    match output {
        Some(path) => fs::write(path, &payload)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", payload).context("Failed to write payload")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pack_file_round_trips() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("report.json");
        let output = dir.path().join("report.b64");
        fs::write(&input, r#"{"metadata": {"name": "demo"}, "packageStats": []}"#).unwrap();

        handle_pack(&input, Some(&output)).unwrap();

        let dataset = loader::load(&fs::read(&output).unwrap()).unwrap();
        assert_eq!(dataset.metadata.name, "demo");
    }

    #[test]
    fn test_missing_input_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(handle_pack(&dir.path().join("absent.json"), None).is_err());
    }
}
