//! Locating the data document inside the decompressed report script.
//!
//! Report generators emit either a bare JSON object or a single assignment
//! such as `const metricsData = {...};`. Nothing is evaluated: the object
//! literal is sliced out and handed to the JSON parser.

use crate::error::DecodeError;

/// Name the report generator binds the document to.
pub const DOCUMENT_BINDING: &str = "metricsData";

const DECLARATION_KEYWORDS: &[&str] = &["const", "let", "var"];

/// Return the JSON object text contained in `script`.
pub fn extract_document(script: &str) -> Result<&str, DecodeError> {
    let text = script.trim_start_matches('\u{feff}').trim();

    if text.starts_with('{') {
        return Ok(strip_statement_end(text));
    }

    let (lhs, rhs) = text.split_once('=').ok_or(DecodeError::MissingDocument)?;
    if !is_binding_target(lhs) {
        return Err(DecodeError::MissingDocument);
    }

    let rhs = rhs.trim_start();
    if !rhs.starts_with('{') {
        return Err(DecodeError::MissingDocument);
    }
    Ok(strip_statement_end(rhs))
}

/// `[const|let|var] name` where `name` may be a dotted path (`window.metricsData`).
fn is_binding_target(lhs: &str) -> bool {
    let mut words = lhs.split_whitespace();
    let first = match words.next() {
        Some(word) => word,
        None => return false,
    };

    let name = if DECLARATION_KEYWORDS.contains(&first) {
        match words.next() {
            Some(word) => word,
            None => return false,
        }
    } else {
        first
    };

    words.next().is_none() && is_dotted_identifier(name)
}

fn is_dotted_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}

fn strip_statement_end(text: &str) -> &str {
    text.trim_end().trim_end_matches(';').trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object() {
        assert_eq!(extract_document("  {\"a\": 1}\n").unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_const_assignment() {
        let script = "const metricsData = {\"packageStats\": []};\n";
        assert_eq!(extract_document(script).unwrap(), "{\"packageStats\": []}");
    }

    #[test]
    fn test_window_property_assignment() {
        let script = "window.metricsData={\"x\":true}";
        assert_eq!(extract_document(script).unwrap(), "{\"x\":true}");
    }

    #[test]
    fn test_rejects_non_object_rhs() {
        assert!(matches!(
            extract_document("const metricsData = fetch('x');"),
            Err(DecodeError::MissingDocument)
        ));
    }

    #[test]
    fn test_rejects_arbitrary_statements() {
        assert!(matches!(
            extract_document("alert(1); x = {}"),
            Err(DecodeError::MissingDocument)
        ));
        assert!(matches!(
            extract_document("plain text"),
            Err(DecodeError::MissingDocument)
        ));
    }
}
