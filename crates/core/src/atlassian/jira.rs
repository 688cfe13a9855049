//! Pure transformation functions for Jira rich-text fields
//!
//! Jira REST v3 returns fields such as `description` and comment bodies either
//! as plain strings or as ADF documents, and expects ADF when writing them.
//!
//! This module contains zero I/O operations and is fully testable with fixture data.

use serde::Deserialize;
use serde_json::Value;

use crate::adf::{self, Document};

/// Convert markdown into the ADF document for a Jira rich-text field
///
/// Returns `None` for empty markdown so the field can be left unset.
pub fn description_document(markdown: &str) -> Option<Document> {
    adf::to_document(markdown)
}

/// Helper function to convert a field (which can be a string or ADF JSON) to a plain string
pub fn extract_description(value: Option<Value>) -> Option<String> {
    value.and_then(|v| match &v {
        Value::String(s) => Some(s.clone()),
        // Only ADF documents are rendered, other objects are ignored
        Value::Object(_) if v.get("type").and_then(Value::as_str) == Some("doc") => {
            render_adf(&v)
        }
        _ => None,
    })
}

/// Render an ADF JSON value to trimmed plain text, `None` when there is no text
pub fn render_adf(value: &Value) -> Option<String> {
    let document = match Document::deserialize(value) {
        Ok(document) => document,
        Err(err) => {
            log::debug!("ignoring malformed ADF document: {err}");
            return None;
        }
    };

    let text = document.to_plain_text();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_description_none() {
        assert_eq!(extract_description(None), None);
    }

    #[test]
    fn test_extract_description_plain_string() {
        let value = json!("Just text");

        assert_eq!(extract_description(Some(value)), Some("Just text".to_string()));
    }

    #[test]
    fn test_extract_description_adf_document() {
        // Arrange: a description as returned by Jira REST v3
        let value = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Steps"}]},
                {"type": "orderedList", "attrs": {"order": 1}, "content": [
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "Open the app"}]}
                    ]}
                ]}
            ]
        });

        // Act
        let description = extract_description(Some(value));

        // Assert
        assert_eq!(description, Some("Steps\n- Open the app".to_string()));
    }

    #[test]
    fn test_extract_description_other_objects() {
        assert_eq!(extract_description(Some(json!({"type": "panel"}))), None);
        assert_eq!(extract_description(Some(json!(42))), None);
    }

    #[test]
    fn test_extract_description_empty_document() {
        let value = json!({"type": "doc", "version": 1, "content": []});

        assert_eq!(extract_description(Some(value)), None);
    }

    #[test]
    fn test_render_adf_malformed_document() {
        let value = json!({"type": "doc", "version": "one", "content": 3});

        assert_eq!(render_adf(&value), None);
    }

    #[test]
    fn test_description_document_round_trip() {
        let document = description_document("Fix the *flaky* test").unwrap();

        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(
            extract_description(Some(value)),
            Some("Fix the flaky test".to_string())
        );
    }

    #[test]
    fn test_description_document_empty() {
        assert!(description_document("").is_none());
    }
}
