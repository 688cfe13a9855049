//! Pure transformation functions for Confluence page bodies
//!
//! This module contains zero I/O operations and is fully testable with fixture data.

use serde::{Deserialize, Serialize};

use crate::adf;
use crate::Result;

/// Representation name Confluence uses for cloud editor (ADF) bodies.
pub const ATLAS_DOC_FORMAT: &str = "atlas_doc_format";

// ============================================================================
// Domain Models (Output to API)
// ============================================================================

/// Page body sent when creating or updating a Confluence page
///
/// `value` holds the ADF document as a JSON *string*, not as a nested object.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BodyRepresentation {
    pub representation: String,
    pub value: String,
}

impl BodyRepresentation {
    /// Wrap an already serialized ADF document.
    pub fn atlas_doc_format(value: String) -> Self {
        Self {
            representation: ATLAS_DOC_FORMAT.to_string(),
            value,
        }
    }
}

// ============================================================================
// Pure Transformation Functions
// ============================================================================

/// Pure transformation: Convert markdown into a cloud editor page body
///
/// # Arguments
/// * `markdown` - Raw markdown bytes, as read from a file or an editor buffer
///
/// # Returns
/// * `BodyRepresentation` - The `atlas_doc_format` body holding the ADF JSON
pub fn atlas_doc_body(markdown: &[u8]) -> Result<BodyRepresentation> {
    let value = adf::to_json(markdown)?;
    Ok(BodyRepresentation::atlas_doc_format(value))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adf::{Document, Node};

    #[test]
    fn test_atlas_doc_body_wraps_adf_json() {
        // Arrange
        let markdown = b"# Release notes";

        // Act
        let body = atlas_doc_body(markdown).unwrap();

        // Assert
        assert_eq!(body.representation, "atlas_doc_format");
        let document = Document::from_json(&body.value).unwrap();
        assert_eq!(document.content.len(), 1);
        assert_eq!(document.content[0].kind(), "heading");
        assert_eq!(document.content[0].content(), &[Node::text("Release notes")]);
    }

    #[test]
    fn test_atlas_doc_body_empty_markdown() {
        let body = atlas_doc_body(b"").unwrap();

        assert_eq!(body.value, r#"{"type":"doc","version":1,"content":[]}"#);
    }

    #[test]
    fn test_body_serializes_value_as_string() {
        let body = BodyRepresentation::atlas_doc_format("{}".to_string());

        let json = serde_json::to_string(&body).unwrap();

        assert_eq!(json, r#"{"representation":"atlas_doc_format","value":"{}"}"#);
    }
}
