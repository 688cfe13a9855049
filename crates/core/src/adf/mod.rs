//! Atlassian Document Format (ADF) data model
//!
//! ADF is the JSON tree the Jira and Confluence cloud editors use to represent
//! rich text. A [`Document`] holds an ordered list of block [`Node`]s; leaf
//! `text` nodes carry an ordered list of formatting [`Mark`]s, outermost first.
//!
//! This module contains zero I/O operations and is fully testable with fixture data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod convert;
pub mod plaintext;

pub use convert::{to_document, to_json, ConvertOptions, Converter};
pub use plaintext::to_plain_text;

/// The only ADF version the cloud editors accept.
pub const DOCUMENT_VERSION: u32 = 1;

// ============================================================================
// Document
// ============================================================================

/// Root of an ADF tree: `{"type":"doc","version":1,"content":[...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "doc")]
pub struct Document {
    pub version: u32,
    #[serde(default)]
    pub content: Vec<Node>,
}

impl Document {
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            content,
        }
    }

    /// A document shell with no blocks.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Parse an ADF document fetched from a Jira or Confluence API.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the compact JSON string the REST APIs expect.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// A single ADF node, tagged by its `type`.
///
/// Every kind the converter produces has its own variant, so a `text` node can
/// never carry block content and a `rule` can never carry text. Kinds produced
/// by other editors (`mention`, `panel`, `emoji`, ...) deserialize into
/// [`Node::Extension`] so fetched trees survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Paragraph {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Heading {
        #[serde(default)]
        attrs: HeadingAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    BulletList {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    OrderedList {
        #[serde(default)]
        attrs: OrderedListAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    ListItem {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    CodeBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<CodeBlockAttrs>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Blockquote {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Rule,
    Table {
        #[serde(default)]
        attrs: TableAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    TableRow {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    TableHeader {
        #[serde(default)]
        attrs: CellAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    TableCell {
        #[serde(default)]
        attrs: CellAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Text {
        #[serde(default, skip_serializing_if = "String::is_empty")]
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    HardBreak,
    #[serde(untagged)]
    Extension(ExtensionNode),
}

impl Node {
    /// An unformatted `text` leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::text_with_marks(text, Vec::new())
    }

    pub fn text_with_marks(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph { content }
    }

    /// The ADF `type` string of this node.
    pub fn kind(&self) -> &str {
        match self {
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::BulletList { .. } => "bulletList",
            Node::OrderedList { .. } => "orderedList",
            Node::ListItem { .. } => "listItem",
            Node::CodeBlock { .. } => "codeBlock",
            Node::Blockquote { .. } => "blockquote",
            Node::Rule => "rule",
            Node::Table { .. } => "table",
            Node::TableRow { .. } => "tableRow",
            Node::TableHeader { .. } => "tableHeader",
            Node::TableCell { .. } => "tableCell",
            Node::Text { .. } => "text",
            Node::HardBreak => "hardBreak",
            Node::Extension(extension) => &extension.kind,
        }
    }

    /// Child nodes, empty for leaves.
    pub fn content(&self) -> &[Node] {
        match self {
            Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content, .. }
            | Node::ListItem { content }
            | Node::CodeBlock { content, .. }
            | Node::Blockquote { content }
            | Node::Table { content, .. }
            | Node::TableRow { content }
            | Node::TableHeader { content, .. }
            | Node::TableCell { content, .. } => content,
            Node::Extension(extension) => &extension.content,
            Node::Rule | Node::Text { .. } | Node::HardBreak => &[],
        }
    }

    /// Marks on a `text` leaf, empty for every other node.
    pub fn marks(&self) -> &[Mark] {
        match self {
            Node::Text { marks, .. } => marks,
            Node::Extension(extension) => &extension.marks,
            _ => &[],
        }
    }

    /// Literal text of a leaf node, if any.
    pub fn literal(&self) -> Option<&str> {
        match self {
            Node::Text { text, .. } => Some(text),
            Node::Extension(extension) => extension.text.as_deref(),
            _ => None,
        }
    }
}

/// A node kind this crate does not model, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

// ============================================================================
// Node attributes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

impl Default for HeadingAttrs {
    fn default() -> Self {
        Self { level: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedListAttrs {
    pub order: u64,
}

impl Default for OrderedListAttrs {
    fn default() -> Self {
        Self { order: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableAttrs {
    pub layout: String,
}

impl Default for TableAttrs {
    fn default() -> Self {
        Self {
            layout: "default".to_string(),
        }
    }
}

/// Cell spans. Markdown tables never merge cells, so both are always 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellAttrs {
    pub colspan: u32,
    pub rowspan: u32,
}

impl Default for CellAttrs {
    fn default() -> Self {
        Self {
            colspan: 1,
            rowspan: 1,
        }
    }
}

// ============================================================================
// Marks
// ============================================================================

/// Inline formatting attached to a `text` node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Em,
    Strong,
    Strike,
    Code,
    Link {
        attrs: LinkAttrs,
    },
    #[serde(untagged)]
    Other(ExtensionMark),
}

impl Mark {
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link {
            attrs: LinkAttrs { href: href.into() },
        }
    }

    /// The ADF `type` string of this mark.
    pub fn kind(&self) -> &str {
        match self {
            Mark::Em => "em",
            Mark::Strong => "strong",
            Mark::Strike => "strike",
            Mark::Code => "code",
            Mark::Link { .. } => "link",
            Mark::Other(other) => &other.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}

/// A mark kind this crate does not model (`underline`, `textColor`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionMark {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Map<String, Value>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_serializes_content_array() {
        let json = Document::empty().to_json().unwrap();
        assert_eq!(json, r#"{"type":"doc","version":1,"content":[]}"#);
    }

    #[test]
    fn test_node_serialization_omits_empty_fields() {
        // Arrange
        let document = Document::new(vec![
            Node::paragraph(vec![Node::text("")]),
            Node::Rule,
            Node::CodeBlock {
                attrs: None,
                content: vec![Node::text("x")],
            },
        ]);

        // Act
        let value = serde_json::to_value(&document).unwrap();

        // Assert
        assert_eq!(
            value,
            json!({
                "type": "doc",
                "version": 1,
                "content": [
                    {"type": "paragraph", "content": [{"type": "text"}]},
                    {"type": "rule"},
                    {"type": "codeBlock", "content": [{"type": "text", "text": "x"}]}
                ]
            })
        );
    }

    #[test]
    fn test_marks_serialize_with_optional_attrs() {
        let node = Node::text_with_marks("site", vec![Mark::Strong, Mark::link("https://a.b")]);

        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "text",
                "text": "site",
                "marks": [
                    {"type": "strong"},
                    {"type": "link", "attrs": {"href": "https://a.b"}}
                ]
            })
        );
    }

    #[test]
    fn test_table_cell_attrs_serialize() {
        let cell = Node::TableHeader {
            attrs: CellAttrs::default(),
            content: vec![Node::paragraph(vec![Node::text("A")])],
        };

        let value = serde_json::to_value(&cell).unwrap();

        assert_eq!(value["type"], "tableHeader");
        assert_eq!(value["attrs"], json!({"colspan": 1, "rowspan": 1}));
    }

    #[test]
    fn test_from_json_keeps_unknown_kinds() {
        // Arrange: a fetched Jira description with a mention and an underline mark
        let json = r#"{
            "type": "doc",
            "version": 1,
            "content": [{
                "type": "paragraph",
                "content": [
                    {"type": "mention", "attrs": {"id": "42", "text": "@Ada"}},
                    {"type": "text", "text": "hi", "marks": [{"type": "underline"}]}
                ]
            }]
        }"#;

        // Act
        let document = Document::from_json(json).unwrap();

        // Assert
        let paragraph = &document.content[0];
        assert_eq!(paragraph.kind(), "paragraph");
        let mention = &paragraph.content()[0];
        assert_eq!(mention.kind(), "mention");
        assert!(matches!(mention, Node::Extension(ext) if ext.attrs["id"] == "42"));
        let text = &paragraph.content()[1];
        assert_eq!(text.literal(), Some("hi"));
        assert_eq!(text.marks()[0].kind(), "underline");
    }

    #[test]
    fn test_extension_node_round_trips() {
        let original = json!({
            "type": "panel",
            "attrs": {"panelType": "info"},
            "content": [{"type": "paragraph", "content": [{"type": "text", "text": "note"}]}]
        });

        let node: Node = serde_json::from_value(original.clone()).unwrap();

        assert_eq!(node.kind(), "panel");
        assert_eq!(serde_json::to_value(&node).unwrap(), original);
    }

    #[test]
    fn test_from_json_ignores_extra_attrs_on_known_kinds() {
        let json = r#"{"type":"doc","version":1,"content":[
            {"type":"table","attrs":{"layout":"wide","isNumberColumnEnabled":false},"content":[]},
            {"type":"heading","attrs":{"level":3},"content":[{"type":"text","text":"T"}]}
        ]}"#;

        let document = Document::from_json(json).unwrap();

        assert!(matches!(&document.content[0], Node::Table { attrs, .. } if attrs.layout == "wide"));
        assert!(matches!(&document.content[1], Node::Heading { attrs, .. } if attrs.level == 3));
    }

    #[test]
    fn test_from_json_rejects_invalid_json() {
        assert!(Document::from_json("{not json").is_err());
    }
}
