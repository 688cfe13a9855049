//! Plain-text rendering of ADF trees for terminal display
//!
//! Formatting marks are dropped; only block structure survives as newlines,
//! `- ` bullets indented two spaces per nesting level, and `> ` quote prefixes.

use super::{Document, Node};

/// Render an optional document, `None` renders as an empty string.
pub fn to_plain_text(document: Option<&Document>) -> String {
    document.map(Document::to_plain_text).unwrap_or_default()
}

impl Document {
    /// Extract the text of every node in document order.
    pub fn to_plain_text(&self) -> String {
        let mut output = String::new();
        render_nodes(&self.content, 0, &mut output);
        output
    }
}

fn render_nodes(nodes: &[Node], depth: usize, output: &mut String) {
    for node in nodes {
        render_node(node, depth, output);
    }
}

fn render_node(node: &Node, depth: usize, output: &mut String) {
    match node {
        Node::Heading { content, .. } | Node::CodeBlock { content, .. } => {
            output.push('\n');
            render_nodes(content, depth, output);
            output.push('\n');
        }
        Node::Paragraph { content } => {
            render_nodes(content, depth, output);
            output.push('\n');
        }
        Node::BulletList { content } | Node::OrderedList { content, .. } => {
            render_nodes(content, depth, output);
            output.push('\n');
        }
        Node::ListItem { content } => {
            output.push_str(&"  ".repeat(depth));
            output.push_str("- ");
            render_nodes(content, depth + 1, output);
        }
        Node::Blockquote { content } => {
            let mut inner = String::new();
            render_nodes(content, depth, &mut inner);
            for line in content_lines(&inner) {
                output.push_str("> ");
                output.push_str(line);
                output.push('\n');
            }
        }
        Node::Rule => output.push_str("---\n"),
        Node::HardBreak => output.push('\n'),
        other => {
            if let Some(text) = other.literal() {
                output.push_str(text);
            }
            render_nodes(other.content(), depth, output);
        }
    }
}

/// Split on newlines, dropping trailing empty lines.
fn content_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adf::to_document;

    #[test]
    fn test_none_renders_empty() {
        assert_eq!(to_plain_text(None), "");
    }

    #[test]
    fn test_empty_document_renders_empty() {
        assert_eq!(Document::empty().to_plain_text(), "");
    }

    #[test]
    fn test_heading_paragraph_and_list_in_order() {
        // Arrange
        let document = to_document("# Title\n\nSome text\n\n- Item 1\n- Item 2").unwrap();

        // Act
        let text = document.to_plain_text();

        // Assert
        let positions: Vec<usize> = ["Title", "Some text", "Item 1", "Item 2"]
            .iter()
            .map(|fragment| text.find(fragment).expect(fragment))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(text, "\nTitle\nSome text\n- Item 1\n- Item 2\n\n");
    }

    #[test]
    fn test_nested_list_indentation() {
        let document = to_document("- A\n  - A1\n- B").unwrap();

        let text = to_plain_text(Some(&document));

        assert_eq!(text, "- A\n  - A1\n\n- B\n\n");
    }

    #[test]
    fn test_ordered_list_uses_dashes() {
        let document = to_document("3. three\n4. four").unwrap();

        assert_eq!(document.to_plain_text(), "- three\n- four\n\n");
    }

    #[test]
    fn test_blockquote_prefixes_lines() {
        let document = to_document("> first\n>\n> second").unwrap();

        assert_eq!(document.to_plain_text(), "> first\n> second\n");
    }

    #[test]
    fn test_code_block_rule_and_hard_break() {
        let document = to_document("```\nlet x = 1;\n```\n\n---\n\nA  \nB").unwrap();

        assert_eq!(document.to_plain_text(), "\nlet x = 1;\n---\nA\nB\n");
    }

    #[test]
    fn test_marks_are_not_rendered() {
        let document = to_document("**bold** and [link](https://x.io) and `code`").unwrap();

        assert_eq!(document.to_plain_text(), "bold and link and code\n");
    }

    #[test]
    fn test_table_cells_render_their_text() {
        let document = to_document("| A | B |\n|---|---|\n| 1 | 2 |").unwrap();

        assert_eq!(document.to_plain_text(), "A\nB\n1\n2\n");
    }

    #[test]
    fn test_unknown_nodes_render_text_and_children() {
        // Arrange: a Confluence panel wrapping a paragraph
        let document = Document::from_json(
            r#"{"type":"doc","version":1,"content":[
                {"type":"panel","attrs":{"panelType":"note"},"content":[
                    {"type":"paragraph","content":[
                        {"type":"text","text":"careful "},
                        {"type":"emoji","attrs":{"shortName":":warning:"}}
                    ]}
                ]}
            ]}"#,
        )
        .unwrap();

        // Act
        let text = document.to_plain_text();

        // Assert
        assert_eq!(text, "careful \n");
    }
}
