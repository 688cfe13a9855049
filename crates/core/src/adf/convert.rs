//! Markdown to ADF conversion
//!
//! Markdown is parsed with comrak (CommonMark plus GitHub tables and
//! strikethrough) and the resulting AST is walked recursively into ADF nodes.
//! Block nodes map one to one; inline formatting is flattened into marks on
//! `text` leaves, outermost construct first.

use comrak::nodes::{
    AstNode, LineColumn, ListType, NodeCodeBlock, NodeLink, NodeList, NodeValue,
};
use comrak::{parse_document, Arena};
use serde::{Deserialize, Serialize};

use super::{
    CellAttrs, CodeBlockAttrs, Document, HeadingAttrs, Mark, Node, OrderedListAttrs, TableAttrs,
};
use crate::Result;

// ============================================================================
// Configuration
// ============================================================================

/// Markdown extensions enabled while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
        }
    }
}

impl ConvertOptions {
    fn to_comrak_options(&self) -> comrak::Options<'static> {
        let mut options = comrak::Options::default();
        options.extension.table = self.tables;
        options.extension.strikethrough = self.strikethrough;
        options
    }
}

// ============================================================================
// Converter
// ============================================================================

/// Converts markdown into ADF.
///
/// Holds only the immutable [`ConvertOptions`]; parser state lives for a
/// single call, so one converter can be shared across threads and serve any
/// number of conversions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Parse markdown and convert its top-level blocks.
    pub fn convert(&self, markdown: &str) -> Vec<Node> {
        let arena = Arena::new();
        let parser_options = self.options.to_comrak_options();
        let root = parse_document(&arena, markdown, &parser_options);
        let content = Walker::new(markdown).convert_children(root);
        log::trace!("converted markdown into {} top-level ADF nodes", content.len());
        content
    }

    /// Convert markdown into a [`Document`].
    ///
    /// Returns `None` for empty input. When the markdown yields no blocks at
    /// all, the raw input is wrapped verbatim in a single paragraph.
    pub fn to_document(&self, markdown: &str) -> Option<Document> {
        if markdown.is_empty() {
            return None;
        }

        let content = self.convert(markdown);
        if content.is_empty() {
            log::debug!("markdown produced no ADF blocks, falling back to a raw text paragraph");
            let fallback = Node::paragraph(vec![Node::text(markdown)]);
            return Some(Document::new(vec![fallback]));
        }

        Some(Document::new(content))
    }

    /// Convert markdown bytes into an ADF JSON string.
    ///
    /// Empty input, and input that yields no blocks, serialize as a document
    /// with an empty `content` array.
    pub fn to_json(&self, markdown: &[u8]) -> Result<String> {
        let mut document = Document::empty();
        if !markdown.is_empty() {
            document.content = self.convert(&String::from_utf8_lossy(markdown));
        }
        document.to_json()
    }
}

/// Convert markdown into a [`Document`] with the default extensions.
pub fn to_document(markdown: &str) -> Option<Document> {
    Converter::default().to_document(markdown)
}

/// Convert markdown bytes into an ADF JSON string with the default extensions.
pub fn to_json(markdown: &[u8]) -> Result<String> {
    Converter::default().to_json(markdown)
}

/// Walks one parsed document. Keeps the source lines around so inline
/// constructs can be told apart by the characters that delimit them.
struct Walker<'s> {
    lines: Vec<&'s str>,
}

impl<'s> Walker<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            lines: source.split('\n').collect(),
        }
    }

    /// The source byte right before a 1-based line/column position.
    fn byte_before(&self, position: LineColumn) -> Option<u8> {
        let line = self.lines.get(position.line.checked_sub(1)?)?;
        let index = position.column.checked_sub(2)?;
        line.as_bytes().get(index).copied()
    }

    // ========================================================================
    // Block conversion
    // ========================================================================

    fn convert_children<'a>(&self, node: &'a AstNode<'a>) -> Vec<Node> {
        node.children()
            .filter_map(|child| self.convert_node(child))
            .collect()
    }

    fn convert_node<'a>(&self, node: &'a AstNode<'a>) -> Option<Node> {
        let ast = node.data.borrow();
        match &ast.value {
            NodeValue::Paragraph => self.convert_paragraph(node),
            NodeValue::Heading(heading) => Some(Node::Heading {
                attrs: HeadingAttrs {
                    level: heading.level,
                },
                content: self.convert_inline_children(node),
            }),
            NodeValue::List(list) => Some(self.convert_list(node, list)),
            NodeValue::Item(_) => Some(self.convert_list_item(node)),
            NodeValue::CodeBlock(code) => Some(convert_code_block(code)),
            NodeValue::BlockQuote => Some(Node::Blockquote {
                content: self.convert_children(node),
            }),
            NodeValue::ThematicBreak => Some(Node::Rule),
            NodeValue::Table(_) => Some(self.convert_table(node)),
            _ => None,
        }
    }

    /// Paragraphs without inline content are dropped.
    fn convert_paragraph<'a>(&self, node: &'a AstNode<'a>) -> Option<Node> {
        let content = self.convert_inline_children(node);
        if content.is_empty() {
            return None;
        }
        Some(Node::paragraph(content))
    }

    fn convert_list<'a>(&self, node: &'a AstNode<'a>, list: &NodeList) -> Node {
        let content = self.convert_children(node);
        match list.list_type {
            ListType::Bullet => Node::BulletList { content },
            ListType::Ordered => Node::OrderedList {
                attrs: OrderedListAttrs {
                    order: list.start as u64,
                },
                content,
            },
        }
    }

    /// Loose and tight items both normalize their text to `paragraph` children.
    fn convert_list_item<'a>(&self, node: &'a AstNode<'a>) -> Node {
        let content = node
            .children()
            .filter_map(|child| {
                let ast = child.data.borrow();
                match &ast.value {
                    NodeValue::Paragraph => self.convert_paragraph(child),
                    NodeValue::List(list) => Some(self.convert_list(child, list)),
                    _ => self.convert_node(child),
                }
            })
            .collect();

        Node::ListItem { content }
    }

    fn convert_table<'a>(&self, node: &'a AstNode<'a>) -> Node {
        let rows = node
            .children()
            .filter_map(|child| match child.data.borrow().value {
                NodeValue::TableRow(header) => Some(self.convert_table_row(child, header)),
                _ => None,
            })
            .collect();

        Node::Table {
            attrs: TableAttrs::default(),
            content: rows,
        }
    }

    fn convert_table_row<'a>(&self, node: &'a AstNode<'a>, header: bool) -> Node {
        let cells = node
            .children()
            .filter(|child| matches!(child.data.borrow().value, NodeValue::TableCell))
            .map(|cell| self.convert_table_cell(cell, header))
            .collect();

        Node::TableRow { content: cells }
    }

    /// Every cell wraps exactly one paragraph, which is never empty.
    fn convert_table_cell<'a>(&self, node: &'a AstNode<'a>, header: bool) -> Node {
        let mut content = self.convert_inline_children(node);
        if content.is_empty() {
            content.push(Node::text(""));
        }

        let attrs = CellAttrs::default();
        let content = vec![Node::paragraph(content)];
        if header {
            Node::TableHeader { attrs, content }
        } else {
            Node::TableCell { attrs, content }
        }
    }

    // ========================================================================
    // Inline conversion
    // ========================================================================

    fn convert_inline_children<'a>(&self, node: &'a AstNode<'a>) -> Vec<Node> {
        node.children()
            .flat_map(|child| self.convert_inline(child, &[]))
            .collect()
    }

    /// Convert an inline node, applying the marks of every enclosing construct.
    ///
    /// `marks` is borrowed and never modified; constructs that add formatting
    /// build their own extended copy with [`with_mark`], so sibling subtrees each
    /// see only the marks of their own ancestors.
    fn convert_inline<'a>(&self, node: &'a AstNode<'a>, marks: &[Mark]) -> Vec<Node> {
        let ast = node.data.borrow();
        match &ast.value {
            NodeValue::Text(text) => text_run(text, marks),
            NodeValue::LineBreak => vec![Node::HardBreak],
            NodeValue::Emph => self.convert_inline_with_mark(node, marks, Mark::Em),
            NodeValue::Strong => self.convert_inline_with_mark(node, marks, Mark::Strong),
            NodeValue::Strikethrough => self.convert_inline_with_mark(node, marks, Mark::Strike),
            NodeValue::Code(code) => vec![Node::text_with_marks(
                code.literal.clone(),
                with_mark(marks, Mark::Code),
            )],
            NodeValue::Link(link) => self.convert_link(node, link, marks),
            // No ADF counterpart; the markup and its text are dropped.
            NodeValue::HtmlInline(_) => Vec::new(),
            NodeValue::Image(link) => convert_image(node, link, marks),
            // Soft breaks have no children and emit nothing.
            _ => node
                .children()
                .flat_map(|child| self.convert_inline(child, marks))
                .collect(),
        }
    }

    fn convert_inline_with_mark<'a>(
        &self,
        node: &'a AstNode<'a>,
        marks: &[Mark],
        mark: Mark,
    ) -> Vec<Node> {
        let marks = with_mark(marks, mark);
        node.children()
            .flat_map(|child| self.convert_inline(child, &marks))
            .collect()
    }

    fn convert_link<'a>(
        &self,
        node: &'a AstNode<'a>,
        link: &NodeLink,
        marks: &[Mark],
    ) -> Vec<Node> {
        if self.is_autolink(node) {
            return vec![Node::text_with_marks(
                link.url.clone(),
                with_mark(marks, Mark::link(link.url.clone())),
            )];
        }
        self.convert_inline_with_mark(node, marks, Mark::link(link.url.clone()))
    }

    /// `<https://example.com>` and `<user@example.com>` parse as links with a
    /// single text child written right after the opening `<`. Inline links
    /// and references open with `[` instead.
    fn is_autolink<'a>(&self, node: &'a AstNode<'a>) -> bool {
        let mut children = node.children();
        let (Some(only), None) = (children.next(), children.next()) else {
            return false;
        };

        let ast = only.data.borrow();
        matches!(ast.value, NodeValue::Text(_))
            && self.byte_before(ast.sourcepos.start) == Some(b'<')
    }
}

/// Code text keeps its indentation; only the final newline is dropped.
fn convert_code_block(code: &NodeCodeBlock) -> Node {
    let literal = code.literal.strip_suffix('\n').unwrap_or(&code.literal);

    let attrs = if code.fenced {
        code.info
            .split_whitespace()
            .next()
            .map(|language| CodeBlockAttrs {
                language: language.to_string(),
            })
    } else {
        None
    };

    Node::CodeBlock {
        attrs,
        content: vec![Node::text(literal)],
    }
}

fn text_run(text: &str, marks: &[Mark]) -> Vec<Node> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![Node::text_with_marks(text, marks.to_vec())]
}

/// Copy the inherited marks and append one more.
fn with_mark(marks: &[Mark], mark: Mark) -> Vec<Mark> {
    let mut extended = Vec::with_capacity(marks.len() + 1);
    extended.extend_from_slice(marks);
    extended.push(mark);
    extended
}

/// Images degrade to their alt text, or to the destination when there is none.
fn convert_image<'a>(node: &'a AstNode<'a>, link: &NodeLink, marks: &[Mark]) -> Vec<Node> {
    let alt = text_runs(node);
    let text = if alt.is_empty() {
        link.url.clone()
    } else {
        alt
    };
    vec![Node::text_with_marks(text, marks.to_vec())]
}

/// Concatenate the text runs below `node`, ignoring every other inline kind.
fn text_runs<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for descendant in node.descendants().skip(1) {
        if let NodeValue::Text(run) = &descendant.data.borrow().value {
            text.push_str(run);
        }
    }
    text
}

// ============================================================================
// Tests
// ============================================================================
