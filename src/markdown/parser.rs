//! Markdown import using comrak
//!
//! This module parses markdown with comrak and converts the resulting AST
//! into an editable [`Document`].

use comrak::{
    nodes::{AstNode, ListType as ComrakListType, NodeValue},
    parse_document, Arena, Options,
};

use crate::config::MarkdownSettings;
use crate::dom::{Document, NodeId, Tag};
use crate::error::Result;

/// Convert settings to comrak Options.
fn to_comrak_options(settings: &MarkdownSettings) -> Options {
    let mut options = Options::default();

    options.extension.strikethrough = settings.strikethrough;
    options.extension.table = settings.tables;
    options.extension.tasklist = settings.tasklist;

    options
}

/// Parse markdown with default settings.
///
/// # Example
/// ```ignore
/// let doc = parse_markdown("- one\n- two")?;
/// assert_eq!(to_html(&doc, doc.root()), "<ul><li><p>one</p></li><li><p>two</p></li></ul>");
/// ```
pub fn parse_markdown(markdown: &str) -> Result<Document> {
    parse_markdown_with_options(markdown, &MarkdownSettings::default())
}

/// Parse markdown with custom settings.
pub fn parse_markdown_with_options(markdown: &str, settings: &MarkdownSettings) -> Result<Document> {
    let arena = Arena::new();
    let options = to_comrak_options(settings);
    let root = parse_document(&arena, markdown, &options);

    let mut doc = Document::new();
    let body = doc.root();
    convert_children(&mut doc, root, body, false);
    Ok(doc)
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal Conversion Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert the children of a comrak node into children of `parent`.
fn convert_children<'a>(doc: &mut Document, node: &'a AstNode<'a>, parent: NodeId, header_row: bool) {
    for child in node.children() {
        let ast = child.data.borrow();

        match &ast.value {
            NodeValue::Text(text) => {
                doc.append_text(parent, text);
            }
            NodeValue::SoftBreak => {
                doc.append_text(parent, " ");
            }
            NodeValue::HtmlInline(html) => {
                doc.append_text(parent, html);
            }
            NodeValue::Code(code) => {
                let element = doc.append_element(parent, Tag::Code);
                doc.append_text(element, &code.literal);
            }
            NodeValue::CodeBlock(code) => {
                let element = doc.append_element(parent, Tag::Pre);
                doc.append_text(element, code.literal.trim_end_matches('\n'));
            }
            NodeValue::HtmlBlock(html) => {
                let element = doc.append_element(parent, Tag::Div);
                doc.append_text(element, html.literal.trim_end_matches('\n'));
            }
            NodeValue::FrontMatter(_) => {}
            value => {
                let element = doc.append_element(parent, element_tag(value, header_row));
                convert_children(doc, child, element, matches!(value, NodeValue::TableRow(true)));
            }
        }
    }
}

/// Element tag for a comrak container node.
fn element_tag(value: &NodeValue, header_row: bool) -> Tag {
    match value {
        NodeValue::BlockQuote => Tag::Blockquote,
        NodeValue::List(list) => {
            if list.list_type == ComrakListType::Ordered {
                Tag::Ol
            } else {
                Tag::Ul
            }
        }
        NodeValue::Item(_) | NodeValue::TaskItem(_) => Tag::Li,
        NodeValue::Paragraph => Tag::P,
        NodeValue::Heading(heading) => Tag::Heading(heading.level),
        NodeValue::ThematicBreak => Tag::Hr,
        NodeValue::Table(_) => Tag::Table,
        NodeValue::TableRow(_) => Tag::Tr,
        NodeValue::TableCell => {
            if header_row {
                Tag::Th
            } else {
                Tag::Td
            }
        }
        NodeValue::Emph => Tag::Em,
        NodeValue::Strong => Tag::Strong,
        NodeValue::Strikethrough => Tag::Del,
        NodeValue::Link(_) => Tag::A,
        NodeValue::LineBreak => Tag::Br,
        // Anything else keeps its content inline
        _ => Tag::Span,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::html::to_html;

    // ─────────────────────────────────────────────────────────────────────────
    // Basic Parsing Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_empty_document() {
        let doc = parse_markdown("").unwrap();
        assert!(doc.children(doc.root()).is_empty());
    }

    #[test]
    fn test_parse_paragraphs() {
        let doc = parse_markdown("First\n\nSecond").unwrap();
        assert_eq!(to_html(&doc, doc.root()), "<p>First</p><p>Second</p>");
    }

    #[test]
    fn test_parse_heading() {
        let doc = parse_markdown("## Title").unwrap();
        assert_eq!(to_html(&doc, doc.root()), "<h2>Title</h2>");
    }

    #[test]
    fn test_soft_break_becomes_space() {
        let doc = parse_markdown("one\ntwo").unwrap();
        assert_eq!(to_html(&doc, doc.root()), "<p>one two</p>");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // List Parsing Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_bullet_list() {
        let doc = parse_markdown("- a\n- b").unwrap();
        assert_eq!(
            to_html(&doc, doc.root()),
            "<ul><li><p>a</p></li><li><p>b</p></li></ul>"
        );
    }

    #[test]
    fn test_parse_ordered_list() {
        let doc = parse_markdown("1. a\n2. b").unwrap();
        assert_eq!(
            to_html(&doc, doc.root()),
            "<ol><li><p>a</p></li><li><p>b</p></li></ol>"
        );
    }

    #[test]
    fn test_parse_nested_list_stays_inside_item() {
        let doc = parse_markdown("- a\n  - b").unwrap();
        assert_eq!(
            to_html(&doc, doc.root()),
            "<ul><li><p>a</p><ul><li><p>b</p></li></ul></li></ul>"
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Table Parsing Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_table() {
        let doc = parse_markdown("| h |\n|---|\n| c |").unwrap();
        assert_eq!(
            to_html(&doc, doc.root()),
            "<table><tr><th>h</th></tr><tr><td>c</td></tr></table>"
        );
    }

    #[test]
    fn test_tables_disabled() {
        let settings = MarkdownSettings {
            tables: false,
            ..MarkdownSettings::default()
        };
        let doc = parse_markdown_with_options("| h |\n|---|\n| c |", &settings).unwrap();
        let html = to_html(&doc, doc.root());
        assert!(!html.contains("<table>"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inline Parsing Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_inline_formatting() {
        let doc = parse_markdown("**bold** *em* `code`").unwrap();
        assert_eq!(
            to_html(&doc, doc.root()),
            "<p><strong>bold</strong> <em>em</em> <code>code</code></p>"
        );
    }

    #[test]
    fn test_parse_code_block() {
        let doc = parse_markdown("```\nlet x = 1;\n```").unwrap();
        assert_eq!(to_html(&doc, doc.root()), "<pre>let x = 1;</pre>");
    }
}
